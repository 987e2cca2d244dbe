//! Source repository facade
//!
//! [`Repository`] wraps the repository the user runs the tool from. It only
//! ever reads: name resolution, range computation, commit metadata, patch
//! generation, and tag enumeration are all queries against the backend. The
//! scratch side (the one that gets written to) lives in
//! [`crate::areas::scratch`].

use crate::areas::backend::GitBackend;
use crate::artifacts::commit::{CommitId, CommitMeta, CommitRange};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Per-tag checkpoint message block; multiple tags concatenate in
/// enumeration order
const TAG_MESSAGE_FORMAT: &str = "%(refname:short): %(subject)%0a%0a%(body)";

/// Read-only handle on the repository being viewed
#[derive(Debug)]
pub struct Repository {
    backend: GitBackend,
}

impl Repository {
    /// Discover the work tree containing the current directory
    pub async fn discover(debug: bool) -> anyhow::Result<Self> {
        let cwd = std::env::current_dir().context("failed to determine the current directory")?;
        let probe = GitBackend::new(cwd, debug);
        let top_level = probe
            .capture(["rev-parse", "--show-toplevel"])
            .await
            .context("not inside a git work tree")?;

        let backend = GitBackend::new(PathBuf::from(top_level.trim()), debug);
        Ok(Self { backend })
    }

    pub fn top_level(&self) -> &Path {
        self.backend.work_dir()
    }

    /// Resolve any commit-ish name to a full commit hash
    pub async fn resolve_commit(&self, name: &str) -> anyhow::Result<CommitId> {
        let spec = format!("{name}^{{commit}}");
        let stdout = self
            .backend
            .capture(["rev-parse", "--verify", &spec])
            .await
            .with_context(|| format!("cannot resolve '{name}'"))?;

        CommitId::try_parse(stdout.trim())
    }

    /// Commits reachable from `branch` but not `upstream`, oldest first
    ///
    /// `extra_args` go to the backend verbatim, so callers can narrow the
    /// range with anything `rev-list` understands.
    pub async fn commit_range(
        &self,
        branch: &CommitId,
        upstream: &CommitId,
        extra_args: &[String],
    ) -> anyhow::Result<CommitRange> {
        let mut args = vec![
            "rev-list".to_string(),
            "--reverse".to_string(),
            "--topo-order".to_string(),
            format!("{upstream}..{branch}"),
        ];
        args.extend(extra_args.iter().cloned());

        let stdout = self.backend.capture(&args).await?;
        let commits = stdout
            .lines()
            .map(CommitId::try_parse)
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(CommitRange::new(commits))
    }

    /// Fetch a commit's direct parents and subject line
    pub async fn commit_meta(&self, id: &CommitId) -> anyhow::Result<CommitMeta> {
        let stdout = self
            .backend
            .capture(["show", "-s", "--format=%P%n%s", id.as_ref()])
            .await?;
        let mut lines = stdout.lines();

        let parents = lines
            .next()
            .unwrap_or_default()
            .split_whitespace()
            .map(CommitId::try_parse)
            .collect::<anyhow::Result<Vec<_>>>()?;
        let subject = lines.next().unwrap_or_default().to_string();

        Ok(CommitMeta::new(id.clone(), parents, subject))
    }

    /// Raw single-commit patch document, bytes untouched
    pub async fn format_patch(&self, id: &CommitId) -> anyhow::Result<Vec<u8>> {
        self.backend
            .capture_bytes(["format-patch", "--stdout", "-1", id.as_ref()])
            .await
    }

    /// Does `new` carry exactly the same content as `old`?
    pub async fn diff_is_empty(&self, old: &CommitId, new: &CommitId) -> anyhow::Result<bool> {
        self.backend
            .check(["diff", "--quiet", old.as_ref(), new.as_ref()])
            .await
    }

    /// Combined message of all tags pointing at this commit, if any
    pub async fn tag_annotation(&self, id: &CommitId) -> anyhow::Result<Option<String>> {
        let format = format!("--format={TAG_MESSAGE_FORMAT}");
        let stdout = self
            .backend
            .capture(["for-each-ref", "--points-at", id.as_ref(), &format, "refs/tags"])
            .await?;

        let message = stdout.trim_end();
        if message.is_empty() {
            Ok(None)
        } else {
            Ok(Some(message.to_string()))
        }
    }
}

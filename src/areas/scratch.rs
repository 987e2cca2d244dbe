//! Disposable scratch repository
//!
//! The patch-series view is assembled inside a throwaway clone that shares
//! object storage with the source repository, so creating it costs no object
//! copying. Its history starts on an unborn orphan branch with an empty
//! index and working tree; checkpoint commits are the only commits it ever
//! receives.
//!
//! The backing directory lives under the current working directory with a
//! randomized suffix and is owned by a [`tempfile::TempDir`], so it is
//! removed when the value drops: on success, on any error return, and on
//! the interruption path, which is routed through a normal error return.
//!
//! Checkpoint commits carry a fixed synthetic identity and are never
//! signed, so a run does not depend on the caller's git configuration.

use crate::areas::backend::GitBackend;
use anyhow::Context;
use std::ffi::OsStr;
use std::path::Path;
use tempfile::TempDir;

const SCRATCH_DIR_PREFIX: &str = ".patch-view-";

const COMMIT_NAME: &str = "patch-view";
const COMMIT_EMAIL: &str = "patch-view@localhost";

/// Branch the checkpoint history is committed on; namespaced so it cannot
/// collide with the branch the clone brings along
const SCRATCH_BRANCH: &str = "refs/heads/patch-view/series";

/// Writable clone the checkpoint walk assembles its result in
#[derive(Debug)]
pub struct ScratchRepo {
    dir: TempDir,
    backend: GitBackend,
}

impl ScratchRepo {
    /// Clone `source` into a fresh temporary directory and orphan its HEAD
    pub async fn create(source: &Path, debug: bool) -> anyhow::Result<Self> {
        let cwd = std::env::current_dir().context("failed to determine the current directory")?;
        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_DIR_PREFIX)
            .tempdir_in(cwd)
            .context("failed to create the scratch directory")?;
        let backend = GitBackend::new(dir.path().to_path_buf(), debug);

        backend
            .run([
                OsStr::new("clone"),
                OsStr::new("--quiet"),
                OsStr::new("--shared"),
                OsStr::new("--no-checkout"),
                source.as_os_str(),
                OsStr::new("."),
            ])
            .await?;
        backend.run(["config", "user.name", COMMIT_NAME]).await?;
        backend.run(["config", "user.email", COMMIT_EMAIL]).await?;
        backend.run(["config", "commit.gpgsign", "false"]).await?;
        backend.run(["symbolic-ref", "HEAD", SCRATCH_BRANCH]).await?;
        backend.run(["read-tree", "--empty"]).await?;

        Ok(Self { dir, backend })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn backend(&self) -> &GitBackend {
        &self.backend
    }

    /// Materialize one patch file in the working tree and register it
    pub async fn write_patch(&self, file_name: &str, content: &[u8]) -> anyhow::Result<()> {
        let path = self.dir.path().join(file_name);
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("failed to write '{file_name}'"))?;

        self.backend.run(["add", "--", file_name]).await
    }

    /// Commit one checkpoint; legal even when the window is empty
    pub async fn commit_checkpoint(&self, message: &str) -> anyhow::Result<()> {
        self.backend
            .run(["commit", "--quiet", "--allow-empty", "-m", message])
            .await
    }

    /// Empty the working tree and index, staging the removals
    pub async fn clear_worktree(&self) -> anyhow::Result<()> {
        self.backend
            .run(["rm", "-r", "-f", "--quiet", "--ignore-unmatch", "--", "."])
            .await
    }
}

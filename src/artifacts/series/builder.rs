//! Checkpoint construction state machine
//!
//! The builder replays the commit range oldest-to-newest and turns it into
//! the scratch repository's history: patch files accumulate in the working
//! tree, and a "checkpoint" commit snapshots them whenever a boundary is
//! crossed.
//!
//! ## Windows and boundaries
//!
//! The commits between two boundaries form a *window*. Three events close
//! a window:
//!
//! - a **tag** pointing at the current commit: the tag's annotation
//!   becomes the checkpoint message (several tags on one commit become one
//!   combined message);
//! - a **reset-merge**: before the working tree is wiped, a window that
//!   holds work no checkpoint has recorded yet is flushed as the synthetic
//!   `!!! Untagged changes preceding reset to upstream` checkpoint, so a
//!   reset can never silently discard patches;
//! - the **end of the range**: leftover untagged work becomes the final
//!   `!!! Untagged changes at end` checkpoint.
//!
//! Every checkpoint empties the working tree, so each checkpoint's snapshot
//! holds exactly the patch files of its own window.
//!
//! ## Ordering
//!
//! Checkpoints are committed in the order their triggering events occur in
//! the walk. The state (`SeriesState`) is carried serially from commit to
//! commit; nothing here can be reordered or parallelized without breaking
//! that guarantee.

use crate::areas::repository::Repository;
use crate::areas::scratch::ScratchRepo;
use crate::artifacts::classify::CommitKind;
use crate::artifacts::commit::{CommitMeta, CommitRange};
use crate::artifacts::patch::name::patch_file_name;
use crate::artifacts::patch::normalize::normalize_patch;
use crate::artifacts::series::state::SeriesState;
use colored::Colorize;
use derive_new::new;

pub const RESET_CHECKPOINT_MESSAGE: &str = "!!! Untagged changes preceding reset to upstream";
pub const TRAILING_CHECKPOINT_MESSAGE: &str = "!!! Untagged changes at end";

/// Walks one commit range and assembles the checkpoint history
#[derive(new)]
pub struct CheckpointBuilder<'r> {
    repository: &'r Repository,
    scratch: &'r ScratchRepo,
    accurate: bool,
    debug: bool,
    #[new(default)]
    state: SeriesState,
    #[new(default)]
    summary: SeriesSummary,
}

/// Counters reported after a completed walk
#[derive(Debug, Default, Clone, Copy)]
pub struct SeriesSummary {
    pub checkpoints: usize,
    pub patches: usize,
}

impl CheckpointBuilder<'_> {
    /// Replay the range into the scratch repository
    ///
    /// Aborts on the first unsupported commit or backend failure; the
    /// orchestrator discards the partial scratch state.
    pub async fn run(&mut self, range: &CommitRange) -> anyhow::Result<SeriesSummary> {
        for id in range.iter() {
            let meta = self.repository.commit_meta(id).await?;
            let kind = self.repository.classify_commit(&meta).await?;
            self.trace_commit(&meta, kind);

            match kind {
                CommitKind::Linear => self.append_patch(&meta).await?,
                CommitKind::ResetMerge => self.cross_reset_boundary().await?,
                CommitKind::SkippedMerge => {}
            }

            self.check_tags(&meta).await?;
        }

        self.flush_trailing_work().await?;

        Ok(self.summary)
    }

    /// Materialize a linear commit's patch file and extend the open window
    async fn append_patch(&mut self, meta: &CommitMeta) -> anyhow::Result<()> {
        let raw = self.repository.format_patch(&meta.id).await?;
        let content = if self.accurate {
            raw
        } else {
            normalize_patch(&String::from_utf8_lossy(&raw), false).into_bytes()
        };

        let file_name = patch_file_name(&meta.subject);
        self.scratch.write_patch(&file_name, &content).await?;

        self.state.record_patch(file_name);
        self.summary.patches += 1;

        Ok(())
    }

    /// Handle a reset-merge: flush unrecorded work, then wipe the tree
    async fn cross_reset_boundary(&mut self) -> anyhow::Result<()> {
        if self.state.has_unresolved_changes() {
            self.commit_checkpoint(RESET_CHECKPOINT_MESSAGE).await?;
        }

        self.scratch.clear_worktree().await?;
        self.state.clear();

        Ok(())
    }

    /// Commit a tag checkpoint when any tag points at this commit
    async fn check_tags(&mut self, meta: &CommitMeta) -> anyhow::Result<()> {
        if let Some(message) = self.repository.tag_annotation(&meta.id).await? {
            self.commit_checkpoint(&message).await?;
            self.state.mark_tagged();
        }

        Ok(())
    }

    /// Keep trailing untagged work from vanishing after the last commit
    async fn flush_trailing_work(&mut self) -> anyhow::Result<()> {
        if self.state.has_unresolved_changes() {
            self.commit_checkpoint(TRAILING_CHECKPOINT_MESSAGE).await?;
        }

        Ok(())
    }

    async fn commit_checkpoint(&mut self, message: &str) -> anyhow::Result<()> {
        self.scratch.commit_checkpoint(message).await?;
        self.scratch.clear_worktree().await?;

        self.state.flush();
        self.summary.checkpoints += 1;

        if self.debug {
            let first_line = message.lines().next().unwrap_or_default();
            eprintln!("{}", format!("checkpoint: {first_line}").dimmed());
        }

        Ok(())
    }

    fn trace_commit(&self, meta: &CommitMeta, kind: CommitKind) {
        if self.debug {
            eprintln!(
                "{}",
                format!("{} {} {}", meta.id.short(), kind, meta.subject).dimmed()
            );
        }
    }
}

//! Commit role classification
//!
//! Parent count decides most of it: one parent is a linear commit, zero or
//! three-plus parents end the run. Two-parent merges split on whether the
//! merge changed anything relative to its first parent. A no-op merge is
//! the "reset to upstream" idiom and acts as a window boundary; a real
//! merge is noted and skipped.

use crate::areas::repository::Repository;
use crate::artifacts::commit::CommitMeta;

/// Role a commit plays in the checkpoint walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitKind {
    /// One parent; becomes a patch file
    Linear,
    /// Two parents, no content change against the first: the topic branch
    /// was reset onto upstream
    ResetMerge,
    /// Two parents with real content; contributes nothing to the series
    SkippedMerge,
}

impl std::fmt::Display for CommitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CommitKind::Linear => "linear",
            CommitKind::ResetMerge => "reset-merge",
            CommitKind::SkippedMerge => "merge (skipped)",
        };
        write!(f, "{label}")
    }
}

impl Repository {
    /// Classify a commit, delegating the no-content-change check to the
    /// backend
    pub async fn classify_commit(&self, meta: &CommitMeta) -> anyhow::Result<CommitKind> {
        match meta.parents.as_slice() {
            [_] => Ok(CommitKind::Linear),
            [first, _] => {
                if self.diff_is_empty(first, &meta.id).await? {
                    Ok(CommitKind::ResetMerge)
                } else {
                    Ok(CommitKind::SkippedMerge)
                }
            }
            parents => anyhow::bail!(
                "unsupported commit {} with {} parents; only linear commits and two-parent merges can be replayed",
                meta.id,
                parents.len()
            ),
        }
    }
}

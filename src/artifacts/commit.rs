//! Commit identity and range types
//!
//! Commits are identified by 40-character hexadecimal hashes handed out by
//! the version-control backend. The types here never compute hashes; they
//! validate and carry what the backend reports.

use derive_new::new;

/// Length of a full commit hash in hexadecimal characters
pub const COMMIT_ID_LENGTH: usize = 40;

/// Length of the abbreviated form used in diagnostics
const SHORT_ID_LENGTH: usize = 7;

/// Validated commit hash
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId(String);

impl CommitId {
    /// Parse and validate a commit hash reported by the backend
    ///
    /// # Arguments
    ///
    /// * `id` - 40-character hexadecimal string
    pub fn try_parse(id: &str) -> anyhow::Result<Self> {
        if id.len() != COMMIT_ID_LENGTH {
            anyhow::bail!("invalid commit hash length {}: '{}'", id.len(), id);
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("invalid commit hash characters: '{}'", id);
        }

        Ok(Self(id.to_string()))
    }

    /// Abbreviated form for diagnostics
    pub fn short(&self) -> &str {
        &self.0[..SHORT_ID_LENGTH]
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One commit's walk-relevant metadata: hash, direct parents, subject line
#[derive(Debug, Clone, new)]
pub struct CommitMeta {
    pub id: CommitId,
    pub parents: Vec<CommitId>,
    pub subject: String,
}

/// The resolved, immutable commit sequence of one run, oldest first
#[derive(Debug, Clone, new)]
pub struct CommitRange {
    commits: Vec<CommitId>,
}

impl CommitRange {
    pub fn iter(&self) -> impl Iterator<Item = &CommitId> {
        self.commits.iter()
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

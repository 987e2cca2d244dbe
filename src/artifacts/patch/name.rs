//! Patch file naming
//!
//! The patch for a linear commit lands in the scratch working tree under a
//! name derived from the commit subject: ASCII alphanumerics and `_` are
//! kept, every other character becomes `-`, and `.patch` is appended. The
//! mapping is one output character per input character; nothing is collapsed
//! or trimmed. Two commits with the same sanitized subject share a name, and
//! the later one wins.

pub const PATCH_SUFFIX: &str = ".patch";

/// Derive the working-tree file name for a commit subject
pub fn patch_file_name(subject: &str) -> String {
    let mut name: String = subject
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    name.push_str(PATCH_SUFFIX);

    name
}

//! Patch text normalization
//!
//! A formatted single-commit patch embeds identifiers that change on every
//! rebase even when the logical change does not: the commit hash in the
//! `From` header, the blob hashes in `index` lines, and the line-number
//! ranges in hunk headers. Zeroing them out makes two patches comparable by
//! content alone, so a reviewer diffing one series view against another sees
//! actual changes instead of renumbering noise.
//!
//! ## Rewrites
//!
//! - `From <hash> <date>` (first line only): every hash character becomes
//!   `0`, length preserved.
//! - `index <old>..<new> <mode>` (after the `---` separator): both hash
//!   fields become all-zero strings of their original length; the mode is
//!   kept.
//! - `@@ -a,b +c,d @@ <context>` (after the separator): both ranges become
//!   the fixed placeholder `000,0`; the context suffix is kept.
//!
//! Everything else passes through untouched, so a malformed document comes
//! back as-is rather than as an error. The transform is idempotent: all
//! replacement text re-matches its own pattern.

const INDEX_LINE_REGEX: &str = r"^index ([0-9a-f]+)\.\.([0-9a-f]+)";
const HUNK_HEADER_REGEX: &str = r"^@@ -[0-9]+(?:,[0-9]+)? \+[0-9]+(?:,[0-9]+)? @@";

const HUNK_PLACEHOLDER: &str = "@@ -000,0 +000,0 @@";

/// Separator between the commit message and the diff body of a formatted patch
const BODY_SEPARATOR: &str = "---";

/// Normalize one patch document for stable comparison
///
/// With `accurate` set the document is passed through unchanged.
pub fn normalize_patch(text: &str, accurate: bool) -> String {
    if accurate {
        return text.to_string();
    }

    // Split on '\n' alone and rejoin, so the exact line structure of the
    // input (trailing newline included) is reproduced.
    let mut output = Vec::new();
    let mut in_diff_body = false;

    for (number, line) in text.split('\n').enumerate() {
        let rewritten = if number == 0 && line.starts_with("From ") {
            zero_header_hash(line)
        } else if !in_diff_body {
            if line == BODY_SEPARATOR {
                in_diff_body = true;
            }
            line.to_string()
        } else if line.starts_with("index ") {
            zero_index_hashes(line)
        } else if line.starts_with("@@ ") {
            placehold_hunk_ranges(line)
        } else {
            line.to_string()
        };

        output.push(rewritten);
    }

    output.join("\n")
}

/// Replace the hash field of a `From <hash> ...` header, keeping its width
fn zero_header_hash(line: &str) -> String {
    let mut fields = line.splitn(3, ' ');
    fields.next();

    let Some(hash) = fields.next() else {
        return line.to_string();
    };
    let zeroed = "0".repeat(hash.chars().count());

    match fields.next() {
        Some(rest) => format!("From {zeroed} {rest}"),
        None => format!("From {zeroed}"),
    }
}

/// Zero both blob hashes of an `index <old>..<new>` line, keeping the mode
fn zero_index_hashes(line: &str) -> String {
    let Ok(re) = regex::Regex::new(INDEX_LINE_REGEX) else {
        return line.to_string();
    };

    re.replace(line, |caps: &regex::Captures<'_>| {
        format!(
            "index {}..{}",
            "0".repeat(caps[1].len()),
            "0".repeat(caps[2].len())
        )
    })
    .into_owned()
}

/// Replace both numeric ranges of a hunk header with the fixed placeholder
fn placehold_hunk_ranges(line: &str) -> String {
    let Ok(re) = regex::Regex::new(HUNK_HEADER_REGEX) else {
        return line.to_string();
    };

    re.replace(line, HUNK_PLACEHOLDER).into_owned()
}

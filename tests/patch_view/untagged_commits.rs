use crate::common::command::{branched_repository_dir, run_revue_command};
use crate::common::repo::commit_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;

/// Replay a topic branch with no tags at all
///
/// History:
///     main:  Base
///     topic: Base -- "Add one" -- "Add two" -- "Add three"
///
/// Expected: exactly one checkpoint collecting every patch file, flagged
/// as untagged work
#[rstest]
fn untagged_commits_collapse_into_a_single_checkpoint(
    branched_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = branched_repository_dir;

    commit_file(dir.path(), "one.txt", "one\n", "Add one");
    commit_file(dir.path(), "two.txt", "two\n", "Add two");
    commit_file(dir.path(), "three.txt", "three\n", "Add three");

    let tool = "git log --reverse --format=%s > ../subjects.txt; \
                git ls-tree --name-only HEAD > ../tree.txt";
    run_revue_command(dir.path(), &["patch-view", "--tool", tool, "topic", "main"])
        .assert()
        .success();

    let subjects = fs::read_to_string(dir.path().join("subjects.txt"))?;
    assert_eq!(subjects, "!!! Untagged changes at end\n");

    let tree = fs::read_to_string(dir.path().join("tree.txt"))?;
    assert_eq!(tree, "Add-one.patch\nAdd-three.patch\nAdd-two.patch\n");

    Ok(())
}

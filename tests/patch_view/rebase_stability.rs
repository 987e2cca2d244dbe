use crate::common::command::{repository_dir, run_git_command, run_revue_command};
use crate::common::repo::{commit_file, git_init};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;

const NOTES: &str = "alpha\nbeta\ngamma\ndelta\nepsilon\nzeta\neta\ntheta\niota\nkappa\n";
const NOTES_EDITED: &str = "alpha\nbeta\ngamma\ndelta\nepsilon\nzeta\neta\ntheta\niota\nkappa prime\n";
const NOTES_UPSTREAM: &str = "intro\nalpha\nbeta\ngamma\ndelta\nepsilon\nzeta\neta\ntheta\niota\nkappa\n";

/// Normalized patches survive a rebase unchanged
///
/// History:
///     main:  Base -- "Add notes", later also "Unrelated upstream work"
///     topic: "Edit notes" on top of main, rebased onto the moved main
///
/// The upstream commit touches the top of the file the topic commit edits
/// at the bottom, so the rebase changes the commit hash, both blob hashes
/// and the hunk offsets of the raw patch while leaving the change itself
/// intact.
///
/// Expected: the normalized patch file is identical before and after
#[rstest]
fn normalized_patch_is_stable_across_rebase(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    git_init(dir.path());
    commit_file(dir.path(), "notes.txt", NOTES, "Add notes");
    run_git_command(dir.path(), &["checkout", "-b", "topic"])
        .assert()
        .success();
    commit_file(dir.path(), "notes.txt", NOTES_EDITED, "Edit notes");

    let first_tool = "git show HEAD:Edit-notes.patch > ../first.patch";
    run_revue_command(
        dir.path(),
        &["patch-view", "--tool", first_tool, "topic", "main"],
    )
    .assert()
    .success();

    // Move the upstream forward and rebase the topic branch onto it
    run_git_command(dir.path(), &["checkout", "--quiet", "main"])
        .assert()
        .success();
    commit_file(dir.path(), "notes.txt", NOTES_UPSTREAM, "Unrelated upstream work");
    run_git_command(dir.path(), &["rebase", "--quiet", "main", "topic"])
        .assert()
        .success();

    let second_tool = "git show HEAD:Edit-notes.patch > ../second.patch";
    run_revue_command(
        dir.path(),
        &["patch-view", "--tool", second_tool, "topic", "main"],
    )
    .assert()
    .success();

    let first = fs::read_to_string(dir.path().join("first.patch"))?;
    let second = fs::read_to_string(dir.path().join("second.patch"))?;

    assert!(
        first.contains("From 0000000000000000000000000000000000000000"),
        "commit hash was not normalized: {first}"
    );
    assert!(
        first.contains("@@ -000,0 +000,0 @@"),
        "hunk offsets were not normalized: {first}"
    );
    assert_eq!(first, second);

    Ok(())
}

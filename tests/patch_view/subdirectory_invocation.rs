use crate::common::command::{
    assert_no_scratch_leftovers, branched_repository_dir, run_revue_command,
};
use crate::common::repo::commit_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;

/// Run the tool from a nested directory of the work tree
///
/// History:
///     main:  Base
///     topic: Base -- "Fix bug"
///
/// Expected: the work tree is discovered from the subdirectory, the scratch
/// clone is created (and removed) under that subdirectory, and the series
/// comes out the same as when running from the root
#[rstest]
fn runs_from_a_subdirectory_of_the_work_tree(
    branched_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = branched_repository_dir;

    commit_file(dir.path(), "parser.txt", "fn parse() {}\n", "Fix bug");

    let nested = dir.path().join("nested");
    fs::create_dir(&nested)?;

    let tool = "git log --reverse --format=%s > ../subjects.txt; \
                git ls-tree --name-only HEAD > ../tree.txt";
    run_revue_command(&nested, &["patch-view", "--tool", tool, "topic", "main"])
        .assert()
        .success();

    // The tool ran inside a scratch clone rooted under the subdirectory
    let subjects = fs::read_to_string(nested.join("subjects.txt"))?;
    assert_eq!(subjects, "!!! Untagged changes at end\n");

    let tree = fs::read_to_string(nested.join("tree.txt"))?;
    assert_eq!(tree, "Fix-bug.patch\n");

    assert_no_scratch_leftovers(&nested);

    Ok(())
}

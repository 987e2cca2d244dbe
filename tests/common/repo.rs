use crate::common::command::{commit_identity, git_commit, run_git_command};
use crate::common::file::{FileSpec, write_file};
use std::path::Path;

/// Create a git repository on a `main` branch with a single base commit
pub fn git_init(dir: &Path) {
    run_git_command(dir, &["init", "--quiet"]).assert().success();
    run_git_command(dir, &["symbolic-ref", "HEAD", "refs/heads/main"])
        .assert()
        .success();
    run_git_command(dir, &["config", "user.name", "fake_user"])
        .assert()
        .success();
    run_git_command(dir, &["config", "user.email", "fake_email@email.com"])
        .assert()
        .success();

    commit_file(dir, "base.txt", "base content\n", "Base commit");
}

/// Write one file and commit it, returning the new commit id
pub fn commit_file(dir: &Path, name: &str, content: &str, message: &str) -> String {
    write_file(FileSpec::new(dir.join(name), content.to_string()));
    run_git_command(dir, &["add", name]).assert().success();
    git_commit(dir, message).assert().success();

    head_sha(dir)
}

/// Commit a file with a generated name and content, returning the commit id
pub fn commit_generated_file(dir: &Path, message: &str) -> String {
    use fake::Fake;
    use fake::faker::lorem::en::{Word, Words};

    let name = format!("{}.txt", Word().fake::<String>());
    let content = format!("{}\n", Words(5..10).fake::<Vec<String>>().join(" "));

    commit_file(dir, &name, &content, message)
}

pub fn annotated_tag(dir: &Path, name: &str, message: &str) {
    let mut cmd = run_git_command(dir, &["tag", "-a", name, "-m", message]);
    cmd.envs(commit_identity());
    cmd.assert().success();
}

pub fn lightweight_tag(dir: &Path, name: &str) {
    run_git_command(dir, &["tag", name]).assert().success();
}

/// Rewind the current branch to `upstream`, keeping the old tip reachable
/// through an `ours` merge so the history shows a reset boundary
pub fn reset_branch_to_upstream(dir: &Path, upstream: &str) -> String {
    let old_tip = head_sha(dir);
    run_git_command(dir, &["reset", "--hard", "--quiet", upstream])
        .assert()
        .success();

    let mut cmd = run_git_command(
        dir,
        &[
            "merge",
            "-s",
            "ours",
            "--no-ff",
            "-m",
            "Reset to upstream",
            &old_tip,
        ],
    );
    cmd.envs(commit_identity());
    cmd.assert().success();

    head_sha(dir)
}

/// Merge `branch` into the current branch with a real merge commit
pub fn merge_branch(dir: &Path, branch: &str, message: &str) -> String {
    let mut cmd = run_git_command(dir, &["merge", "--no-ff", "-m", message, branch]);
    cmd.envs(commit_identity());
    cmd.assert().success();

    head_sha(dir)
}

pub fn head_sha(dir: &Path) -> String {
    let output = run_git_command(dir, &["rev-parse", "HEAD"])
        .output()
        .expect("Failed to read HEAD");

    String::from_utf8(output.stdout)
        .expect("Commit id is not utf-8")
        .trim()
        .to_string()
}

//! The patch-view command
//!
//! Owns the lifecycle of one run: resolve the branch and upstream names,
//! create the scratch clone, compute the commit range, drive the checkpoint
//! builder, and finally hand the assembled history to a browser (the
//! `--tool` shell command, or the built-in paged log view). The scratch
//! directory disappears with the [`ScratchRepo`] value on every path out of
//! here.

use crate::areas::repository::Repository;
use crate::areas::scratch::ScratchRepo;
use crate::artifacts::core::{page_or_print, should_page};
use crate::artifacts::series::builder::CheckpointBuilder;
use anyhow::Context;
use colored::Colorize;
use derive_new::new;

/// Flags of one run, immutable once parsed
#[derive(Debug, Clone, new)]
pub struct PatchViewOptions {
    pub tool: Option<String>,
    pub accurate: bool,
    pub debug: bool,
}

impl Repository {
    /// Assemble the patch-series view of `branch` since `upstream` and
    /// open a browser on it
    pub async fn patch_view(
        &self,
        branch: &str,
        upstream: &str,
        range_args: &[String],
        options: &PatchViewOptions,
    ) -> anyhow::Result<()> {
        let branch_id = self.resolve_commit(branch).await?;
        let upstream_id = self.resolve_commit(upstream).await?;

        let scratch = ScratchRepo::create(self.top_level(), options.debug).await?;
        let range = self
            .commit_range(&branch_id, &upstream_id, range_args)
            .await?;

        if options.debug {
            eprintln!(
                "{}",
                format!(
                    "replaying {} commits from {}..{}",
                    range.len(),
                    upstream_id.short(),
                    branch_id.short()
                )
                .dimmed()
            );
        }

        let mut builder =
            CheckpointBuilder::new(self, &scratch, options.accurate, options.debug);
        let summary = builder.run(&range).await?;

        if summary.checkpoints == 0 {
            eprintln!(
                "{}",
                format!("patch series between '{upstream}' and '{branch}' is empty; nothing to browse")
                    .yellow()
            );
            return Ok(());
        }

        match &options.tool {
            Some(tool) => run_browsing_tool(tool, &scratch).await,
            None => show_series_log(&scratch).await,
        }
    }
}

/// Run the user's browsing command with the scratch repository as cwd
async fn run_browsing_tool(tool: &str, scratch: &ScratchRepo) -> anyhow::Result<()> {
    let status = tokio::process::Command::new("sh")
        .arg("-c")
        .arg(tool)
        .current_dir(scratch.path())
        .kill_on_drop(true)
        .status()
        .await
        .with_context(|| format!("failed to run browsing tool '{tool}'"))?;

    if !status.success() {
        anyhow::bail!("browsing tool '{tool}' exited with {status}");
    }

    Ok(())
}

/// Built-in viewer: the scratch history as a log with patches
async fn show_series_log(scratch: &ScratchRepo) -> anyhow::Result<()> {
    let color = if should_page() {
        "--color=always"
    } else {
        "--color=never"
    };
    let log = scratch.backend().capture(["log", "--patch", color]).await?;

    page_or_print(&log)
}

//! Git subprocess execution
//!
//! Every version-control operation in this crate goes through [`GitBackend`]:
//! one `git` invocation per call, run to completion in the backend's working
//! directory. Failures carry the argument list and whatever git printed on
//! stderr, so the user sees the backend's own explanation. With `--debug`
//! each command is echoed to stderr as `+ git <args>` before it runs.

use anyhow::Context;
use colored::Colorize;
use derive_new::new;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Output;

/// Runs `git` commands inside one repository directory
#[derive(Debug, Clone, new)]
pub struct GitBackend {
    work_dir: PathBuf,
    debug: bool,
}

impl GitBackend {
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Run a command that must succeed, discarding its output
    pub async fn run<I, S>(&self, args: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args = collect_args(args);
        let output = self.output(&args).await?;
        ensure_success(&args, &output)?;

        Ok(())
    }

    /// Run a command that must succeed and capture its stdout as text
    pub async fn capture<I, S>(&self, args: I) -> anyhow::Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args = collect_args(args);
        let output = self.output(&args).await?;
        ensure_success(&args, &output)?;

        String::from_utf8(output.stdout)
            .with_context(|| format!("git {} produced non-UTF-8 output", render_args(&args)))
    }

    /// Run a command that must succeed and capture its stdout untouched
    pub async fn capture_bytes<I, S>(&self, args: I) -> anyhow::Result<Vec<u8>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args = collect_args(args);
        let output = self.output(&args).await?;
        ensure_success(&args, &output)?;

        Ok(output.stdout)
    }

    /// Run a yes/no query: exit 0 means yes, exit 1 means no
    ///
    /// Anything else (including death by signal) is a backend failure.
    pub async fn check<I, S>(&self, args: I) -> anyhow::Result<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args = collect_args(args);
        let output = self.output(&args).await?;

        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(command_failure(&args, &output)),
        }
    }

    async fn output(&self, args: &[OsString]) -> anyhow::Result<Output> {
        if self.debug {
            eprintln!("{}", format!("+ git {}", render_args(args)).dimmed());
        }

        tokio::process::Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("failed to spawn git {}", render_args(args)))
    }
}

fn collect_args<I, S>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    args.into_iter()
        .map(|arg| arg.as_ref().to_os_string())
        .collect()
}

fn render_args(args: &[OsString]) -> String {
    args.iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

fn ensure_success(args: &[OsString], output: &Output) -> anyhow::Result<()> {
    if output.status.success() {
        Ok(())
    } else {
        Err(command_failure(args, output))
    }
}

fn command_failure(args: &[OsString], output: &Output) -> anyhow::Error {
    anyhow::anyhow!(
        "git {} failed ({}): {}",
        render_args(args),
        output.status,
        String::from_utf8_lossy(&output.stderr).trim()
    )
}

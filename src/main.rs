use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use revue::areas::repository::Repository;
use revue::commands::patch_view::PatchViewOptions;

#[derive(Parser)]
#[command(
    name = "revue",
    version = "0.1.0",
    about = "Browse a topic branch as a tag-annotated patch series",
    long_about = "This tool replays the commits a branch carries on top of its upstream \
    into a disposable scratch repository: one normalized patch file per commit, grouped \
    into checkpoints at every tag and reset-to-upstream boundary. The original branch is \
    never written to.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Verbose diagnostics and backend command echoing on stderr"
    )]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "patch-view",
        about = "Replay BRANCH since UPSTREAM as a browsable patch series",
        long_about = "This command resolves BRANCH and UPSTREAM, replays every commit unique \
        to BRANCH into a temporary scratch clone as a series of patch files and checkpoint \
        commits, and opens a history browser on the result. The scratch clone is removed \
        when the browser exits."
    )]
    PatchView {
        #[arg(
            long,
            help = "Shell command to browse the result, run inside the scratch repository"
        )]
        tool: Option<String>,
        #[arg(
            long,
            help = "Keep patches byte-exact instead of zeroing volatile fields"
        )]
        accurate: bool,
        #[arg(index = 1, help = "The topic branch to replay")]
        branch: String,
        #[arg(index = 2, help = "The upstream the branch forked from")]
        upstream: String,
        #[arg(
            index = 3,
            num_args = 0..,
            allow_hyphen_values = true,
            trailing_var_arg = true,
            help = "Extra range-limiting arguments passed to the backend verbatim"
        )]
        range_args: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = parse_cli();

    match &cli.command {
        Commands::PatchView {
            tool,
            accurate,
            branch,
            upstream,
            range_args,
        } => {
            let repository = Repository::discover(cli.debug).await?;
            let options = PatchViewOptions::new(tool.clone(), *accurate, cli.debug);

            tokio::select! {
                result = repository.patch_view(branch, upstream, range_args, &options) => result,
                _ = interruption() => anyhow::bail!("interrupted"),
            }
        }
    }
}

/// Parse the command line, mapping usage problems to exit code 1
///
/// Help and version requests keep clap's exit code 0.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    }
}

/// Resolves when the process is asked to stop, so the run can unwind
/// through the normal error path and the scratch directory still drops
#[cfg(unix)]
async fn interruption() {
    use tokio::signal::unix::{SignalKind, signal};

    let ctrl_c = tokio::signal::ctrl_c();
    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = ctrl_c => {}
                _ = terminate.recv() => {}
            }
        }
        Err(_) => {
            let _ = ctrl_c.await;
        }
    }
}

#[cfg(not(unix))]
async fn interruption() {
    let _ = tokio::signal::ctrl_c().await;
}

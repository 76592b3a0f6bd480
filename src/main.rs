use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use release_bump::cli::{run_release, ReleaseArgs, ReleaseOutcome};
use release_bump::config;
use release_bump::domain::Increment;
use release_bump::editor;
use release_bump::git::Git2Repository;
use release_bump::logging::{init_logging, Verbosity};
use release_bump::ui;
use release_bump::ReleaseError;

#[derive(clap::Parser)]
#[command(
    name = "release-bump",
    version,
    about = "Bump the version from git tags, update project files, commit and tag the release"
)]
struct Args {
    #[arg(short, long, value_enum, help = "Version component to increment")]
    increment: Increment,

    #[arg(short, long, help = "Show additional output")]
    verbose: bool,

    #[arg(short, long, help = "Show minimal output")]
    quiet: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(required = true, help = "TOML files whose version field is updated")]
    filenames: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);
    init_logging(verbosity);

    match run(args) {
        Ok(outcome) => {
            if verbosity != Verbosity::Quiet {
                ui::display_release_summary(&outcome);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            ui::display_error(&format!("{:#}", err));
            let code = err
                .downcast_ref::<ReleaseError>()
                .map(ReleaseError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn run(args: Args) -> Result<ReleaseOutcome> {
    let config = config::load_config(args.config.as_deref())
        .context("Error loading config")?;

    let repo = Git2Repository::open(".").context("Git repository error")?;
    let editor = editor::from_config(&config.editor);

    let release_args = ReleaseArgs {
        increment: args.increment,
        files: args.filenames,
        dry_run: args.dry_run,
    };

    let outcome = run_release(&repo, editor.as_ref(), &config, &release_args)?;
    Ok(outcome)
}

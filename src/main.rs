use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commit_chef::cli::{run_bump_workflow, BumpWorkflowArgs, RunOutcome, WorkflowResult};
use commit_chef::config;
use commit_chef::git::GitCli;
use commit_chef::ui;

/// The only failure text shown without `--verbose`.
const FAILURE_MESSAGE: &str = "Failed to run commit chef";

#[derive(clap::Parser)]
#[command(
    name = "commit-chef",
    version,
    about = "Bump a project's version fields from conventional commits since the last tag"
)]
struct Args {
    #[arg(short = 'C', long, default_value = ".", help = "Project directory")]
    dir: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Compute the new version without writing the descriptor")]
    dry_run: bool,

    #[arg(short, long, help = "Log each step and the underlying error on failure")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(result) => {
            report(&result);
            Ok(())
        }
        Err(e) => {
            debug!("{:#}", e);
            ui::display_error(FAILURE_MESSAGE);
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<WorkflowResult> {
    let config = config::load_config(args.config.as_deref(), &args.dir)?;
    let repo = GitCli::new(&args.dir);
    let workflow_args = BumpWorkflowArgs {
        dir: args.dir.clone(),
        dry_run: args.dry_run,
    };

    Ok(run_bump_workflow(&repo, &workflow_args, &config)?)
}

fn report(result: &WorkflowResult) {
    for warning in result.reported_warnings() {
        ui::display_boundary_warning(warning);
    }

    match &result.outcome {
        RunOutcome::NoNewCommits => debug!("nothing to do"),
        RunOutcome::Unchanged { version } => {
            debug!(%version, "no commit bumps the version");
        }
        RunOutcome::Updated {
            descriptor,
            version,
            updates,
            written,
            ..
        } => {
            ui::display_field_updates(updates);
            if *written {
                ui::display_success(&format!("{} set to {}", descriptor.display(), version));
            } else {
                ui::display_status(&format!(
                    "Dry run: {} left unchanged",
                    descriptor.display()
                ));
            }
        }
    }
}

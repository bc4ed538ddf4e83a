use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use botbump::cli::orchestration::{run_bump_workflow, BumpWorkflowArgs};
use botbump::{config, logging, ui};

#[derive(clap::Parser)]
#[command(
    name = "botbump",
    version,
    about = "Bump a tracked upstream runtime version, then release or open a pull request"
)]
struct Args {
    #[arg(help = "Target repository as owner/repo")]
    repository: Option<String>,

    #[arg(help = "Access token for the target repository")]
    token: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        short,
        long,
        default_value = ".",
        help = "Checkout of the target repository"
    )]
    workdir: PathBuf,

    #[arg(short, long, help = "Log every command and request")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let workflow_args = BumpWorkflowArgs {
        repository: args.repository,
        token: args.token,
        workdir: args.workdir,
    };

    match run_bump_workflow(&workflow_args, &config) {
        Ok(outcome) => {
            ui::display_outcome(&outcome);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

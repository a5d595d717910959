//! setlist: writes an AWS CLI config file with an SSO profile for every
//! account and permission set in an AWS Organization.

mod cli;
mod commands;

use anyhow::Result;
use cli::{Cli, Command};
use log::{debug, warn};
use std::process::ExitCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Overall deadline for AWS calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::try_parse_args(std::env::args_os()).unwrap_or_else(|e| e.exit());

    init_logging(cli.global.verbose);

    let command = cli.command.unwrap_or(Command::Generate(cli.generate));

    let cancel = CancellationToken::new();
    let deadline = tokio::spawn(cancel_on_deadline_or_interrupt(cancel.clone()));

    let result = match command {
        Command::Generate(args) => commands::generate(&cli.global, args, &cancel).await,
        Command::Accounts(filters) => commands::accounts(&cli.global, filters, &cancel).await,
        Command::PermissionSets => commands::permission_sets(&cli.global, &cancel).await,
        Command::Permissions => {
            commands::print_permissions();
            Ok(())
        }
    };

    deadline.abort();
    result
}

async fn cancel_on_deadline_or_interrupt(cancel: CancellationToken) {
    tokio::select! {
        () = tokio::time::sleep(DEFAULT_TIMEOUT) => {
            warn!("Timed out after {} seconds", DEFAULT_TIMEOUT.as_secs());
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted");
        }
    }
    cancel.cancel();
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "info" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    debug!("Verbose logging enabled");
}

//! Terminal front end for the users API: a list view, a detail view, and
//! create/update/delete commands.

mod actions;
mod commands;
mod notify;
mod telemetry;
mod view;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use users_core::UsersApi;

use crate::actions::{Action, Outcome};
use crate::commands::Cli;
use crate::notify::StderrNotifier;

/// Parse arguments, install telemetry, and build the action to run.
fn start() -> Result<(Action, UsersApi)> {
    let cli = Cli::parse();
    telemetry::init(cli.verbose)?;
    debug!(base_url = %cli.base_url, "configured");

    let action = Action::from_command(cli.command)?;
    Ok((action, UsersApi::new(&cli.base_url)))
}

fn main() -> Result<ExitCode> {
    let (action, api) = start()?;

    let stdout = std::io::stdout();
    let outcome = action.execute(&api, &mut stdout.lock(), &StderrNotifier)?;

    Ok(match outcome {
        Outcome::Done => ExitCode::SUCCESS,
        Outcome::Failed => ExitCode::FAILURE,
    })
}

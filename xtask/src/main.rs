#![warn(rust_2018_idioms, unused_lifetimes)]
#![allow(
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::disallowed_methods,
    clippy::disallowed_types
)]

pub mod handlers;
pub mod models;
pub mod services;

use crate::handlers::toggles;
use crate::models::args::{AppCommands, Cli, ToggleAction};
use crate::services::utils::{init_logger, load_settings};

use anyhow::Result;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_settings(cli.config.as_deref())?;
    let _logger = init_logger(&config, cli.verbose)?;

    match cli.command {
        AppCommands::Toggles { action, catalogue } => {
            let paths = toggles::TogglePaths::resolve(&config, catalogue.as_deref());
            match action {
                ToggleAction::Generate {} => toggles::generate(&config, &paths).await?,
                ToggleAction::Check {} => toggles::check(&config, &paths).await?,
                ToggleAction::Validate {} => toggles::validate(&config, &paths).await?,
            }
        },
    }

    Ok(())
}

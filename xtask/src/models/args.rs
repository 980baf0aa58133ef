//! # CLI Argument Definitions
//!
//! This module defines the command-line interface (CLI) structure using the `clap` crate.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "cargo xtask")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Developer toolkit for the ToggleHub workspace")]
pub struct Cli {
    /// Config file (defaults to `toggles.toml` at the workspace root, if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The main subcommand to execute.
    #[command(subcommand)]
    pub command: AppCommands,
}

/// Enumeration of available application subcommands.
#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// Feature toggle catalogue tooling
    Toggles {
        /// Catalogue source, overriding `catalogue.path` from the config
        #[arg(long, global = true)]
        catalogue: Option<PathBuf>,

        #[command(subcommand)]
        action: ToggleAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ToggleAction {
    /// Validate the catalogue and regenerate the checked-in artifacts
    Generate {},
    /// Fail if the checked-in artifacts differ from what the catalogue generates
    Check {},
    /// Validate the catalogue without touching any file
    Validate {},
}

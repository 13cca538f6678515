//! Command-line interface definition and parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the intake server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(short, long, env = "APP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// What to do (defaults to `serve`).
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// The operations the binary can perform.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Serve the form API
    Serve,

    /// Append a test row and, if configured, send a test email
    TestSetup,

    /// Print the rows of a sheet as JSON
    Dump {
        /// The sheet to print (defaults to the configured sheet)
        #[arg(short, long)]
        sheet: Option<String>,
    },
}

impl Cli {
    /// Parse command-line arguments.
    pub fn import() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// The requested command, `serve` if none was given.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

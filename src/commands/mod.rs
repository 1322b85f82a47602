//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - An `Execute` impl producing a serializable result
//! - An `Outputable` impl for the human-readable rendering

mod run;
mod setup;

pub use run::RunCmd;
pub use setup::SetupCmd;

use clap::Subcommand;
use std::error::Error;

use crate::orm::SchoolContext;
use crate::output::{OutputFormat, Outputable};

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, ctx: &SchoolContext) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the demo workflow (default)
    Run(RunCmd),

    /// Create the database schema without running the demo
    Setup(SetupCmd),
}

impl Default for Command {
    fn default() -> Self {
        Command::Run(RunCmd::default())
    }
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, ctx: &SchoolContext, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Run(cmd) => Ok(cmd.execute(ctx)?.format(format)),
            Command::Setup(cmd) => Ok(cmd.execute(ctx)?.format(format)),
        }
    }
}

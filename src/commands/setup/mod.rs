mod execute;
mod output;

pub use execute::{RelationState, SetupRelation, SetupResult};

use clap::Args;

/// Create database schema without running the demo
#[derive(Args, Debug, Default)]
#[command(after_help = "\
Examples:
  school_orm setup                         # Create schema in ./school.sqlite
  school_orm --db ./other.sqlite setup     # Create schema elsewhere
  school_orm setup --dry-run               # Show what would be created")]
pub struct SetupCmd {
    /// Show what would be created without doing it
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

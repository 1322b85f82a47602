//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared types.
//! Individual command definitions are in the `commands` module.

use clap::Parser;

use crate::commands::Command;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Database location: a file path, `sqlite://<path>`, `:memory:`, or a
    /// `Server=...;Database=...` connection string.
    /// Falls back to .school_orm.json, then DATABASE_URL, then ./school.sqlite
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Defaults to `run`
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_no_arguments_runs_demo() {
        let args = Args::try_parse_from(["school_orm"]).unwrap();
        assert!(args.db.is_none());
        assert_eq!(args.format, OutputFormat::Table);
        assert!(matches!(args.command.unwrap_or_default(), Command::Run(_)));
    }

    #[rstest]
    #[case(&["school_orm", "--db", ":memory:", "setup"])]
    #[case(&["school_orm", "setup", "--db", ":memory:"])]
    fn test_db_is_global(#[case] argv: &[&str]) {
        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.db.as_deref(), Some(":memory:"));
        assert!(matches!(args.command, Some(Command::Setup(_))));
    }

    #[rstest]
    #[case("table", OutputFormat::Table)]
    #[case("json", OutputFormat::Json)]
    #[case("toon", OutputFormat::Toon)]
    fn test_format_values(#[case] value: &str, #[case] expected: OutputFormat) {
        let args = Args::try_parse_from(["school_orm", "--format", value, "run"]).unwrap();
        assert_eq!(args.format, expected);
    }

    #[rstest]
    fn test_setup_dry_run_flag() {
        let args = Args::try_parse_from(["school_orm", "setup", "--dry-run"]).unwrap();
        match args.command {
            Some(Command::Setup(cmd)) => assert!(cmd.dry_run),
            other => panic!("Expected Setup command, got {:?}", other),
        }
    }

    #[rstest]
    fn test_unknown_format_rejected() {
        assert!(Args::try_parse_from(["school_orm", "--format", "xml"]).is_err());
    }
}

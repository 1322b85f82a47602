use std::error::Error;

use clap::Args;

use crate::commands::Execute;
use crate::demo::{DemoReport, run_demo};
use crate::orm::SchoolContext;

/// Run the demo workflow against the configured database
#[derive(Args, Debug, Default)]
#[command(after_help = "\
Examples:
  school_orm run                      # Seed if empty, then run every step
  school_orm --db :memory: run        # Run against a throwaway database
  school_orm --format json run        # Machine-readable report")]
pub struct RunCmd {}

impl Execute for RunCmd {
    type Output = DemoReport;

    fn execute(self, ctx: &SchoolContext) -> Result<Self::Output, Box<dyn Error>> {
        Ok(run_demo(ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_run_creates_schema_itself() {
        let ctx = SchoolContext::in_memory().unwrap();
        let report = RunCmd::default().execute(&ctx).unwrap();
        assert!(report.seeded);
        assert_eq!(report.courses_per_topic.len(), 2);
    }
}

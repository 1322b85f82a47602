//! Output formatting for setup command results.

use super::{RelationState, SetupResult};
use crate::output::Outputable;

impl Outputable for SetupResult {
    fn to_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Database Setup ({})\n\n", self.backend));

        if self.dry_run {
            output.push_str("Schema creation (dry-run):\n");
        } else {
            output.push_str("Schema creation:\n");
        }

        for relation in &self.relations {
            let (symbol, status_text) = match relation.status {
                RelationState::Created => ("✓", "created"),
                RelationState::AlreadyExists => ("✓", "exists"),
                RelationState::WouldCreate => ("→", "would create"),
            };
            output.push_str(&format!("  {} {} ({})\n", symbol, relation.name, status_text));
        }

        if self.dry_run {
            output.push_str("\nNo changes made (dry-run mode).");
        } else if self.created_new {
            output.push_str("\nDatabase ready.");
        } else {
            output.push_str("\nDatabase already configured.");
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::setup::SetupRelation;
    use crate::output::OutputFormat;
    use rstest::rstest;

    fn result(status: RelationState, dry_run: bool) -> SetupResult {
        SetupResult {
            backend: "CozoMem",
            relations: vec![SetupRelation { name: "students", status }],
            created_new: status == RelationState::Created,
            dry_run,
        }
    }

    #[rstest]
    #[case(RelationState::Created, false, "  ✓ students (created)", "Database ready.")]
    #[case(RelationState::AlreadyExists, false, "  ✓ students (exists)", "Database already configured.")]
    #[case(RelationState::WouldCreate, true, "  → students (would create)", "No changes made (dry-run mode).")]
    fn test_table(
        #[case] status: RelationState,
        #[case] dry_run: bool,
        #[case] line: &str,
        #[case] footer: &str,
    ) {
        let table = result(status, dry_run).to_table();
        assert!(table.starts_with("Database Setup (CozoMem)"));
        assert!(table.contains(line));
        assert!(table.ends_with(footer));
    }

    #[rstest]
    fn test_json_uses_status_names() {
        let json = result(RelationState::AlreadyExists, false).format(OutputFormat::Json);
        assert!(json.contains("\"status\": \"exists\""));
    }
}

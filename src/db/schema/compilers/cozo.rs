//! Cozo Datalog compiler.
//!
//! Generates Cozo DDL (`:create relation { ... }`) and the row statements the
//! mapping layer needs (`:put`, `:rm`, scans and keyed lookups) from the
//! schema definitions. Output is deterministic so it can be asserted in tests.
//!
//! Row data never appears in script text: `:put` and `:rm` read their rows
//! from a bound parameter, so stored text comes back byte for byte.

use cozo::DataValue;

use crate::db::schema::definition::SchemaRelation;

/// Compiler for generating Cozo scripts from schema definitions.
pub struct CozoCompiler;

impl CozoCompiler {
    /// Generate Cozo DDL for a single relation.
    ///
    /// Produces output in the format:
    /// ```cozo
    /// :create relation_name {
    ///     key_field1: Type1,
    ///     key_field2: Type2
    ///     =>
    ///     value_field1: Type1,
    ///     value_field2: Type2?
    /// }
    /// ```
    pub fn compile_relation(relation: &SchemaRelation) -> String {
        let columns = |fields: &[crate::db::schema::SchemaField]| {
            fields
                .iter()
                .map(|f| format!("    {}: {}", f.name, f.cozo_column_type()))
                .collect::<Vec<_>>()
                .join(",\n")
        };

        format!(
            ":create {} {{\n{}\n    =>\n{}\n}}",
            relation.name,
            columns(relation.key_fields),
            columns(relation.value_fields)
        )
    }

    /// Generate Cozo :put statement reading full rows from `$<param>`.
    ///
    /// ```cozo
    /// ?[id, name] <- $rows
    /// :put topics { id => name }
    /// ```
    ///
    /// `:put` overwrites rows with the same key; callers decide beforehand
    /// whether that is an insert or an update.
    pub fn compile_put(relation: &SchemaRelation, param: &str) -> String {
        let value_columns = relation
            .value_fields
            .iter()
            .map(|f| f.name)
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "?[{}] <- ${}\n:put {} {{ {} => {} }}",
            relation.column_names().join(", "),
            param,
            relation.name,
            relation.key_names().join(", "),
            value_columns,
        )
    }

    /// Generate Cozo :rm statement reading keys from `$<param>`.
    ///
    /// ```cozo
    /// ?[student_id, course_id] <- $keys
    /// :rm enrollments { student_id, course_id }
    /// ```
    pub fn compile_rm(relation: &SchemaRelation, param: &str) -> String {
        let key_columns = relation.key_names().join(", ");
        format!(
            "?[{}] <- ${}\n:rm {} {{ {} }}",
            key_columns, param, relation.name, key_columns,
        )
    }

    /// Chain statements into one script. Cozo runs chained blocks in a
    /// single transaction, so either all of them apply or none do.
    pub fn compile_chained(statements: &[String]) -> String {
        statements
            .iter()
            .map(|statement| format!("{{\n{}\n}}", statement))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Pack rows into the list value bound to a `<- $param` rule.
    pub fn rows_param(rows: Vec<Vec<DataValue>>) -> DataValue {
        DataValue::List(rows.into_iter().map(DataValue::List).collect())
    }

    /// Generate a full scan returning every column, ordered by key.
    pub fn compile_scan(relation: &SchemaRelation) -> String {
        let columns = relation.column_names().join(", ");
        format!(
            "?[{}] := *{}{{{}}}\n:order {}",
            columns,
            relation.name,
            columns,
            relation.key_names().join(", "),
        )
    }

    /// Generate a lookup by full key. Key values bind to `$<key column>`.
    pub fn compile_lookup(relation: &SchemaRelation) -> String {
        let columns = relation.column_names().join(", ");
        let conditions = relation
            .key_names()
            .iter()
            .map(|k| format!("{} == ${}", k, k))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "?[{}] := *{}{{{}}}, {}",
            columns, relation.name, columns, conditions
        )
    }

    /// Generate a query for the keys of rows whose `column` equals `$value`.
    pub fn compile_find_by_column(relation: &SchemaRelation, column: &str) -> String {
        let keys = relation.key_names();
        let mut bound = keys.clone();
        if !bound.contains(&column) {
            bound.push(column);
        }
        format!(
            "?[{}] := *{}{{{}}}, {} == $value\n:order {}",
            keys.join(", "),
            relation.name,
            bound.join(", "),
            column,
            keys.join(", "),
        )
    }
}

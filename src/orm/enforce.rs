//! Relationship enforcement over the foreign key table.

use std::collections::BTreeSet;

use cozo::{DataValue, Num};

use super::OrmError;
use crate::db::schema::{
    CozoCompiler, DeleteRule, ForeignKey, SchemaRelation, foreign_keys_of, references_to,
};
use crate::db::{DatabaseBackend, DbError, Params, expect_i64, run_query};
use crate::model::FieldValue;

/// Bind key values to `$<key column>` parameters for a keyed lookup.
pub(crate) fn key_params(relation: &SchemaRelation, ids: &[i64]) -> Params {
    relation
        .key_names()
        .into_iter()
        .zip(ids)
        .map(|(name, id)| (name.to_string(), DataValue::Num(Num::Int(*id))))
        .collect()
}

pub(crate) fn row_exists(
    db: &dyn DatabaseBackend,
    relation: &SchemaRelation,
    ids: &[i64],
) -> Result<bool, DbError> {
    let script = CozoCompiler::compile_lookup(relation);
    let result = run_query(db, &script, key_params(relation, ids))?;
    Ok(!result.is_empty())
}

/// Every non-null foreign key column of the record must reference an
/// existing parent row.
pub(crate) fn check_references(
    db: &dyn DatabaseBackend,
    relation: &'static SchemaRelation,
    values: &[FieldValue],
) -> Result<(), OrmError> {
    for fk in foreign_keys_of(relation.name) {
        let Some(value) = relation.column_index(fk.column).and_then(|idx| values.get(idx)) else {
            continue;
        };
        let Some(parent_id) = value.as_i64() else {
            continue;
        };

        if !row_exists(db, fk.parent, &[parent_id])? {
            return Err(OrmError::ForeignKeyViolation {
                constraint: fk.name,
                message: format!(
                    "{}.{} = {} references a missing {} row",
                    relation.name, fk.column, parent_id, fk.parent.name
                ),
            });
        }
    }
    Ok(())
}

/// One row scheduled for removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlannedDelete {
    pub relation: &'static SchemaRelation,
    pub ids: Vec<i64>,
}

/// Keys of `fk.child` rows whose foreign key column equals `parent_id`.
fn referencing_rows(
    db: &dyn DatabaseBackend,
    fk: &ForeignKey,
    parent_id: i64,
) -> Result<Vec<Vec<i64>>, DbError> {
    let script = CozoCompiler::compile_find_by_column(fk.child, fk.column);
    let params = Params::from([("value".to_string(), DataValue::Num(Num::Int(parent_id)))]);
    let result = run_query(db, &script, params)?;

    let key_names = fk.child.key_names();
    result
        .rows
        .iter()
        .map(|row| {
            key_names
                .iter()
                .zip(row)
                .map(|(name, cell)| expect_i64(cell, name))
                .collect()
        })
        .collect()
}

/// Build the full delete plan for one row, children first.
///
/// Cascade rules are followed transitively. A row in the plan that is still
/// referenced through a no-action rule by a row outside the plan rejects the
/// whole delete.
pub(crate) fn plan_delete(
    db: &dyn DatabaseBackend,
    relation: &'static SchemaRelation,
    ids: Vec<i64>,
) -> Result<Vec<PlannedDelete>, OrmError> {
    let mut visited: BTreeSet<(&'static str, Vec<i64>)> = BTreeSet::new();
    let mut plan = Vec::new();
    let mut blockers = Vec::new();
    let mut queue = vec![PlannedDelete { relation, ids }];

    while let Some(row) = queue.pop() {
        if !visited.insert((row.relation.name, row.ids.clone())) {
            continue;
        }

        // Only identity relations are referenced, always by their id
        if let (true, Some(&id)) = (row.relation.identity, row.ids.first()) {
            for fk in references_to(row.relation.name) {
                for child_ids in referencing_rows(db, fk, id)? {
                    let child = PlannedDelete {
                        relation: fk.child,
                        ids: child_ids,
                    };
                    match fk.on_delete {
                        DeleteRule::Cascade => queue.push(child),
                        DeleteRule::NoAction => blockers.push((fk, child, id)),
                    }
                }
            }
        }
        plan.push(row);
    }

    for (fk, child, parent_id) in blockers {
        if !visited.contains(&(child.relation.name, child.ids.clone())) {
            return Err(OrmError::ForeignKeyViolation {
                constraint: fk.name,
                message: format!(
                    "{} row {} is still referenced by {} row {:?}",
                    fk.parent.name, parent_id, child.relation.name, child.ids
                ),
            });
        }
    }

    plan.reverse();
    Ok(plan)
}

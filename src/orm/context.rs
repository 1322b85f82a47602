//! The CRUD surface: one context per open database.

use cozo::{DataValue, Num};
use serde::Serialize;

use super::enforce::{PlannedDelete, check_references, key_params, plan_delete, row_exists};
use super::query::Query;
use super::validate::validate_record;
use super::OrmError;
use crate::db::schema::{ALL_RELATIONS, CozoCompiler, SEQUENCES, SchemaRelation};
use crate::db::{DatabaseBackend, DatabaseConfig, Params, open_mem_db, run_query, run_query_no_params};
use crate::model::{Entity, FieldValue, RecordKey, RowReader, encode_row};

/// Whether `ensure_schema` created a relation or found it in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationStatus {
    pub name: &'static str,
    pub created: bool,
}

/// Owns the storage connection for its lifetime.
///
/// Dropping the context releases the engine, so scoping the value is enough to
/// guarantee the connection is closed on every exit path.
pub struct SchoolContext {
    backend: Box<dyn DatabaseBackend>,
}

impl SchoolContext {
    pub fn new(backend: Box<dyn DatabaseBackend>) -> Self {
        Self { backend }
    }

    pub fn connect(config: &DatabaseConfig) -> Result<Self, OrmError> {
        Ok(Self::new(config.connect()?))
    }

    /// Fresh in-memory database, schema not yet created.
    pub fn in_memory() -> Result<Self, OrmError> {
        Ok(Self::new(open_mem_db()?))
    }

    pub fn backend(&self) -> &dyn DatabaseBackend {
        self.backend.as_ref()
    }

    /// Create every relation that doesn't exist yet.
    pub fn ensure_schema(&self) -> Result<Vec<RelationStatus>, OrmError> {
        ALL_RELATIONS
            .iter()
            .map(|relation| {
                let script = CozoCompiler::compile_relation(relation);
                let created = self.backend.try_create_relation(relation.name, &script)?;
                Ok(RelationStatus {
                    name: relation.name,
                    created,
                })
            })
            .collect()
    }

    /// Insert a new record and return its key.
    ///
    /// For identity relations an id of `0` asks for the next identity, which is
    /// written back into `record`. Any other id is used as given.
    pub fn insert<E: Entity>(&self, record: &mut E) -> Result<E::Key, OrmError> {
        let relation = E::RELATION;
        let mut values = validate_record(relation, record.values())?;
        check_references(self.backend(), relation, &values)?;

        if relation.identity {
            let requested = values.first().and_then(FieldValue::as_i64).unwrap_or(0);
            if requested < 0 {
                return Err(identity_error(relation, format!("{} is not a positive id", requested)));
            }
            let id = if requested == 0 {
                self.next_identity(relation)?
            } else {
                if row_exists(self.backend(), relation, &[requested])? {
                    return Err(OrmError::DuplicateKey {
                        relation: relation.name,
                        key: requested.to_string(),
                    });
                }
                if requested > self.last_identity(relation)? {
                    self.store_identity(relation, requested)?;
                }
                requested
            };
            if let Some(first) = values.first_mut() {
                *first = FieldValue::Int(id);
            }
            self.put(relation, &values)?;
            record.set_identity(id);
        } else {
            let key = record.key();
            if row_exists(self.backend(), relation, &key.ids())? {
                return Err(OrmError::DuplicateKey {
                    relation: relation.name,
                    key: key.to_string(),
                });
            }
            self.put(relation, &values)?;
        }

        Ok(record.key())
    }

    pub fn get<E: Entity>(&self, key: E::Key) -> Result<Option<E>, OrmError> {
        let script = CozoCompiler::compile_lookup(E::RELATION);
        let result = run_query(self.backend(), &script, key_params(E::RELATION, &key.ids()))?;
        Ok(result.rows.first().map(|row| E::from_row(row)).transpose()?)
    }

    /// All records of a kind in key order.
    pub fn get_all<E: Entity>(&self) -> Result<Vec<E>, OrmError> {
        let script = CozoCompiler::compile_scan(E::RELATION);
        let result = run_query_no_params(self.backend(), &script)?;
        Ok(result
            .rows
            .iter()
            .map(|row| E::from_row(row))
            .collect::<Result<_, _>>()?)
    }

    pub fn get_first<E: Entity>(&self) -> Result<Option<E>, OrmError> {
        Ok(self.get_all()?.into_iter().next())
    }

    pub fn get_first_where<E: Entity>(
        &self,
        predicate: impl Fn(&E) -> bool,
    ) -> Result<Option<E>, OrmError> {
        Ok(self.get_all()?.into_iter().find(|record| predicate(record)))
    }

    /// Snapshot of a relation for composing filters, joins and groupings.
    pub fn query<E: Entity>(&self) -> Result<Query<E>, OrmError> {
        Ok(Query::from_rows(self.get_all()?))
    }

    pub fn count<E: Entity>(&self) -> Result<usize, OrmError> {
        let script = CozoCompiler::compile_scan(E::RELATION);
        Ok(run_query_no_params(self.backend(), &script)?.len())
    }

    /// Overwrite an existing record with all of its fields.
    pub fn update<E: Entity>(&self, record: &E) -> Result<(), OrmError> {
        let relation = E::RELATION;
        let values = validate_record(relation, record.values())?;

        let key = record.key();
        if !row_exists(self.backend(), relation, &key.ids())? {
            return Err(OrmError::NotFound {
                relation: relation.name,
                key: key.to_string(),
            });
        }

        check_references(self.backend(), relation, &values)?;
        self.put(relation, &values)
    }

    /// Delete a record and everything that cascades from it.
    ///
    /// Returns the number of rows removed.
    pub fn delete<E: Entity>(&self, record: &E) -> Result<usize, OrmError> {
        self.delete_by_key::<E>(record.key())
    }

    pub fn delete_by_key<E: Entity>(&self, key: E::Key) -> Result<usize, OrmError> {
        let relation = E::RELATION;
        if !row_exists(self.backend(), relation, &key.ids())? {
            return Err(OrmError::NotFound {
                relation: relation.name,
                key: key.to_string(),
            });
        }

        let plan = plan_delete(self.backend(), relation, key.ids())?;
        self.remove(&plan)?;
        Ok(plan.len())
    }

    fn put(&self, relation: &SchemaRelation, values: &[FieldValue]) -> Result<(), OrmError> {
        let row = encode_row(relation, values)?;
        let script = CozoCompiler::compile_put(relation, "rows");
        let params = Params::from([("rows".to_string(), CozoCompiler::rows_param(vec![row]))]);
        run_query(self.backend(), &script, params)?;
        Ok(())
    }

    /// Remove every planned row in one transaction, one `:rm` per relation run.
    fn remove(&self, plan: &[PlannedDelete]) -> Result<(), OrmError> {
        let mut statements = Vec::new();
        let mut params = Params::new();
        for (i, batch) in plan
            .chunk_by(|a, b| a.relation.name == b.relation.name)
            .enumerate()
        {
            let Some(relation) = batch.first().map(|row| row.relation) else {
                continue;
            };
            let param = format!("keys_{}", i);
            let keys: Vec<Vec<DataValue>> = batch
                .iter()
                .map(|row| row.ids.iter().map(|id| DataValue::Num(Num::Int(*id))).collect())
                .collect();
            statements.push(CozoCompiler::compile_rm(relation, &param));
            params.insert(param, CozoCompiler::rows_param(keys));
        }
        if statements.is_empty() {
            return Ok(());
        }
        run_query(self.backend(), &CozoCompiler::compile_chained(&statements), params)?;
        Ok(())
    }

    fn last_identity(&self, relation: &SchemaRelation) -> Result<i64, OrmError> {
        let script = CozoCompiler::compile_lookup(&SEQUENCES);
        let params = Params::from([("relation".to_string(), DataValue::Str(relation.name.into()))]);
        let result = run_query(self.backend(), &script, params)?;
        match result.rows.first() {
            Some(row) => Ok(RowReader::new(&SEQUENCES, row)?.int("last_id")?),
            None => Ok(0),
        }
    }

    fn store_identity(&self, relation: &SchemaRelation, last_id: i64) -> Result<(), OrmError> {
        self.put(&SEQUENCES, &[relation.name.into(), last_id.into()])
    }

    /// Identities only move forward, so ids of deleted rows are never reused.
    fn next_identity(&self, relation: &SchemaRelation) -> Result<i64, OrmError> {
        let next = self
            .last_identity(relation)?
            .checked_add(1)
            .ok_or_else(|| identity_error(relation, "identity values exhausted".to_string()))?;
        self.store_identity(relation, next)?;
        Ok(next)
    }
}

fn identity_error(relation: &SchemaRelation, message: String) -> OrmError {
    OrmError::Validation {
        relation: relation.name,
        field: relation.key_fields.first().map_or("id", |f| f.name),
        message,
    }
}

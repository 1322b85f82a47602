//! Query execution utilities.

use super::{DatabaseBackend, DbError, Params, QueryResult};

/// Run a script with parameters against any backend.
pub fn run_query<B: DatabaseBackend + ?Sized>(
    db: &B,
    script: &str,
    params: Params,
) -> Result<QueryResult, DbError> {
    db.execute_query(script, &params)
}

/// Run a script with no parameters
pub fn run_query_no_params<B: DatabaseBackend + ?Sized>(
    db: &B,
    script: &str,
) -> Result<QueryResult, DbError> {
    run_query(db, script, Params::new())
}

/// Try to create a relation, returning Ok(true) if created, Ok(false) if already exists
pub fn try_create_relation<B: DatabaseBackend + ?Sized>(
    db: &B,
    script: &str,
) -> Result<bool, DbError> {
    match run_query_no_params(db, script) {
        Ok(_) => Ok(true),
        Err(e) => {
            let err_str = e.to_string();
            if err_str.contains("AlreadyExists") || err_str.contains("stored_relation_conflict") {
                Ok(false)
            } else {
                Err(e)
            }
        }
    }
}

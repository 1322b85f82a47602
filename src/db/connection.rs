//! Database connection management.

use std::path::Path;

use cozo::{DbInstance, ScriptMutability};

use super::extraction::extract_string;
use super::{DatabaseBackend, DbError, Params, QueryResult};

/// CozoDB engine wrapper implementing `DatabaseBackend`.
///
/// Dropping the backend closes the engine, so the owner of the value decides
/// the connection's lifetime.
pub struct CozoBackend {
    inner: DbInstance,
    name: &'static str,
}

impl CozoBackend {
    /// Opens a SQLite-backed CozoDB database at the given path.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let inner = DbInstance::new("sqlite", path, "").map_err(|e| DbError::OpenFailed {
            path: path.display().to_string(),
            message: format!("{:?}", e),
        })?;
        Ok(Self {
            inner,
            name: "CozoSqlite",
        })
    }

    /// Opens an in-memory CozoDB database.
    pub fn open_mem() -> Result<Self, DbError> {
        let inner = DbInstance::new("mem", "", "").map_err(|e| DbError::OpenFailed {
            path: ":memory:".to_string(),
            message: format!("{:?}", e),
        })?;
        Ok(Self {
            inner,
            name: "CozoMem",
        })
    }
}

impl DatabaseBackend for CozoBackend {
    fn execute_query(&self, script: &str, params: &Params) -> Result<QueryResult, DbError> {
        let rows = self
            .inner
            .run_script(script, params.clone(), ScriptMutability::Mutable)
            .map_err(|e| DbError::QueryFailed {
                message: format!("{:?}", e),
            })?;

        Ok(QueryResult {
            headers: rows.headers,
            rows: rows.rows,
        })
    }

    fn backend_name(&self) -> &'static str {
        self.name
    }

    fn relation_exists(&self, name: &str) -> Result<bool, DbError> {
        let result = self.execute_query_no_params("::relations")?;
        Ok(result
            .rows
            .iter()
            .filter_map(|row| row.first().and_then(extract_string))
            .any(|relation| relation == name))
    }
}

/// Open a CozoDB database backed by SQLite storage.
pub fn open_db(path: &Path) -> Result<Box<dyn DatabaseBackend>, DbError> {
    Ok(Box::new(CozoBackend::open(path)?))
}

/// Create an in-memory database instance.
///
/// Used for tests and `:memory:` configurations to avoid disk I/O.
pub fn open_mem_db() -> Result<Box<dyn DatabaseBackend>, DbError> {
    Ok(Box::new(CozoBackend::open_mem()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::tempdir;

    #[rstest]
    fn test_open_mem() {
        let db = CozoBackend::open_mem().expect("in-memory engine should open");
        assert_eq!(db.backend_name(), "CozoMem");
    }

    #[rstest]
    fn test_open_sqlite_file() {
        let dir = tempdir().unwrap();
        let db = CozoBackend::open(&dir.path().join("school.sqlite")).unwrap();
        assert_eq!(db.backend_name(), "CozoSqlite");
    }

    #[rstest]
    fn test_relation_exists_after_create() {
        let db = CozoBackend::open_mem().unwrap();
        assert!(!db.relation_exists("topics").unwrap());

        db.execute_query_no_params(":create topics { id: Int => name: String }")
            .unwrap();

        assert!(db.relation_exists("topics").unwrap());
    }

    #[rstest]
    fn test_try_create_relation_is_idempotent() {
        let db = CozoBackend::open_mem().unwrap();
        let script = ":create topics { id: Int => name: String }";

        assert!(db.try_create_relation("topics", script).unwrap());
        assert!(!db.try_create_relation("topics", script).unwrap());
    }

    #[rstest]
    fn test_malformed_script_is_query_failure() {
        let db = CozoBackend::open_mem().unwrap();
        let err = db.execute_query_no_params("?[x] := not valid").unwrap_err();
        assert!(matches!(err, DbError::QueryFailed { .. }));
    }
}

//! Database backend trait for abstracting the storage engine.
//!
//! The mapping layer only talks to storage through `DatabaseBackend`, so tests
//! can swap the SQLite-backed engine for an in-memory one without touching the
//! CRUD or query code.

use std::collections::BTreeMap;

use cozo::DataValue;

use super::DbError;

/// Type alias for query parameters.
pub type Params = BTreeMap<String, DataValue>;

/// Result of a query execution.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<DataValue>>,
}

impl QueryResult {
    /// Number of rows returned.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Trait for database backends that can execute queries.
pub trait DatabaseBackend: Send + Sync {
    /// Execute a script with parameters, returning raw rows.
    fn execute_query(&self, script: &str, params: &Params) -> Result<QueryResult, DbError>;

    /// Execute a script without parameters.
    fn execute_query_no_params(&self, script: &str) -> Result<QueryResult, DbError> {
        self.execute_query(script, &Params::new())
    }

    /// Get the backend name for reporting.
    fn backend_name(&self) -> &'static str;

    /// Check if a stored relation exists.
    fn relation_exists(&self, name: &str) -> Result<bool, DbError>;

    /// Create a relation if it doesn't exist.
    /// Returns true if created, false if already existed.
    fn try_create_relation(&self, name: &str, script: &str) -> Result<bool, DbError> {
        if self.relation_exists(name)? {
            return Ok(false);
        }
        super::query::try_create_relation(self, script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cozo::Num;

    #[test]
    fn test_query_result_creation() {
        let result = QueryResult {
            headers: vec!["id".to_string(), "name".to_string()],
            rows: vec![vec![DataValue::Num(Num::Int(1)), DataValue::Str("CS".into())]],
        };

        assert_eq!(result.headers.len(), 2);
        assert_eq!(result.len(), 1);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_trait_is_object_safe() {
        fn accepts_backend(_db: &dyn DatabaseBackend) {}
        let _ = accepts_backend;
    }
}

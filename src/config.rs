//! Configuration file handling for database connections.
//!
//! This module provides loading and parsing of `.school_orm.json` configuration
//! files. The database section uses a type-tagged JSON format.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::DatabaseConfig;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".school_orm.json";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    InvalidJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid connection string: {message}")]
    InvalidConnectionString { message: String },

    #[error(
        "Server '{server}' is not supported: only local servers ('.', 'localhost', '(local)') \
         map to the embedded engine"
    )]
    UnsupportedServer { server: String },
}

/// Top-level configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Database configuration
    pub database: DatabaseConfigFile,
}

/// Database configuration variants.
///
/// JSON format uses a "type" field with snake_case variant names:
///
/// ```json
/// { "database": { "type": "sqlite", "path": "./school.sqlite" } }
/// { "database": { "type": "memory" } }
/// { "database": { "type": "connection_string",
///                 "value": "Server=.;Database=ITIDb;Trusted_Connection=True" } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DatabaseConfigFile {
    /// SQLite-backed engine at a file path
    Sqlite { path: PathBuf },
    /// In-memory engine for testing
    #[serde(rename = "memory")]
    Mem,
    /// Relational connection string
    ConnectionString { value: String },
}

impl ConfigFile {
    /// Load configuration from `.school_orm.json` in the current directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE_NAME))
    }

    /// Load configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the file doesn't exist, so callers can fall
    /// back to other sources; any other failure is a real error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();

        if !path.exists() {
            return Err(ConfigError::NotFound { path: display });
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::InvalidJson {
            path: display,
            source,
        })
    }
}

impl DatabaseConfigFile {
    /// Convert this configuration to a DatabaseConfig.
    pub fn to_database_config(&self) -> Result<DatabaseConfig, ConfigError> {
        match self {
            Self::Sqlite { path } => Ok(DatabaseConfig::CozoSqlite { path: path.clone() }),
            Self::Mem => Ok(DatabaseConfig::CozoMem),
            Self::ConnectionString { value } => DatabaseConfig::from_url(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_sqlite_deserialization() {
        let json = r#"
        {
            "database": {
                "type": "sqlite",
                "path": "./school.sqlite"
            }
        }
        "#;
        let config: ConfigFile = serde_json::from_str(json).unwrap();
        assert!(matches!(config.database, DatabaseConfigFile::Sqlite { .. }));
    }

    #[test]
    fn test_memory_deserialization() {
        let json = r#"{ "database": { "type": "memory" } }"#;
        let config: ConfigFile = serde_json::from_str(json).unwrap();
        assert!(matches!(config.database, DatabaseConfigFile::Mem));
    }

    #[test]
    fn test_connection_string_to_database_config() {
        let json = r#"
        {
            "database": {
                "type": "connection_string",
                "value": "Server=.;Database=ITIDb;Trusted_Connection=True;TrustServerCertificate=True"
            }
        }
        "#;
        let config: ConfigFile = serde_json::from_str(json).unwrap();
        let db = config.database.to_database_config().unwrap();
        assert_eq!(
            db,
            DatabaseConfig::CozoSqlite {
                path: PathBuf::from("ITIDb.sqlite")
            }
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"{ "database": { "type": "oracle" } }"#;
        assert!(serde_json::from_str::<ConfigFile>(json).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"database": {{"type": "sqlite", "path": "/tmp/x.sqlite"}}}}"#).unwrap();

        let config = ConfigFile::load_from(file.path()).unwrap();
        match config.database {
            DatabaseConfigFile::Sqlite { path } => assert_eq!(path, PathBuf::from("/tmp/x.sqlite")),
            other => panic!("Expected Sqlite, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConfigFile::load_from(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_round_trip_serialization() {
        let config = ConfigFile {
            database: DatabaseConfigFile::Mem,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"database":{"type":"memory"}}"#);
    }
}

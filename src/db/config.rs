//! Database configuration for runtime backend selection.
//!
//! Resolves where the school database lives from the CLI, the config file,
//! or the environment, and opens the matching backend. Connection strings in
//! `Key=Value;...` form are accepted so existing relational configurations can
//! be pointed at the embedded engine unchanged.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use super::backend::DatabaseBackend;
use super::connection::{open_db, open_mem_db};
use super::DbError;
use crate::config::{CONFIG_FILE_NAME, ConfigError, ConfigFile};

/// Default database location when nothing else is configured.
pub const DEFAULT_DB_PATH: &str = "./school.sqlite";

/// Configuration for database backend selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    /// Local CozoDB with SQLite storage.
    CozoSqlite { path: PathBuf },

    /// Local CozoDB with in-memory storage (for testing).
    CozoMem,
}

impl DatabaseConfig {
    /// Create a backend instance from this configuration.
    pub fn connect(&self) -> Result<Box<dyn DatabaseBackend>, DbError> {
        match self {
            Self::CozoSqlite { path } => open_db(path),
            Self::CozoMem => open_mem_db(),
        }
    }

    /// Parse from a connection URL, file path, or connection string.
    ///
    /// Supported formats:
    /// - `./path/to/db.sqlite` or `/absolute/path` → CozoSqlite
    /// - `sqlite:///path/to/db` → CozoSqlite
    /// - `:memory:` → CozoMem
    /// - `Server=.;Database=ITIDb;Trusted_Connection=True` → CozoSqlite at `ITIDb.sqlite`
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        let url = url.trim();

        if url.is_empty() {
            return Err(ConfigError::InvalidConnectionString {
                message: "empty database URL".to_string(),
            });
        }

        if url == ":memory:" {
            return Ok(Self::CozoMem);
        }

        if let Some(path) = url.strip_prefix("sqlite://") {
            return Ok(Self::CozoSqlite {
                path: PathBuf::from(path),
            });
        }

        if url.contains('=') {
            return url.parse::<ConnectionSettings>()?.to_database_config();
        }

        // Default: treat as file path
        Ok(Self::CozoSqlite {
            path: PathBuf::from(url),
        })
    }

    /// Resolve configuration for this process.
    ///
    /// Priority: explicit `--db` > `.school_orm.json` > `DATABASE_URL` > `./school.sqlite`
    pub fn resolve(explicit: Option<&str>) -> Result<Self, ConfigError> {
        let env_url = std::env::var("DATABASE_URL").ok();
        Self::resolve_with(explicit, Path::new(CONFIG_FILE_NAME), env_url.as_deref())
    }

    /// Resolution with every input passed in, so it can be exercised without
    /// touching the process environment.
    pub fn resolve_with(
        explicit: Option<&str>,
        config_path: &Path,
        env_url: Option<&str>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = explicit {
            return Self::from_url(url);
        }

        match ConfigFile::load_from(config_path) {
            Ok(config_file) => return config_file.database.to_database_config(),
            Err(ConfigError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        if let Some(url) = env_url {
            return Self::from_url(url);
        }

        Self::from_url(DEFAULT_DB_PATH)
    }

    /// Short human-readable description of the target.
    pub fn describe(&self) -> String {
        match self {
            Self::CozoSqlite { path } => format!("sqlite://{}", path.display()),
            Self::CozoMem => ":memory:".to_string(),
        }
    }
}

/// How the connection string authenticates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Authentication {
    /// Operating-system identity (`Trusted_Connection=True`).
    Integrated,
    /// Explicit login.
    SqlLogin { user: String, password: Option<String> },
}

/// A parsed `Key=Value;...` connection string.
///
/// Keys are case-insensitive. Unrecognized keys are kept in `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionSettings {
    pub server: String,
    pub database: String,
    pub authentication: Authentication,
    pub trust_server_certificate: bool,
    pub options: BTreeMap<String, String>,
}

const LOCAL_SERVERS: &[&str] = &[".", "localhost", "(local)", "127.0.0.1", "(localdb)"];

impl ConnectionSettings {
    /// True when the server names this machine.
    pub fn is_local(&self) -> bool {
        let host = self
            .server
            .split(['\\', ','])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let host = host.strip_prefix("tcp:").unwrap_or(&host);
        LOCAL_SERVERS.contains(&host)
    }

    /// Map a local server onto the embedded engine: one SQLite file per database.
    pub fn to_database_config(&self) -> Result<DatabaseConfig, ConfigError> {
        if !self.is_local() {
            return Err(ConfigError::UnsupportedServer {
                server: self.server.clone(),
            });
        }
        Ok(DatabaseConfig::CozoSqlite {
            path: PathBuf::from(format!("{}.sqlite", self.database)),
        })
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "sspi" => Ok(true),
        "false" | "no" => Ok(false),
        other => Err(ConfigError::InvalidConnectionString {
            message: format!("'{}' is not a boolean for '{}'", other, key),
        }),
    }
}

impl FromStr for ConnectionSettings {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: String| ConfigError::InvalidConnectionString { message };

        let mut server = None;
        let mut database = None;
        let mut trusted = false;
        let mut trust_server_certificate = false;
        let mut user = None;
        let mut password = None;
        let mut options = BTreeMap::new();

        for part in s.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let Some((key, value)) = part.split_once('=') else {
                return Err(invalid(format!("expected Key=Value, found '{}'", part)));
            };
            let value = value.trim().to_string();
            let normalized = key.trim().to_ascii_lowercase();

            match normalized.as_str() {
                "server" | "data source" | "address" | "addr" => server = Some(value),
                "database" | "initial catalog" => database = Some(value),
                "trusted_connection" | "integrated security" => {
                    trusted = parse_flag(key.trim(), &value)?
                }
                "trustservercertificate" | "trust server certificate" => {
                    trust_server_certificate = parse_flag(key.trim(), &value)?
                }
                "user id" | "uid" | "user" => user = Some(value),
                "password" | "pwd" => password = Some(value),
                _ => {
                    options.insert(key.trim().to_string(), value);
                }
            }
        }

        let server = server
            .filter(|v| !v.is_empty())
            .ok_or_else(|| invalid("missing 'Server'".to_string()))?;
        let database = database
            .filter(|v| !v.is_empty())
            .ok_or_else(|| invalid("missing 'Database'".to_string()))?;

        let authentication = match (trusted, user) {
            (true, _) => Authentication::Integrated,
            (false, Some(user)) => Authentication::SqlLogin { user, password },
            (false, None) => {
                return Err(invalid(
                    "either 'Trusted_Connection=True' or 'User Id' is required".to_string(),
                ));
            }
        };

        Ok(Self {
            server,
            database,
            authentication,
            trust_server_certificate,
            options,
        })
    }
}

impl fmt::Display for ConnectionSettings {
    /// Renders the settings with the password redacted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Server={};Database={};", self.server, self.database)?;
        match &self.authentication {
            Authentication::Integrated => write!(f, "Trusted_Connection=True;")?,
            Authentication::SqlLogin { user, password } => {
                write!(f, "User Id={};", user)?;
                if password.is_some() {
                    write!(f, "Password=***;")?;
                }
            }
        }
        write!(f, "TrustServerCertificate={}", self.trust_server_certificate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    const ITI: &str = "Server=.;Database=ITIDb;Trusted_Connection=True;TrustServerCertificate=True";

    #[rstest]
    fn test_from_url_file_path() {
        let config = DatabaseConfig::from_url("./test.sqlite").unwrap();
        assert_eq!(
            config,
            DatabaseConfig::CozoSqlite {
                path: PathBuf::from("./test.sqlite")
            }
        );
    }

    #[rstest]
    fn test_from_url_memory() {
        assert_eq!(DatabaseConfig::from_url(":memory:").unwrap(), DatabaseConfig::CozoMem);
    }

    #[rstest]
    fn test_from_url_sqlite_scheme() {
        let config = DatabaseConfig::from_url("sqlite:///tmp/test.db").unwrap();
        assert_eq!(
            config,
            DatabaseConfig::CozoSqlite {
                path: PathBuf::from("/tmp/test.db")
            }
        );
    }

    #[rstest]
    fn test_from_url_empty_rejected() {
        assert!(DatabaseConfig::from_url("  ").is_err());
    }

    #[rstest]
    fn test_from_url_connection_string() {
        let config = DatabaseConfig::from_url(ITI).unwrap();
        assert_eq!(
            config,
            DatabaseConfig::CozoSqlite {
                path: PathBuf::from("ITIDb.sqlite")
            }
        );
    }

    #[rstest]
    fn test_parse_connection_string() {
        let settings: ConnectionSettings = ITI.parse().unwrap();
        assert_eq!(settings.server, ".");
        assert_eq!(settings.database, "ITIDb");
        assert_eq!(settings.authentication, Authentication::Integrated);
        assert!(settings.trust_server_certificate);
        assert!(settings.is_local());
    }

    #[rstest]
    fn test_parse_connection_string_aliases_and_options() {
        let settings: ConnectionSettings =
            "data source=localhost\\SQLEXPRESS; initial catalog=School; user id=sa; pwd=secret; MultipleActiveResultSets=true"
                .parse()
                .unwrap();
        assert_eq!(settings.database, "School");
        assert!(settings.is_local());
        assert_eq!(
            settings.authentication,
            Authentication::SqlLogin {
                user: "sa".to_string(),
                password: Some("secret".to_string())
            }
        );
        assert!(!settings.trust_server_certificate);
        assert_eq!(
            settings.options.get("MultipleActiveResultSets").map(String::as_str),
            Some("true")
        );
    }

    #[rstest]
    #[case("Database=ITIDb;Trusted_Connection=True")]
    #[case("Server=.;Trusted_Connection=True")]
    #[case("Server=.;Database=ITIDb")]
    #[case("Server=.;Database=ITIDb;Trusted_Connection=maybe")]
    #[case("Server=.;Database")]
    fn test_invalid_connection_strings(#[case] input: &str) {
        let err = input.parse::<ConnectionSettings>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConnectionString { .. }));
    }

    #[rstest]
    fn test_remote_server_rejected() {
        let err = DatabaseConfig::from_url("Server=db.example.com,1433;Database=ITIDb;Trusted_Connection=True")
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedServer { .. }));
    }

    #[rstest]
    fn test_display_redacts_password() {
        let settings: ConnectionSettings = "Server=.;Database=X;User Id=sa;Password=hunter2"
            .parse()
            .unwrap();
        let shown = settings.to_string();
        assert!(shown.contains("Password=***"));
        assert!(!shown.contains("hunter2"));
    }

    #[rstest]
    fn test_resolve_explicit_wins() {
        let dir = tempdir().unwrap();
        let config = DatabaseConfig::resolve_with(
            Some(":memory:"),
            &dir.path().join("missing.json"),
            Some("./env.sqlite"),
        )
        .unwrap();
        assert_eq!(config, DatabaseConfig::CozoMem);
    }

    #[rstest]
    fn test_resolve_config_file_before_env() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"database": {{"type": "memory"}}}}"#).unwrap();

        let config = DatabaseConfig::resolve_with(None, file.path(), Some("./env.sqlite")).unwrap();
        assert_eq!(config, DatabaseConfig::CozoMem);
    }

    #[rstest]
    fn test_resolve_env_then_default() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");

        let from_env = DatabaseConfig::resolve_with(None, &missing, Some("./env.sqlite")).unwrap();
        assert_eq!(
            from_env,
            DatabaseConfig::CozoSqlite {
                path: PathBuf::from("./env.sqlite")
            }
        );

        let fallback = DatabaseConfig::resolve_with(None, &missing, None).unwrap();
        assert_eq!(
            fallback,
            DatabaseConfig::CozoSqlite {
                path: PathBuf::from(DEFAULT_DB_PATH)
            }
        );
    }

    #[rstest]
    fn test_resolve_invalid_config_file_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = DatabaseConfig::resolve_with(None, file.path(), None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidJson { .. }));
    }

    #[rstest]
    fn test_connect_memory() {
        let backend = DatabaseConfig::CozoMem.connect().unwrap();
        assert_eq!(backend.backend_name(), "CozoMem");
    }

    #[rstest]
    fn test_describe() {
        assert_eq!(DatabaseConfig::CozoMem.describe(), ":memory:");
        assert_eq!(
            DatabaseConfig::CozoSqlite {
                path: PathBuf::from("./school.sqlite")
            }
            .describe(),
            "sqlite://./school.sqlite"
        );
    }
}

//! Configuration handling for the MySQL MCP Server.
//!
//! Process-level settings (logging) come from CLI arguments and
//! environment variables via `clap`. Database settings are resolved from the
//! `MYSQL_*` environment variables on every adapter operation.

use crate::error::{DbError, DbResult};
use clap::Parser;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

pub const DEFAULT_MYSQL_HOST: &str = "localhost";
pub const DEFAULT_MYSQL_PORT: u16 = 3306;

pub const ENV_HOST: &str = "MYSQL_HOST";
pub const ENV_PORT: &str = "MYSQL_PORT";
pub const ENV_USER: &str = "MYSQL_USER";
pub const ENV_PASSWORD: &str = "MYSQL_PASSWORD";
pub const ENV_DATABASE: &str = "MYSQL_DATABASE";
pub const ENV_SSL_CA: &str = "MYSQL_SSL_CA";

/// Process configuration parsed from CLI arguments and environment.
///
/// The server always speaks MCP over stdio; only logging is tunable here.
#[derive(Debug, Clone, Parser)]
#[command(name = "mysql-mcp-server", version, about)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "MCP_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "MCP_JSON_LOGS")]
    pub json_logs: bool,
}

/// TLS settings, present only when a CA certificate is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SslConfig {
    pub ca_path: PathBuf,
    /// Validate the server certificate against `ca_path`.
    pub verify_cert: bool,
    /// Check the certificate identity against the configured host.
    pub verify_identity: bool,
}

impl SslConfig {
    /// CA-pinned TLS with both certificate and identity verification enabled.
    pub fn verified(ca_path: impl Into<PathBuf>) -> Self {
        Self {
            ca_path: ca_path.into(),
            verify_cert: true,
            verify_identity: true,
        }
    }
}

/// Validated database connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    /// Contains sensitive data - never log
    pub password: String,
    pub database: String,
    pub ssl: Option<SslConfig>,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("ssl", &self.ssl)
            .finish()
    }
}

impl DatabaseConfig {
    /// Non-secret description of the connection target, for logs.
    pub fn target(&self) -> String {
        format!(
            "{}:{}/{} as {}",
            self.host, self.port, self.database, self.user
        )
    }
}

/// Where database settings are read from.
///
/// Resolution happens on every operation, so a source is consulted many times
/// over the life of the process.
#[derive(Debug, Clone, Default)]
pub enum ConfigSource {
    /// Process environment variables.
    #[default]
    Environment,
    /// A fixed set of variables, keyed like the environment.
    Fixed(HashMap<String, String>),
}

impl ConfigSource {
    /// Build a fixed source from `(name, value)` pairs.
    pub fn fixed<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Fixed(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Look up a variable. Empty values count as unset.
    fn get(&self, key: &str) -> Option<String> {
        let value = match self {
            Self::Environment => std::env::var(key).ok(),
            Self::Fixed(vars) => vars.get(key).cloned(),
        };
        value.filter(|v| !v.is_empty())
    }

    /// Resolve and validate the database configuration.
    pub fn resolve(&self) -> DbResult<DatabaseConfig> {
        let host = self
            .get(ENV_HOST)
            .unwrap_or_else(|| DEFAULT_MYSQL_HOST.to_string());
        let port = match self.get(ENV_PORT) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                DbError::configuration(format!("{ENV_PORT} must be a port number, got '{raw}'"))
            })?,
            None => DEFAULT_MYSQL_PORT,
        };

        let (Some(user), Some(password), Some(database)) = (
            self.get(ENV_USER),
            self.get(ENV_PASSWORD),
            self.get(ENV_DATABASE),
        ) else {
            error!(
                "Missing required database configuration: {ENV_USER}, {ENV_PASSWORD} and {ENV_DATABASE} are required"
            );
            return Err(DbError::configuration(
                "Missing required database configuration",
            ));
        };

        let ssl = match self.get(ENV_SSL_CA) {
            Some(ca) => {
                if !Path::new(&ca).exists() {
                    error!(ca_path = %ca, "SSL CA certificate file not found");
                    return Err(DbError::configuration(format!(
                        "SSL CA certificate file not found: {ca}"
                    )));
                }
                Some(SslConfig::verified(ca))
            }
            None => None,
        };

        let config = DatabaseConfig {
            host,
            port,
            user,
            password,
            database,
            ssl,
        };

        debug!(
            target_db = %config.target(),
            ssl = config.ssl.is_some(),
            "Resolved database configuration"
        );

        Ok(config)
    }
}

//! Error types for the MySQL MCP Server.
//!
//! This module defines all error types using `thiserror` for ergonomic error handling.
//! Each variant maps onto one failure class of the adapter: configuration,
//! connection, caller input, and statement execution.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    /// Missing required setting or missing SSL CA file. Fatal, never retried.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Connection failed: {message}")]
    Connection { message: String, suggestion: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Database error: {message}")]
    Database {
        message: String,
        /// e.g., "42S02" for unknown table
        sql_state: Option<String>,
        suggestion: String,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DbError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a connection error with a helpful suggestion.
    pub fn connection(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an unknown tool error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool { name: name.into() }
    }

    /// Create a database error with optional SQL state.
    pub fn database(
        message: impl Into<String>,
        sql_state: Option<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Database {
            message: message.into(),
            sql_state,
            suggestion: suggestion.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Wrap a driver error raised while opening a session.
    ///
    /// Every failure at this stage (authentication, network, TLS negotiation)
    /// is a connection failure, whatever the driver calls it.
    pub fn connect_failed(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::connection(
                db_err.message(),
                "Check MYSQL_USER, MYSQL_PASSWORD and MYSQL_DATABASE",
            ),
            sqlx::Error::Io(io_err) => DbError::connection(
                format!("I/O error: {}", io_err),
                "Check network connectivity and MYSQL_HOST/MYSQL_PORT",
            ),
            sqlx::Error::Tls(tls_err) => DbError::connection(
                format!("TLS error: {}", tls_err),
                "Verify MYSQL_SSL_CA and that the server certificate matches MYSQL_HOST",
            ),
            sqlx::Error::Configuration(msg) => {
                DbError::connection(msg.to_string(), "Check the connection settings")
            }
            other => DbError::connection(other.to_string(), "Check database server status"),
        }
    }

    /// The underlying message, without the variant's label.
    pub fn message(&self) -> &str {
        match self {
            Self::Configuration { message }
            | Self::Connection { message, .. }
            | Self::InvalidInput { message }
            | Self::Database { message, .. }
            | Self::Internal { message } => message,
            Self::UnknownTool { name } => name,
        }
    }

    /// Get the suggestion for this error, if available.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Connection { suggestion, .. } => Some(suggestion),
            Self::Database { suggestion, .. } => Some(suggestion),
            _ => None,
        }
    }
}

/// Convert sqlx errors raised by a statement to DbError.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                DbError::database(
                    db_err.message(),
                    code,
                    "Check the SQL syntax and referenced objects",
                )
            }
            sqlx::Error::Io(io_err) => DbError::database(
                format!("I/O error: {}", io_err),
                None,
                "Check network connectivity and database server status",
            ),
            sqlx::Error::Protocol(msg) => DbError::database(
                format!("Protocol error: {}", msg),
                None,
                "Check database server compatibility",
            ),
            sqlx::Error::ColumnDecode { index, source } => DbError::database(
                format!("Failed to decode column {}: {}", index, source),
                None,
                "Cast the column to a textual type in the query",
            ),
            other => DbError::database(other.to_string(), None, "Check database server status"),
        }
    }
}

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;

/// Build suggestion data as JSON value.
fn suggestion_data(suggestion: Option<&str>) -> Option<serde_json::Value> {
    suggestion.map(|s| serde_json::json!({ "suggestion": s }))
}

/// Convert DbError to MCP ErrorData for semantic error categorization.
/// Includes the suggestion field in the `data` object when available.
impl From<DbError> for rmcp::ErrorData {
    fn from(err: DbError) -> Self {
        match &err {
            // Caller mistakes -> invalid_params
            DbError::InvalidInput { .. } | DbError::UnknownTool { .. } => {
                rmcp::ErrorData::invalid_params(err.to_string(), suggestion_data(err.suggestion()))
            }

            // Database errors -> invalid_params with sql_state in message
            DbError::Database {
                sql_state,
                suggestion,
                ..
            } => {
                let msg = match sql_state {
                    Some(code) => format!("{} (SQLSTATE: {})", err, code),
                    None => err.to_string(),
                };
                rmcp::ErrorData::invalid_params(msg, suggestion_data(Some(suggestion)))
            }

            DbError::Connection { suggestion, .. } => {
                rmcp::ErrorData::internal_error(err.to_string(), suggestion_data(Some(suggestion)))
            }

            DbError::Configuration { .. } => rmcp::ErrorData::internal_error(
                err.to_string(),
                suggestion_data(Some(
                    "Set MYSQL_USER, MYSQL_PASSWORD and MYSQL_DATABASE; MYSQL_SSL_CA must name an existing file",
                )),
            ),

            DbError::Internal { .. } => {
                rmcp::ErrorData::internal_error(err.to_string(), suggestion_data(err.suggestion()))
            }
        }
    }
}

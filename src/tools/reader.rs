//! Table resource reading.
//!
//! Resolves a `mysql://{table}/data` URI to the first rows of that table.
//! Unlike listing, every failure here is returned to the caller.

use crate::config::DatabaseConfig;
use crate::db::{Connector, Session};
use crate::error::{DbError, DbResult};
use crate::tools::catalog::RESOURCE_SCHEME;
use crate::tools::format::format_row_set;
use std::sync::Arc;
use tracing::{error, info};

/// Rows returned when reading a table resource.
pub const READ_ROW_LIMIT: usize = 100;

/// Extract the table name from a resource URI.
///
/// Only the first path segment after the scheme is meaningful; anything after
/// it is ignored. The name itself is not validated, so `mysql:///data` yields
/// an empty name and the server rejects the resulting statement.
pub fn parse_table_uri(uri: &str) -> DbResult<&str> {
    let rest = uri
        .strip_prefix(RESOURCE_SCHEME)
        .ok_or_else(|| DbError::invalid_input(format!("Invalid URI scheme: {uri}")))?;
    Ok(rest.split('/').next().unwrap_or_default())
}

pub struct ResourceReader<C: Connector> {
    connector: Arc<C>,
}

impl<C: Connector> ResourceReader<C> {
    pub fn new(connector: Arc<C>) -> Self {
        Self { connector }
    }

    /// Read up to [`READ_ROW_LIMIT`] rows of the table named by `uri`.
    ///
    /// The table name is interpolated into the statement unescaped.
    pub async fn read(&self, config: &DatabaseConfig, uri: &str) -> DbResult<String> {
        info!(uri = %uri, "Reading resource");

        let table = parse_table_uri(uri)?;
        let sql = format!("SELECT * FROM {table} LIMIT {READ_ROW_LIMIT}");

        let mut session = self.connector.open(config).await.inspect_err(|e| {
            error!(uri = %uri, error = %e, "Database error reading resource");
        })?;
        let result = session.fetch(&sql, Some(READ_ROW_LIMIT)).await;
        session.close().await;

        let rows = result.map_err(|e| {
            error!(uri = %uri, error = %e, "Database error reading resource");
            into_database_error(e)
        })?;
        Ok(format_row_set(&rows))
    }
}

/// Statement failures surface as `DbError::Database`, whatever their cause.
fn into_database_error(err: DbError) -> DbError {
    match err {
        DbError::Database { .. } => err,
        other => DbError::database(other.message(), None, "Check that the table exists"),
    }
}

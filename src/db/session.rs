//! Database sessions.
//!
//! A session is one open connection owned by exactly one adapter operation.
//! Callers close it explicitly on every exit path; dropping an unclosed
//! session still tears down the socket.

use crate::db::types::RowToText;
use crate::error::{DbError, DbResult};
use crate::models::RowSet;
use futures_util::StreamExt;
use sqlx::{Column, Connection, Executor, MySqlConnection};
use std::future::Future;
use tracing::{debug, warn};

/// Operations an adapter needs from an open database session.
pub trait Session: Send {
    /// Run a statement and collect its result rows, at most `limit` of them.
    fn fetch(
        &mut self,
        sql: &str,
        limit: Option<usize>,
    ) -> impl Future<Output = DbResult<RowSet>> + Send;

    /// Run a statement inside a transaction, commit it, and return the
    /// affected row count reported by the server.
    fn execute_and_commit(&mut self, sql: &str) -> impl Future<Output = DbResult<u64>> + Send;

    /// Release the session. Never fails; problems are logged.
    fn close(self) -> impl Future<Output = ()> + Send;
}

/// Session backed by a single, unpooled MySQL connection.
#[derive(Debug)]
pub struct MySqlSession {
    conn: MySqlConnection,
}

impl MySqlSession {
    pub fn new(conn: MySqlConnection) -> Self {
        Self { conn }
    }

    /// Column names for a statement that produced no rows.
    async fn describe_columns(&mut self, sql: &str) -> Vec<String> {
        match (&mut self.conn).describe(sql).await {
            Ok(described) => described
                .columns()
                .iter()
                .map(|col| col.name().to_string())
                .collect(),
            Err(e) => {
                warn!(error = %e, "Could not describe result columns");
                Vec::new()
            }
        }
    }
}

impl Session for MySqlSession {
    async fn fetch(&mut self, sql: &str, limit: Option<usize>) -> DbResult<RowSet> {
        debug!(sql = %sql, limit = ?limit, "Fetching rows");

        // Raw SQL keeps the statement unprepared, exactly as submitted
        let results = {
            let stream = (&mut self.conn).fetch(sql);
            match limit {
                Some(n) => stream.take(n).collect::<Vec<_>>().await,
                None => stream.collect::<Vec<_>>().await,
            }
        };

        let mut rows = Vec::with_capacity(results.len());
        for result in results {
            rows.push(result.map_err(DbError::from)?);
        }

        let columns = match rows.first() {
            Some(row) => row.column_names(),
            None => self.describe_columns(sql).await,
        };
        let values = rows.iter().map(|row| row.to_text_values()).collect();

        Ok(RowSet::new(columns, values))
    }

    async fn execute_and_commit(&mut self, sql: &str) -> DbResult<u64> {
        debug!(sql = %sql, "Executing statement");

        let mut tx = self.conn.begin().await?;
        let result = (&mut *tx).execute(sql).await?;
        tx.commit().await?;

        Ok(result.rows_affected())
    }

    async fn close(self) {
        if let Err(e) = self.conn.close().await {
            warn!(error = %e, "Failed to close database session cleanly");
        }
    }
}

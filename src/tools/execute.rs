//! SQL execution tool.
//!
//! This module implements the `execute_sql` MCP tool. Any SQL is accepted and
//! run verbatim; the result shape is picked by [`QueryKind::classify`].
//!
//! Caller mistakes (unknown tool, missing query) are errors. Everything that
//! goes wrong once execution starts, including failing to connect, is
//! reported as a successful text body starting with `Error executing query:`.

use crate::config::DatabaseConfig;
use crate::db::{Connector, Session};
use crate::error::{DbError, DbResult};
use crate::models::{QueryKind, QueryResult};
use crate::tools::format::{format_execution_error, format_result};
use crate::tools::registry::EXECUTE_SQL_TOOL;
use rmcp::model::JsonObject;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

/// Arguments of the `execute_sql` tool.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecuteSqlInput {
    /// The SQL query to execute
    #[serde(default)]
    pub query: Option<String>,
}

impl ExecuteSqlInput {
    /// Parse tool arguments. A missing or empty `query` is invalid.
    pub fn from_arguments(arguments: Option<&JsonObject>) -> DbResult<String> {
        let input = match arguments {
            Some(args) => serde_json::from_value::<Self>(serde_json::Value::Object(args.clone()))
                .map_err(|e| DbError::invalid_input(format!("Invalid arguments: {e}")))?,
            None => Self::default(),
        };
        match input.query {
            Some(query) if !query.is_empty() => Ok(query),
            _ => Err(DbError::invalid_input("Query is required")),
        }
    }
}

pub struct SqlExecutor<C: Connector> {
    connector: Arc<C>,
}

impl<C: Connector> SqlExecutor<C> {
    pub fn new(connector: Arc<C>) -> Self {
        Self { connector }
    }

    /// Run a tool call and return its text body.
    ///
    /// `Err` only for an unknown tool or invalid arguments; execution
    /// failures come back as `Ok` with an error-describing body.
    pub async fn execute(
        &self,
        config: &DatabaseConfig,
        tool_name: &str,
        arguments: Option<&JsonObject>,
    ) -> DbResult<String> {
        info!(tool = %tool_name, "Calling tool");

        if tool_name != EXECUTE_SQL_TOOL {
            return Err(DbError::unknown_tool(tool_name));
        }
        let query = ExecuteSqlInput::from_arguments(arguments)?;

        match self.run(config, &query).await {
            Ok(result) => Ok(format_result(&result)),
            Err(e) => {
                error!(sql = %query, error = %e, "Error executing SQL");
                Ok(format_execution_error(&e))
            }
        }
    }

    async fn run(&self, config: &DatabaseConfig, query: &str) -> DbResult<QueryResult> {
        let mut session = self.connector.open(config).await?;
        let result = run_in_session(&mut session, &config.database, query).await;
        session.close().await;
        result
    }
}

async fn run_in_session<S: Session>(
    session: &mut S,
    database: &str,
    query: &str,
) -> DbResult<QueryResult> {
    match QueryKind::classify(query) {
        QueryKind::SchemaListing => {
            let rows = session.fetch(query, None).await?;
            Ok(QueryResult::SchemaListing {
                database: database.to_string(),
                tables: rows.first_column(),
            })
        }
        QueryKind::RowSet => {
            let rows = session.fetch(query, None).await?;
            Ok(QueryResult::RowSet(rows))
        }
        QueryKind::Mutation => {
            let rows_affected = session.execute_and_commit(query).await?;
            Ok(QueryResult::MutationSummary { rows_affected })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: serde_json::Value) -> JsonObject {
        rmcp::model::object(value)
    }

    #[test]
    fn test_input_with_query() {
        let arguments = args(json!({ "query": "SELECT 1" }));
        assert_eq!(
            ExecuteSqlInput::from_arguments(Some(&arguments)).unwrap(),
            "SELECT 1"
        );
    }

    #[test]
    fn test_input_ignores_extra_fields() {
        let arguments = args(json!({ "query": "SHOW TABLES", "format": "csv" }));
        assert_eq!(
            ExecuteSqlInput::from_arguments(Some(&arguments)).unwrap(),
            "SHOW TABLES"
        );
    }

    #[test]
    fn test_input_missing_query() {
        let err = ExecuteSqlInput::from_arguments(Some(&args(json!({})))).unwrap_err();
        assert!(matches!(err, DbError::InvalidInput { .. }));

        let err = ExecuteSqlInput::from_arguments(None).unwrap_err();
        assert!(matches!(err, DbError::InvalidInput { .. }));
    }

    #[test]
    fn test_input_empty_query() {
        let err = ExecuteSqlInput::from_arguments(Some(&args(json!({ "query": "" })))).unwrap_err();
        assert!(err.to_string().contains("Query is required"));
    }

    #[test]
    fn test_input_non_string_query() {
        let err = ExecuteSqlInput::from_arguments(Some(&args(json!({ "query": 42 })))).unwrap_err();
        assert!(matches!(err, DbError::InvalidInput { .. }));
    }
}

//! Tool descriptors.
//!
//! Exactly one tool is exposed. Its descriptor is static and does not depend
//! on the database being reachable.

use rmcp::model::{JsonObject, Tool};
use serde_json::json;
use std::sync::Arc;

pub const EXECUTE_SQL_TOOL: &str = "execute_sql";

const EXECUTE_SQL_DESCRIPTION: &str = "Execute an SQL query on the MySQL server";

#[derive(Debug, Clone, Copy, Default)]
pub struct ToolRegistry;

impl ToolRegistry {
    pub fn new() -> Self {
        Self
    }

    pub fn list(&self) -> Vec<Tool> {
        vec![execute_sql_tool()]
    }
}

fn execute_sql_tool() -> Tool {
    Tool::new(
        EXECUTE_SQL_TOOL,
        EXECUTE_SQL_DESCRIPTION,
        execute_sql_schema(),
    )
}

/// Input schema: an object with one required string property, `query`.
fn execute_sql_schema() -> Arc<JsonObject> {
    let schema = json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "The SQL query to execute"
            }
        },
        "required": ["query"]
    });
    Arc::new(rmcp::model::object(schema))
}

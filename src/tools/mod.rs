//! Adapter components behind the MCP operations.
//!
//! - `catalog`: list tables as resources (fail-soft)
//! - `reader`: read a table resource by URI
//! - `registry`: the static `execute_sql` tool descriptor
//! - `execute`: run arbitrary SQL and format the result
//! - `format`: text serialization shared by reader and executor

pub mod catalog;
pub mod execute;
pub mod format;
pub mod reader;
pub mod registry;

pub use catalog::{ResourceCatalog, TableResource};
pub use execute::{ExecuteSqlInput, SqlExecutor};
pub use reader::{ResourceReader, parse_table_uri};
pub use registry::{EXECUTE_SQL_TOOL, ToolRegistry};

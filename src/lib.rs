//! MySQL MCP Server Library
//!
//! Exposes a MySQL database over the Model Context Protocol: every table is a
//! readable resource, and a single `execute_sql` tool runs arbitrary SQL.

pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod tools;
pub mod transport;

pub use config::{Config, ConfigSource, DatabaseConfig};
pub use error::{DbError, DbResult};
pub use mcp::{MySqlAdapter, MySqlService};

//! Data models for the MySQL MCP Server.
//!
//! This module re-exports all model types used throughout the application.

pub mod query;

pub use query::{QueryKind, QueryResult, RowSet};

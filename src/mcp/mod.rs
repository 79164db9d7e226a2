//! MCP server integration module.
//!
//! This module provides the integration between the MCP protocol and the
//! adapter components using the rmcp framework.

pub mod adapter;
pub mod service;

pub use adapter::MySqlAdapter;
pub use service::MySqlService;

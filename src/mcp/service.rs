//! MCP service implementation using rmcp.
//!
//! [`MySqlService`] binds a shared [`MySqlAdapter`] to the rmcp
//! `ServerHandler` trait. Resources are the database tables; the only tool is
//! `execute_sql`.

use crate::db::{Connector, MySqlConnector};
use crate::mcp::MySqlAdapter;
use crate::tools::TableResource;
use crate::tools::catalog::RESOURCE_MIME_TYPE;
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListResourcesResult,
        ListToolsResult, PaginatedRequestParam, ProtocolVersion, ReadResourceRequestParam,
        ReadResourceResult, ResourceContents, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
};
use std::sync::Arc;

pub struct MySqlService<C: Connector = MySqlConnector> {
    /// Shared adapter, constructed once at startup
    adapter: Arc<MySqlAdapter<C>>,
}

impl<C: Connector> Clone for MySqlService<C> {
    fn clone(&self) -> Self {
        Self {
            adapter: self.adapter.clone(),
        }
    }
}

impl<C: Connector> MySqlService<C> {
    /// Create a new MySqlService instance around a shared adapter.
    pub fn new(adapter: Arc<MySqlAdapter<C>>) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &MySqlAdapter<C> {
        &self.adapter
    }
}

/// Wrap text read from a table resource as protocol contents.
pub fn resource_contents(uri: &str, text: String) -> ReadResourceResult {
    ReadResourceResult {
        contents: vec![ResourceContents::TextResourceContents {
            uri: uri.to_string(),
            mime_type: Some(RESOURCE_MIME_TYPE.to_string()),
            text,
            meta: None,
        }],
    }
}

/// Wrap a tool body as a successful single-text result.
pub fn tool_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

impl<C: Connector> ServerHandler for MySqlService<C> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "mysql-mcp-server".to_owned(),
                title: Some("MySQL MCP Server".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "MySQL database access.\n\
                \n\
                - Resources: one per table, `mysql://{table}/data`, returning the first 100 rows as CSV-like text\n\
                - Tool `execute_sql`: runs any SQL. SELECT returns rows, SHOW TABLES returns table names,\n\
                  anything else is committed and reports the affected row count.\n\
                  Failures are returned as text starting with `Error executing query:`."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let resources = self
            .adapter
            .list_resources()
            .await
            .map_err(McpError::from)?
            .into_iter()
            .map(TableResource::into_resource)
            .collect();
        Ok(ListResourcesResult::with_all_items(resources))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let text = self
            .adapter
            .read_resource(&request.uri)
            .await
            .map_err(McpError::from)?;
        Ok(resource_contents(&request.uri, text))
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.adapter.list_tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.adapter
            .call_tool(&request.name, request.arguments.as_ref())
            .await
            .map(tool_result)
            .map_err(McpError::from)
    }
}

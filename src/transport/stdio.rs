//! Stdio transport for the MCP server.
//!
//! JSON-RPC messages are read from stdin and written to stdout, so nothing
//! else may write to stdout while this transport runs.

use crate::db::{Connector, MySqlConnector};
use crate::error::{DbError, DbResult};
use crate::mcp::{MySqlAdapter, MySqlService};
use crate::transport::wait_for_signal;
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;
use tracing::{info, warn};

/// Serves one shared adapter to the client on the other end of stdio.
pub struct StdioTransport<C: Connector = MySqlConnector> {
    adapter: Arc<MySqlAdapter<C>>,
}

impl<C: Connector> StdioTransport<C> {
    pub fn new(adapter: Arc<MySqlAdapter<C>>) -> Self {
        Self { adapter }
    }

    /// Serve until the client disconnects or a shutdown signal arrives.
    pub async fn run(&self) -> DbResult<()> {
        info!("Starting MCP server with stdio transport");

        let service = MySqlService::new(self.adapter.clone());
        let running_service = service
            .serve(stdio())
            .await
            .map_err(|e| DbError::internal(format!("Failed to start stdio transport: {}", e)))?;

        tokio::select! {
            result = running_service.waiting() => {
                match result {
                    Ok(_quit_reason) => info!("Client disconnected"),
                    Err(e) => {
                        warn!(error = %e, "Stdio transport error");
                        return Err(DbError::internal(format!("Stdio transport error: {}", e)));
                    }
                }
            }
            _ = wait_for_signal() => {
                // A blocking stdin read cannot be interrupted, so exit outright.
                info!("Shutdown signal received, exiting");
                std::process::exit(0);
            }
        }

        Ok(())
    }

    pub fn adapter(&self) -> &MySqlAdapter<C> {
        &self.adapter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigSource;

    #[test]
    fn test_stdio_transport_shares_adapter() {
        let adapter = Arc::new(MySqlAdapter::new(
            ConfigSource::Fixed(Default::default()),
            MySqlConnector::new(),
        ));
        let transport = StdioTransport::new(adapter.clone());
        assert!(std::ptr::eq(transport.adapter(), adapter.as_ref()));
        assert_eq!(transport.adapter().list_tools().len(), 1);
    }
}

//! MySQL MCP Server - Main entry point.

use clap::Parser;
use mysql_mcp_server::config::Config;
use mysql_mcp_server::mcp::MySqlAdapter;
use mysql_mcp_server::transport::StdioTransport;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber. Logs go to stderr; stdout carries the
/// stdio protocol stream.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    init_tracing(&config);

    info!("Starting MySQL MCP Server v{}", env!("CARGO_PKG_VERSION"));

    let adapter = Arc::new(MySqlAdapter::from_env());

    // Fail fast on a broken environment; operations still re-resolve per call.
    let db_config = match adapter.resolve_config() {
        Ok(db_config) => db_config,
        Err(e) => {
            error!(error = %e, "Invalid database configuration");
            eprintln!("Error: {e}");
            eprintln!();
            eprintln!("Required: MYSQL_USER, MYSQL_PASSWORD, MYSQL_DATABASE");
            eprintln!("Optional: MYSQL_HOST (localhost), MYSQL_PORT (3306), MYSQL_SSL_CA");
            std::process::exit(1);
        }
    };
    info!(
        target_db = %db_config.target(),
        ssl = db_config.ssl.is_some(),
        "Database configuration"
    );

    let result = StdioTransport::new(adapter).run().await;

    if let Err(e) = result {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}

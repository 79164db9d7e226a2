//! Adapter composition root.
//!
//! [`MySqlAdapter`] exposes the four protocol operations. It is built once at
//! startup and shared by every request. Each operation resolves the database
//! configuration afresh, so a broken environment fails every call the same way.

use crate::config::{ConfigSource, DatabaseConfig};
use crate::db::{Connector, MySqlConnector};
use crate::error::DbResult;
use crate::tools::{ResourceCatalog, ResourceReader, SqlExecutor, TableResource, ToolRegistry};
use rmcp::model::{JsonObject, Tool};
use std::sync::Arc;

pub struct MySqlAdapter<C: Connector = MySqlConnector> {
    source: ConfigSource,
    catalog: ResourceCatalog<C>,
    reader: ResourceReader<C>,
    registry: ToolRegistry,
    executor: SqlExecutor<C>,
}

impl MySqlAdapter<MySqlConnector> {
    /// Adapter reading `MYSQL_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::new(ConfigSource::Environment, MySqlConnector::new())
    }
}

impl<C: Connector> MySqlAdapter<C> {
    /// Create a new adapter.
    ///
    /// # Arguments
    ///
    /// * `source` - Where database settings are resolved from on every call
    /// * `connector` - Opens one session per operation
    pub fn new(source: ConfigSource, connector: C) -> Self {
        let connector = Arc::new(connector);
        Self {
            source,
            catalog: ResourceCatalog::new(connector.clone()),
            reader: ResourceReader::new(connector.clone()),
            registry: ToolRegistry::new(),
            executor: SqlExecutor::new(connector),
        }
    }

    /// Resolve the database configuration as the next operation would.
    pub fn resolve_config(&self) -> DbResult<DatabaseConfig> {
        self.source.resolve()
    }

    /// List tables as resources. Database failures yield an empty list;
    /// configuration failures are returned.
    pub async fn list_resources(&self) -> DbResult<Vec<TableResource>> {
        let config = self.resolve_config()?;
        Ok(self.catalog.list(&config).await)
    }

    /// Read a `mysql://{table}/data` resource.
    pub async fn read_resource(&self, uri: &str) -> DbResult<String> {
        let config = self.resolve_config()?;
        self.reader.read(&config, uri).await
    }

    /// List the exposed tools. Needs no configuration and no database.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.registry.list()
    }

    /// Call a tool. Execution failures are part of the returned text.
    pub async fn call_tool(&self, name: &str, arguments: Option<&JsonObject>) -> DbResult<String> {
        let config = self.resolve_config()?;
        self.executor.execute(&config, name, arguments).await
    }
}

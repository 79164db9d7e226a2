//! Table discovery.
//!
//! Lists the tables of the configured database as MCP resources. Listing is
//! fail-soft: database failures are logged and produce an empty list.

use crate::config::DatabaseConfig;
use crate::db::{Connector, Session};
use crate::error::DbResult;
use rmcp::model::{AnnotateAble, RawResource, Resource};
use std::sync::Arc;
use tracing::{error, info};

pub const RESOURCE_SCHEME: &str = "mysql://";
pub const RESOURCE_MIME_TYPE: &str = "text/plain";

const LIST_TABLES_SQL: &str = "SHOW TABLES";

/// A database table exposed as a readable resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableResource {
    pub uri: String,
    pub name: String,
    pub mime_type: String,
    pub description: String,
}

impl TableResource {
    pub fn for_table(table: &str) -> Self {
        Self {
            uri: format!("{RESOURCE_SCHEME}{table}/data"),
            name: format!("Table: {table}"),
            mime_type: RESOURCE_MIME_TYPE.to_string(),
            description: format!("Data in table: {table}"),
        }
    }

    /// Convert into the protocol resource type.
    pub fn into_resource(self) -> Resource {
        let mut resource = RawResource::new(self.uri, self.name);
        resource.description = Some(self.description);
        resource.mime_type = Some(self.mime_type);
        resource.no_annotation()
    }
}

pub struct ResourceCatalog<C: Connector> {
    connector: Arc<C>,
}

impl<C: Connector> ResourceCatalog<C> {
    pub fn new(connector: Arc<C>) -> Self {
        Self { connector }
    }

    /// List every table as a resource, in the order the server reports them.
    pub async fn list(&self, config: &DatabaseConfig) -> Vec<TableResource> {
        match self.list_tables(config).await {
            Ok(tables) => {
                info!(count = tables.len(), "Found tables");
                tables.iter().map(|t| TableResource::for_table(t)).collect()
            }
            Err(e) => {
                error!(error = %e, "Failed to list resources");
                Vec::new()
            }
        }
    }

    async fn list_tables(&self, config: &DatabaseConfig) -> DbResult<Vec<String>> {
        let mut session = self.connector.open(config).await?;
        let result = session.fetch(LIST_TABLES_SQL, None).await;
        session.close().await;
        Ok(result?.first_column())
    }
}

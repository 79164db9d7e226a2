//! Session opening.
//!
//! Turns a resolved [`DatabaseConfig`] into a live [`Session`]. Every call
//! opens a new physical connection; nothing is cached or reused.

use crate::config::DatabaseConfig;
use crate::db::session::{MySqlSession, Session};
use crate::error::{DbError, DbResult};
use sqlx::mysql::{MySqlConnectOptions, MySqlSslMode};
use sqlx::{ConnectOptions, MySqlConnection};
use std::future::Future;
use tracing::debug;

/// Opens database sessions from a resolved configuration.
pub trait Connector: Send + Sync + 'static {
    type Session: Session;

    /// Open a new session. Fails with `DbError::Connection`.
    fn open(
        &self,
        config: &DatabaseConfig,
    ) -> impl Future<Output = DbResult<Self::Session>> + Send;
}

/// Connector for MySQL and MariaDB servers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlConnector;

impl MySqlConnector {
    pub fn new() -> Self {
        Self
    }

    /// Build driver connect options.
    ///
    /// TLS is opt-in: with no CA configured the connection is plain, never
    /// upgraded opportunistically.
    pub fn connect_options(config: &DatabaseConfig) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        match &config.ssl {
            Some(ssl) => {
                let mode = match (ssl.verify_cert, ssl.verify_identity) {
                    (_, true) => MySqlSslMode::VerifyIdentity,
                    (true, false) => MySqlSslMode::VerifyCa,
                    (false, false) => MySqlSslMode::Required,
                };
                options.ssl_mode(mode).ssl_ca(&ssl.ca_path)
            }
            None => options.ssl_mode(MySqlSslMode::Disabled),
        }
    }
}

impl Connector for MySqlConnector {
    type Session = MySqlSession;

    async fn open(&self, config: &DatabaseConfig) -> DbResult<MySqlSession> {
        debug!(
            target_db = %config.target(),
            ssl = config.ssl.is_some(),
            "Opening database session"
        );

        let conn: MySqlConnection = Self::connect_options(config)
            .connect()
            .await
            .map_err(DbError::connect_failed)?;

        Ok(MySqlSession::new(conn))
    }
}

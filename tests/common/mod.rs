//! In-memory database double shared by the integration tests.
//!
//! Understands just enough SQL to drive the adapter: `SHOW TABLES`,
//! `SELECT * FROM t [LIMIT n]` and `DELETE FROM t WHERE col = value`.

#![allow(dead_code)]

use mysql_mcp_server::config::{ConfigSource, DatabaseConfig};
use mysql_mcp_server::db::{Connector, Session};
use mysql_mcp_server::error::{DbError, DbResult};
use mysql_mcp_server::mcp::MySqlAdapter;
use mysql_mcp_server::models::RowSet;
use std::sync::{Arc, Mutex};

pub const TEST_DATABASE: &str = "shop";

#[derive(Debug, Clone)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(name: &str, columns: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|v| v.to_string()).collect())
                .collect(),
        }
    }
}

#[derive(Debug, Default)]
pub struct State {
    pub tables: Vec<Table>,
    pub opens: usize,
    pub closes: usize,
    pub statements: Vec<String>,
    pub unreachable: bool,
    /// Sessions open, but every statement fails.
    pub statements_fail: bool,
}

/// Connector handing out sessions over a shared in-memory state.
#[derive(Debug, Clone, Default)]
pub struct FakeConnector {
    pub state: Arc<Mutex<State>>,
}

impl FakeConnector {
    pub fn with_tables(tables: Vec<Table>) -> Self {
        let connector = Self::default();
        connector.state.lock().unwrap().tables = tables;
        connector
    }

    pub fn unreachable() -> Self {
        let connector = Self::default();
        connector.state.lock().unwrap().unreachable = true;
        connector
    }

    /// Make every statement on later sessions fail with a server error.
    pub fn fail_statements(&self) {
        self.state.lock().unwrap().statements_fail = true;
    }

    pub fn opens(&self) -> usize {
        self.state.lock().unwrap().opens
    }

    pub fn closes(&self) -> usize {
        self.state.lock().unwrap().closes
    }

    pub fn statements(&self) -> Vec<String> {
        self.state.lock().unwrap().statements.clone()
    }

    pub fn table(&self, name: &str) -> Option<Table> {
        self.state
            .lock()
            .unwrap()
            .tables
            .iter()
            .find(|t| t.name == name)
            .cloned()
    }
}

impl Connector for FakeConnector {
    type Session = FakeSession;

    async fn open(&self, config: &DatabaseConfig) -> DbResult<FakeSession> {
        let mut state = self.state.lock().unwrap();
        if state.unreachable {
            return Err(DbError::connection(
                format!("Can't connect to MySQL server on '{}'", config.host),
                "Check network connectivity and MYSQL_HOST/MYSQL_PORT",
            ));
        }
        state.opens += 1;
        Ok(FakeSession {
            state: self.state.clone(),
            database: config.database.clone(),
        })
    }
}

pub struct FakeSession {
    state: Arc<Mutex<State>>,
    database: String,
}

impl FakeSession {
    fn missing_table(&self, table: &str) -> DbError {
        DbError::database(
            format!("Table '{}.{}' doesn't exist", self.database, table),
            Some("42S02".to_string()),
            "Check that the table exists",
        )
    }

    fn server_gone() -> DbError {
        DbError::database(
            "Lost connection to MySQL server during query",
            Some("HY000".to_string()),
            "Check database server status",
        )
    }

    fn syntax_error(sql: &str) -> DbError {
        DbError::database(
            format!("You have an error in your SQL syntax near '{sql}'"),
            Some("42000".to_string()),
            "Check the SQL syntax",
        )
    }
}

impl Session for FakeSession {
    async fn fetch(&mut self, sql: &str, limit: Option<usize>) -> DbResult<RowSet> {
        let mut state = self.state.lock().unwrap();
        state.statements.push(sql.to_string());
        if state.statements_fail {
            return Err(Self::server_gone());
        }

        let words: Vec<&str> = sql.split_whitespace().collect();
        match words.as_slice() {
            ["SHOW", "TABLES"] => Ok(RowSet::new(
                vec![format!("Tables_in_{}", self.database)],
                state.tables.iter().map(|t| vec![t.name.clone()]).collect(),
            )),
            ["SELECT", "*", "FROM", name, rest @ ..] => {
                let table = state
                    .tables
                    .iter()
                    .find(|t| t.name == *name)
                    .ok_or_else(|| self.missing_table(name))?;
                let sql_limit = match rest {
                    [] => None,
                    ["LIMIT", n] => n.parse::<usize>().ok(),
                    _ => return Err(Self::syntax_error(sql)),
                };
                let take = sql_limit
                    .into_iter()
                    .chain(limit)
                    .min()
                    .unwrap_or(usize::MAX);
                Ok(RowSet::new(
                    table.columns.clone(),
                    table.rows.iter().take(take).cloned().collect(),
                ))
            }
            _ => Err(Self::syntax_error(sql)),
        }
    }

    async fn execute_and_commit(&mut self, sql: &str) -> DbResult<u64> {
        let mut state = self.state.lock().unwrap();
        state.statements.push(sql.to_string());
        if state.statements_fail {
            return Err(Self::server_gone());
        }

        let spaced = sql.replace('=', " = ");
        let words: Vec<&str> = spaced.split_whitespace().collect();
        let ["DELETE", "FROM", name, "WHERE", column, "=", value] = words.as_slice() else {
            return Err(Self::syntax_error(sql));
        };
        let value = value.trim_matches('\'');
        let Some(table) = state.tables.iter_mut().find(|t| t.name == *name) else {
            return Err(self.missing_table(name));
        };
        let Some(idx) = table.columns.iter().position(|c| c == column) else {
            return Err(DbError::database(
                format!("Unknown column '{column}' in 'where clause'"),
                Some("42S22".to_string()),
                "Check the column name",
            ));
        };
        let before = table.rows.len();
        table.rows.retain(|row| row[idx] != value);
        Ok((before - table.rows.len()) as u64)
    }

    async fn close(self) {
        self.state.lock().unwrap().closes += 1;
    }
}

/// A complete configuration pointing at [`TEST_DATABASE`].
pub fn test_source() -> ConfigSource {
    ConfigSource::fixed([
        ("MYSQL_USER", "app"),
        ("MYSQL_PASSWORD", "secret"),
        ("MYSQL_DATABASE", TEST_DATABASE),
    ])
}

pub fn adapter_with(connector: &FakeConnector) -> MySqlAdapter<FakeConnector> {
    MySqlAdapter::new(test_source(), connector.clone())
}

/// Like [`adapter_with`], but against a database with another name.
pub fn adapter_for_database(
    connector: &FakeConnector,
    database: &str,
) -> MySqlAdapter<FakeConnector> {
    let source = ConfigSource::fixed([
        ("MYSQL_USER", "app"),
        ("MYSQL_PASSWORD", "secret"),
        ("MYSQL_DATABASE", database),
    ]);
    MySqlAdapter::new(source, connector.clone())
}

/// Two small tables, `customers` and `orders`.
pub fn sample_tables() -> Vec<Table> {
    vec![
        Table::new("customers", &["id", "name"], &[&["1", "x"], &["2", "y"]]),
        Table::new(
            "orders",
            &["id", "customer_id", "total"],
            &[&["10", "1", "9.50"], &["11", "2", "NULL"]],
        ),
    ]
}

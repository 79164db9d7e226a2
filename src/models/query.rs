//! Query-related data models.
//!
//! The shape of a result is decided from the submitted SQL text, not from
//! driver metadata: [`QueryKind::classify`] looks at the trimmed, upper-cased
//! prefix of the statement.

/// Statement class, derived from the leading keywords of the SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// `SHOW TABLES ...`
    SchemaListing,
    /// `SELECT ...`
    RowSet,
    /// Anything else; executed and committed.
    Mutation,
}

impl QueryKind {
    /// Classify a statement by its prefix.
    ///
    /// This is a text heuristic: `WITH ... SELECT` or a leading comment is a
    /// mutation as far as this function is concerned.
    pub fn classify(sql: &str) -> Self {
        let normalized = sql.trim().to_uppercase();
        if normalized.starts_with("SHOW TABLES") {
            Self::SchemaListing
        } else if normalized.starts_with("SELECT") {
            Self::RowSet
        } else {
            Self::Mutation
        }
    }
}

/// Tabular result: ordered column names plus ordered rows of rendered values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RowSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Values of the first column, in row order.
    pub fn first_column(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|row| row.first().cloned())
            .collect()
    }
}

/// Outcome of an `execute_sql` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    SchemaListing {
        database: String,
        tables: Vec<String>,
    },
    RowSet(RowSet),
    MutationSummary {
        rows_affected: u64,
    },
}

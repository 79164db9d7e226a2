//! Output formatting for query results.
//!
//! Results are plain delimiter-joined text: values are written as-is, so a
//! value containing a comma or newline is indistinguishable from a delimiter.
//! Clients depend on this exact layout.

use crate::error::DbError;
use crate::models::{QueryResult, RowSet};

/// Header line, then one comma-joined line per row.
pub fn format_row_set(rows: &RowSet) -> String {
    let mut lines = Vec::with_capacity(rows.rows.len() + 1);
    lines.push(rows.columns.join(","));
    lines.extend(rows.rows.iter().map(|row| row.join(",")));
    lines.join("\n")
}

/// `Tables_in_{database}` header, then one table name per line.
pub fn format_schema_listing(database: &str, tables: &[String]) -> String {
    let mut lines = Vec::with_capacity(tables.len() + 1);
    lines.push(format!("Tables_in_{}", database));
    lines.extend(tables.iter().cloned());
    lines.join("\n")
}

pub fn format_mutation_summary(rows_affected: u64) -> String {
    format!(
        "Query executed successfully. Rows affected: {}",
        rows_affected
    )
}

/// Body returned in place of a failure by `execute_sql`.
pub fn format_execution_error(err: &DbError) -> String {
    format!("Error executing query: {}", err.message())
}

pub fn format_result(result: &QueryResult) -> String {
    match result {
        QueryResult::SchemaListing { database, tables } => format_schema_listing(database, tables),
        QueryResult::RowSet(rows) => format_row_set(rows),
        QueryResult::MutationSummary { rows_affected } => format_mutation_summary(*rows_affected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_format_row_set() {
        let rows = RowSet::new(
            strings(&["a", "b"]),
            vec![strings(&["1", "x"]), strings(&["2", "y"])],
        );
        assert_eq!(format_row_set(&rows), "a,b\n1,x\n2,y");
    }

    #[test]
    fn test_format_row_set_header_only() {
        let rows = RowSet::new(strings(&["id", "name"]), Vec::new());
        assert_eq!(format_row_set(&rows), "id,name");
    }

    #[test]
    fn test_format_row_set_does_not_escape() {
        let rows = RowSet::new(strings(&["note"]), vec![strings(&["a,b\nc"])]);
        assert_eq!(format_row_set(&rows), "note\na,b\nc");
    }

    #[test]
    fn test_format_schema_listing() {
        let tables = strings(&["t1", "t2"]);
        assert_eq!(format_schema_listing("db", &tables), "Tables_in_db\nt1\nt2");
        assert_eq!(format_schema_listing("db", &[]), "Tables_in_db");
    }

    #[test]
    fn test_format_mutation_summary() {
        assert_eq!(
            format_mutation_summary(1),
            "Query executed successfully. Rows affected: 1"
        );
    }

    #[test]
    fn test_format_execution_error() {
        let err = DbError::database("Table 'db.nosuchtable' doesn't exist", None, "check");
        assert_eq!(
            format_execution_error(&err),
            "Error executing query: Table 'db.nosuchtable' doesn't exist"
        );

        let err = DbError::connection("Can't connect to MySQL server", "check host");
        assert_eq!(
            format_execution_error(&err),
            "Error executing query: Can't connect to MySQL server"
        );
    }

    #[test]
    fn test_format_result_dispatch() {
        let result = QueryResult::MutationSummary { rows_affected: 3 };
        assert_eq!(
            format_result(&result),
            "Query executed successfully. Rows affected: 3"
        );
    }
}

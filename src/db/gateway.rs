//! Read-only query gateway. Everything the resolvers know about the store
//! goes through the `QueryGateway` trait: execute one statement, get back
//! rows of nullable text fields. Keeping the surface this narrow lets tests
//! swap in a mock gateway and keeps the SQLite specifics in one place.

use rusqlite::types::ValueRef;
use rusqlite::{Connection, ToSql};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// A statement failed to execute. Carries the joined diagnostic records so
/// the caller can show the user everything the driver reported. Queries are
/// never retried; the triggering operation aborts and the session continues.
#[error("query execution failed:\n{diagnostics}")]
pub struct QueryError {
    pub diagnostics: String,
}

/// A row is an ordered list of nullable text fields; absent means SQL NULL.
pub type TextRow = Vec<Option<String>>;

/// Contract for executing read-only lookups. Implementations never write.
pub trait QueryGateway {
    /// Run a prepared, parameterized statement and collect every row as
    /// text. Numeric values are rendered with their natural `to_string`
    /// form, so downstream parsing sees the same text a driver would hand
    /// back from a character buffer.
    fn select(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<TextRow>, QueryError>;
}

impl QueryGateway for Connection {
    fn select(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<TextRow>, QueryError> {
        run_select(self, sql, params).map_err(|err| QueryError {
            diagnostics: diagnostics_text(&err),
        })
    }
}

fn run_select(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> rusqlite::Result<Vec<TextRow>> {
    let mut stmt = conn.prepare(sql)?;
    let column_count = stmt.column_count();
    let mut rows = stmt.query(params)?;

    let mut collected = Vec::new();
    while let Some(row) = rows.next()? {
        let mut fields = Vec::with_capacity(column_count);
        for index in 0..column_count {
            fields.push(value_as_text(row.get_ref(index)?));
        }
        collected.push(fields);
    }
    Ok(collected)
}

/// Render one SQLite value as optional text.
fn value_as_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(value) => Some(value.to_string()),
        ValueRef::Real(value) => Some(value.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

/// Build the diagnostic text for a failed statement by walking the whole
/// error source chain and emitting one numbered record per cause, joined by
/// newlines. Every available record is reported, not just the first.
fn diagnostics_text(err: &rusqlite::Error) -> String {
    let mut records = Vec::new();
    let mut index = 1;

    if let rusqlite::Error::SqliteFailure(failure, _) = err {
        records.push(format!(
            "{index}: code {} (extended {})",
            failure.code as i32, failure.extended_code
        ));
        index += 1;
    }

    let mut source: Option<&dyn std::error::Error> = Some(err);
    while let Some(cause) = source {
        records.push(format!("{index}: {cause}"));
        index += 1;
        source = cause.source();
    }

    records.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE Samples (Symbol TEXT, Charge INTEGER, AtomicWeight REAL);
             INSERT INTO Samples VALUES ('NA', 1, 22.99);
             INSERT INTO Samples VALUES ('CL', NULL, NULL);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn values_come_back_as_text_fields() {
        let conn = memory_store();
        let rows = conn
            .select(
                "SELECT Symbol, Charge, AtomicWeight FROM Samples WHERE Symbol = ?1",
                &[&"NA"],
            )
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0].as_deref(), Some("NA"));
        assert_eq!(rows[0][1].as_deref(), Some("1"));
        assert_eq!(rows[0][2].as_deref(), Some("22.99"));
    }

    #[test]
    fn null_columns_are_absent_fields() {
        let conn = memory_store();
        let rows = conn
            .select(
                "SELECT Charge, AtomicWeight FROM Samples WHERE Symbol = ?1",
                &[&"CL"],
            )
            .unwrap();
        assert_eq!(rows[0], vec![None, None]);
    }

    #[test]
    fn no_matching_rows_is_not_an_error() {
        let conn = memory_store();
        let rows = conn
            .select("SELECT Symbol FROM Samples WHERE Symbol = ?1", &[&"XX"])
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn failed_statements_carry_diagnostics() {
        let conn = memory_store();
        let err = conn
            .select("SELECT Symbol FROM NoSuchTable", &[])
            .unwrap_err();
        assert!(!err.diagnostics.is_empty());
        assert!(err.diagnostics.contains("NoSuchTable"));
        // One record per line, numbered from 1.
        assert!(err.diagnostics.lines().next().unwrap().starts_with("1: "));
    }
}

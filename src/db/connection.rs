use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::{Connection, OpenFlags};

use super::gateway::QueryGateway;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".chemical-db-explorer";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "chemical.sqlite";

/// Expected shape of each relation, probed at startup. The projection doubles
/// as documentation of the columns the resolvers depend on.
const EXPECTED_TABLES: &[(&str, &str)] = &[
    ("Elements", "Symbol, Charge, Name, AtomicWeight, AtomicNumber"),
    ("Cations", "Symbol, Charge, Name, AtomicWeight"),
    ("Anions", "Symbol, Charge, Name, AtomicWeight"),
];

/// Open the chemical database read-only and return a live connection. The
/// store is externally provisioned; this application never creates or
/// migrates it, so a missing file is a fatal startup error rather than a
/// trigger for seeding.
pub fn open_database() -> Result<Connection> {
    let db_path = db_path()?;

    let conn = Connection::open_with_flags(
        &db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("failed to open chemical database at {}", db_path.display()))?;

    Ok(conn)
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

/// One-time startup check that each relation exposes the expected columns.
/// Failures are warnings only; the session proceeds regardless and the
/// resolvers surface their own errors if a lookup later hits the mismatch.
pub fn verify_schema(store: &dyn QueryGateway) -> Vec<String> {
    let mut warnings = Vec::new();
    for (table, columns) in EXPECTED_TABLES {
        let probe = format!("SELECT {columns} FROM {table} LIMIT 1");
        if let Err(err) = store.select(&probe, &[]) {
            warnings.push(format!(
                "{table} table structure doesn't match expected columns:\n{}",
                err.diagnostics
            ));
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::seeded_store;

    #[test]
    fn verify_schema_passes_on_expected_shape() {
        let conn = seeded_store();
        assert!(verify_schema(&conn).is_empty());
    }

    #[test]
    fn verify_schema_warns_per_broken_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE Elements (Symbol TEXT, Charge INTEGER, Name TEXT,
                                    AtomicWeight REAL, AtomicNumber INTEGER);
             CREATE TABLE Cations (Symbol TEXT);",
        )
        .unwrap();

        let warnings = verify_schema(&conn);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("Cations"));
        assert!(warnings[1].contains("Anions"));
    }
}

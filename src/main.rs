//! Binary entry point that glues the SQLite-backed resolvers to the TUI.
//! The bootstrapping pipeline is: open the read-only chemical database,
//! run the non-fatal table-structure check, then drive the Ratatui event
//! loop until the user exits.
use chemical_db_explorer::{open_database, run_app, verify_schema, App};

/// Open the store, report structure warnings, and launch the event loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (a missing
/// or unopenable database file) to the terminal instead of crashing silently.
/// Structure warnings are not fatal: they print before the alternate screen
/// is entered and the session proceeds regardless.
fn main() -> anyhow::Result<()> {
    let conn = open_database()?;

    for warning in verify_schema(&conn) {
        eprintln!("Warning: {warning}");
    }

    let mut app = App::new(conn);
    run_app(&mut app)
}

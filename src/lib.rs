//! Core library surface for the Chemical Database Explorer TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: the read-only data-access layer, the domain models, the compound
//! balancer, and the interactive shell.
pub mod balance;
pub mod db;
pub mod models;
pub mod ui;

/// Convenience re-exports for the data-access layer, used by `main.rs` to
/// open the read-only store and run the startup structure check.
pub use db::{open_database, verify_schema};

/// The domain types other layers manipulate.
pub use models::{ElementRecord, Ion, Polarity, ResolutionResult};

/// The balancing algorithm and its result type.
pub use balance::{balance, BalancedCompound, BalanceError};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};

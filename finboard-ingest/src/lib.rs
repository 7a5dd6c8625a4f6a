//! finboard-ingest: snapshot loaders, transaction CSV import and the demo dataset.
//!
//! Loaders are the only place raw text becomes typed records. Malformed dates
//! and amounts are rejected here so the core never sees them.

pub mod demo;
pub mod parsers;
pub mod snapshot;
pub mod types;

pub use demo::{demo_snapshot, demo_store};
pub use parsers::{load_transactions_csv, parse_amount, parse_transactions_csv};
pub use snapshot::{load_snapshot_json, parse_snapshot_json};
pub use types::TransactionRow;

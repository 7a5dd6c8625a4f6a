//! finboard-assistant: canned replies for the dashboard's assistant panel.
//!
//! Deterministic rule matching only. Presentation (typing delays, chat
//! layout) belongs to the front end.

pub mod matcher;
pub mod responses;

pub use matcher::{match_query, normalize};
pub use responses::{ExactEntry, KeywordRule, Response, ResponseTable, default_table};

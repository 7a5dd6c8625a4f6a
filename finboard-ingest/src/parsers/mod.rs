pub mod transactions_csv;

pub use transactions_csv::{parse_amount, parse_transactions_csv, load_transactions_csv};

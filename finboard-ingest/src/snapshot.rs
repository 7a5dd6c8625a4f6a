//! JSON snapshot loading.
//!
//! A snapshot file has the shape of [`Snapshot`]: camelCase keys, ISO dates,
//! every top-level list optional. A malformed date anywhere rejects the file.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use finboard_core::{RecordStore, Snapshot};

pub fn parse_snapshot_json(text: &str) -> Result<RecordStore> {
    let snapshot: Snapshot = serde_json::from_str(text).context("parse snapshot json")?;
    let store = RecordStore::new(snapshot);
    for w in store.warnings() {
        warn!("{w}");
    }
    Ok(store)
}

pub fn load_snapshot_json(path: &Path) -> Result<RecordStore> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let store = parse_snapshot_json(&text).with_context(|| format!("load {}", path.display()))?;
    info!(
        path = %path.display(),
        transactions = store.transactions().len(),
        "loaded snapshot"
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "transactions": [
            {"id": "t1", "description": "Rent", "merchant": "Oak Street Apts", "amount": -1800.0,
             "currency": "USD", "category": "Housing", "type": "expense", "date": "2025-09-01",
             "accountId": "chk"}
        ],
        "accounts": [
            {"id": "chk", "name": "Everyday Checking", "institution": "Chase", "type": "checking",
             "balance": 5400.0, "currency": "USD", "connectedOn": "2023-02-11"}
        ],
        "goals": []
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let store = parse_snapshot_json(SNAPSHOT).unwrap();
        assert_eq!(store.transactions().len(), 1);
        assert!(store.accounts()[0].active);
        assert!(store.budget_categories().is_empty());
        assert!(store.warnings().is_empty());
    }

    #[test]
    fn test_malformed_date_rejects_snapshot() {
        let bad = SNAPSHOT.replace("2025-09-01", "09/01/2025");
        assert!(parse_snapshot_json(&bad).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_snapshot_json(Path::new("/nonexistent/snapshot.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/snapshot.json"));
    }
}

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use finboard_core::RecordStore;
use finboard_core::time::today_in_tz;
use finboard_ingest::{demo_store, load_snapshot_json, load_transactions_csv};

use crate::config::Config;

/// `$FINBOARD_HOME`, or `~/.finboard`
pub fn finboard_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("FINBOARD_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set (or set FINBOARD_HOME)")?;
    Ok(PathBuf::from(home).join(".finboard"))
}

pub fn ensure_finboard_home() -> Result<PathBuf> {
    let dir = finboard_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// The reference "now": the pinned `--today`, else the current day in the configured timezone.
pub fn resolve_today(cfg: &Config, pinned: Option<NaiveDate>) -> Result<NaiveDate> {
    if let Some(day) = pinned {
        debug!(%day, "using pinned today");
        return Ok(day);
    }
    today_in_tz(&cfg.data.timezone, Utc::now())
        .with_context(|| format!("resolve today in [data].timezone = {}", cfg.data.timezone))
}

#[derive(Args, Debug, Clone, Default)]
pub struct ImportArgs {
    /// Transaction CSV export to add on top of the snapshot (repeatable)
    #[arg(long = "import", global = true)]
    pub paths: Vec<PathBuf>,

    /// Account id for imported rows without an `account` column
    #[arg(long = "import-account", global = true, default_value = "imported")]
    pub account: String,
}

/// Load the configured snapshot, or the demo dataset when none is configured,
/// plus any imported transaction CSVs.
pub fn load_store(cfg: &Config, today: NaiveDate, import: &ImportArgs) -> Result<RecordStore> {
    let store = match &cfg.data.snapshot {
        Some(path) => load_snapshot_json(path)?,
        None => {
            info!("no [data].snapshot configured; using demo dataset");
            demo_store(today)
        }
    };
    if import.paths.is_empty() {
        return Ok(store);
    }

    let mut snapshot = store.into_snapshot();
    for path in &import.paths {
        let txns = load_transactions_csv(path, &import.account)?;
        info!(path = %path.display(), count = txns.len(), "imported transactions");
        snapshot.transactions.extend(txns);
    }
    let store = RecordStore::new(snapshot);
    for w in store.warnings() {
        warn!("{w}");
    }
    Ok(store)
}

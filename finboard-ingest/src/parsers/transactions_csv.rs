//! Generic transaction CSV export parser
//!
//! Expected header (order and case free, unknown columns ignored):
//!   id,date,description,merchant,amount,currency,category,type,account,note
//!
//! `date` and `amount` are required per row; a malformed value fails the whole
//! import with the row number so nothing half-typed reaches the record store.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use regex::Regex;
use tracing::debug;

use finboard_core::time::parse_date;
use finboard_core::{Transaction, TransactionType};

use crate::types::TransactionRow;

const REQUIRED_COLUMNS: [&str; 3] = ["date", "description", "amount"];

fn amount_regex() -> Result<Regex> {
    Ok(Regex::new(concat!(
        r"^(?P<open>\()?\s*",
        r"(?P<sign>[-+])?\s*\$?\s*",
        r"(?P<num>(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?)",
        r"\s*(?P<close>\))?$"
    ))?)
}

fn amount_with(re: &Regex, raw: &str) -> Option<f64> {
    let caps = re.captures(raw.trim())?;
    if caps.name("open").is_some() != caps.name("close").is_some() {
        return None;
    }
    let value: f64 = caps["num"].replace(',', "").parse().ok()?;
    let negative =
        caps.name("open").is_some() || caps.name("sign").is_some_and(|s| s.as_str() == "-");
    Some(if negative { -value } else { value })
}

/// Parse an exported amount: "-12.50", "$1,200.00", "(45.00)" (accounting negative).
pub fn parse_amount(raw: &str) -> Result<f64> {
    let re = amount_regex()?;
    amount_with(&re, raw).with_context(|| format!("invalid amount '{raw}'"))
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn row_to_transaction(
    re: &Regex,
    row: TransactionRow,
    line: usize,
    default_account: &str,
) -> Result<Transaction> {
    let date = parse_date(&row.date).with_context(|| format!("row {line}: bad date"))?;
    let Some(mut amount) = amount_with(re, &row.amount) else {
        bail!("row {line}: invalid amount '{}'", row.amount);
    };

    let kind = match non_empty(row.kind) {
        Some(k) => k
            .parse::<TransactionType>()
            .with_context(|| format!("row {line}: bad type"))?,
        None => TransactionType::from_sign(amount),
    };
    // Exports disagree on sign conventions; the type column wins.
    match kind {
        TransactionType::Expense => amount = -amount.abs(),
        TransactionType::Income => amount = amount.abs(),
        TransactionType::Transfer => {}
    }

    let description = row.description.trim().to_string();
    let merchant = non_empty(row.merchant).unwrap_or_else(|| description.clone());
    let account = non_empty(row.account).unwrap_or_else(|| default_account.to_string());
    let id = non_empty(row.id).unwrap_or_else(|| format!("{account}-{line}"));
    let category = non_empty(row.category).unwrap_or_else(|| "Uncategorized".to_string());

    let mut txn =
        Transaction::new(id, date, description, merchant, amount, category, kind, account);
    if let Some(currency) = non_empty(row.currency) {
        txn = txn.with_currency(currency.to_uppercase());
    }
    if let Some(note) = non_empty(row.note) {
        txn = txn.with_note(note);
    }
    Ok(txn)
}

/// Parse a transaction export. Rows without an `account` column land in `default_account`.
pub fn parse_transactions_csv<R: Read>(
    reader: R,
    default_account: &str,
) -> Result<Vec<Transaction>> {
    let re = amount_regex()?;
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: csv::StringRecord = rdr
        .headers()
        .context("read csv header")?
        .iter()
        .map(|h| h.to_ascii_lowercase())
        .collect();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        bail!("missing required column(s): {}", missing.join(", "));
    }
    rdr.set_headers(headers);

    let mut out = Vec::new();
    for (i, record) in rdr.deserialize::<TransactionRow>().enumerate() {
        // header is line 1
        let line = i + 2;
        let row = record.with_context(|| format!("row {line}: unreadable record"))?;
        out.push(row_to_transaction(&re, row, line, default_account)?);
    }
    debug!(count = out.len(), account = default_account, "parsed transaction csv");
    Ok(out)
}

pub fn load_transactions_csv(path: &Path, default_account: &str) -> Result<Vec<Transaction>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    parse_transactions_csv(file, default_account)
        .with_context(|| format!("parse {}", path.display()))
}

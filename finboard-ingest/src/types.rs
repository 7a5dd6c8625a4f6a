use serde::Deserialize;

/// One row of a transaction export, exactly as read from the file.
///
/// Everything stays textual here; typing (and rejection) happens in the parser
/// so that errors can name the offending row.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TransactionRow {
    pub id: Option<String>,
    pub date: String,
    pub description: String,
    pub merchant: Option<String>,
    pub amount: String,
    pub currency: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Overrides the default account for this row
    pub account: Option<String>,
    pub note: Option<String>,
}

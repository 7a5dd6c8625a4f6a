//! Filter engine: reduce a transaction list to the records matching every
//! active dimension of a [`FilterCriteria`].
//!
//! An empty set or an open date range leaves that dimension unconstrained.
//! Results are newest first; same-day records keep their input order.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::CoreError;
use crate::records::{Transaction, TransactionType};

/// Relative date windows resolved against a caller-supplied "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatePreset {
    Last7Days,
    Last30Days,
    Last90Days,
    ThisMonth,
    LastMonth,
    Last3Months,
    Last6Months,
    ThisYear,
    LastYear,
}

impl DatePreset {
    pub const ALL: [DatePreset; 9] = [
        DatePreset::Last7Days,
        DatePreset::Last30Days,
        DatePreset::Last90Days,
        DatePreset::ThisMonth,
        DatePreset::LastMonth,
        DatePreset::Last3Months,
        DatePreset::Last6Months,
        DatePreset::ThisYear,
        DatePreset::LastYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatePreset::Last7Days => "last-7-days",
            DatePreset::Last30Days => "last-30-days",
            DatePreset::Last90Days => "last-90-days",
            DatePreset::ThisMonth => "this-month",
            DatePreset::LastMonth => "last-month",
            DatePreset::Last3Months => "last-3-months",
            DatePreset::Last6Months => "last-6-months",
            DatePreset::ThisYear => "this-year",
            DatePreset::LastYear => "last-year",
        }
    }

    /// Inclusive `(start, end)` bounds relative to `now`.
    pub fn resolve(&self, now: NaiveDate) -> (NaiveDate, NaiveDate) {
        let first_of_month = now.with_day(1).unwrap_or(now);
        match self {
            DatePreset::Last7Days => (now - Duration::days(7), now),
            DatePreset::Last30Days => (now - Duration::days(30), now),
            DatePreset::Last90Days => (now - Duration::days(90), now),
            DatePreset::ThisMonth => (first_of_month, now),
            DatePreset::LastMonth => {
                let end = first_of_month.pred_opt().unwrap_or(first_of_month);
                (end.with_day(1).unwrap_or(end), end)
            }
            DatePreset::Last3Months => (months_back(now, 3), now),
            DatePreset::Last6Months => (months_back(now, 6), now),
            DatePreset::ThisYear => (
                NaiveDate::from_ymd_opt(now.year(), 1, 1).unwrap_or(now),
                now,
            ),
            DatePreset::LastYear => {
                let y = now.year() - 1;
                (
                    NaiveDate::from_ymd_opt(y, 1, 1).unwrap_or(now),
                    NaiveDate::from_ymd_opt(y, 12, 31).unwrap_or(now),
                )
            }
        }
    }
}

fn months_back(now: NaiveDate, n: u32) -> NaiveDate {
    now.checked_sub_months(Months::new(n)).unwrap_or(NaiveDate::MIN)
}

impl std::str::FromStr for DatePreset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '_'], "-");
        DatePreset::ALL
            .into_iter()
            .find(|p| p.as_str() == key)
            .ok_or_else(|| CoreError::InvalidParameter(format!("unknown date preset '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateRange {
    #[default]
    Any,
    /// Inclusive on both ends; a missing bound is open
    Between {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    Preset(DatePreset),
}

impl DateRange {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange::Between {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Concrete bounds for `now`, `(None, None)` when unconstrained.
    pub fn bounds(&self, now: NaiveDate) -> (Option<NaiveDate>, Option<NaiveDate>) {
        match *self {
            DateRange::Any => (None, None),
            DateRange::Between { start, end } => (start, end),
            DateRange::Preset(p) => {
                let (start, end) = p.resolve(now);
                (Some(start), Some(end))
            }
        }
    }

    pub fn contains(&self, date: NaiveDate, now: NaiveDate) -> bool {
        let (start, end) = self.bounds(now);
        start.is_none_or(|s| date >= s) && end.is_none_or(|e| date <= e)
    }

    pub fn is_unconstrained(&self) -> bool {
        matches!(
            self,
            DateRange::Any
                | DateRange::Between {
                    start: None,
                    end: None
                }
        )
    }
}

/// Composite criteria; every dimension is ANDed with the others.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Case-insensitive substring of description or merchant
    pub search: Option<String>,
    pub categories: BTreeSet<String>,
    pub account_ids: BTreeSet<String>,
    pub types: BTreeSet<TransactionType>,
    pub date_range: DateRange,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    pub fn with_account(mut self, account_id: impl Into<String>) -> Self {
        self.account_ids.insert(account_id.into());
        self
    }

    pub fn with_type(mut self, kind: TransactionType) -> Self {
        self.types.insert(kind);
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
    }

    pub fn is_unconstrained(&self) -> bool {
        self.search_needle().is_none()
            && self.categories.is_empty()
            && self.account_ids.is_empty()
            && self.types.is_empty()
            && self.date_range.is_unconstrained()
    }

    /// Whether a single transaction passes every active dimension.
    pub fn matches(&self, txn: &Transaction, now: NaiveDate) -> bool {
        if let Some(needle) = self.search_needle() {
            let hit = txn.description.to_lowercase().contains(&needle)
                || txn.merchant.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        if !self.categories.is_empty() && !self.categories.contains(&txn.category) {
            return false;
        }
        if !self.account_ids.is_empty() && !self.account_ids.contains(&txn.account_id) {
            return false;
        }
        if !self.types.is_empty() && !self.types.contains(&txn.kind) {
            return false;
        }
        self.date_range.contains(txn.date, now)
    }
}

/// Filter and order transactions. The input is never modified.
pub fn filter_transactions(
    records: &[Transaction],
    criteria: &FilterCriteria,
    now: NaiveDate,
) -> Vec<Transaction> {
    let mut out: Vec<Transaction> = records
        .iter()
        .filter(|t| criteria.matches(t, now))
        .cloned()
        .collect();
    // stable: same-day records keep input order
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> NaiveDate {
        date(2025, 10, 15)
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::new("t1", date(2025, 9, 1), "Weekly shop", "Trader Joe's", -85.0, "Groceries", TransactionType::Expense, "chk"),
            Transaction::new("t2", date(2025, 10, 1), "Paycheck", "Acme Corp", 5000.0, "Salary", TransactionType::Income, "chk"),
            Transaction::new("t3", date(2025, 10, 12), "Produce run", "Whole Foods", -42.0, "Groceries", TransactionType::Expense, "card"),
            Transaction::new("t4", date(2025, 10, 1), "October rent", "Parkview Apts", -1800.0, "Housing", TransactionType::Expense, "chk"),
            Transaction::new("t5", date(2025, 7, 20), "Move to savings", "Internal", -500.0, "Transfer", TransactionType::Transfer, "chk"),
            Transaction::new("t6", date(2025, 10, 12), "Snacks", "Whole Foods", -9.5, "Groceries", TransactionType::Expense, "chk"),
        ]
    }

    fn ids(list: &[Transaction]) -> Vec<&str> {
        list.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_unconstrained_returns_everything_sorted() {
        let out = filter_transactions(&sample(), &FilterCriteria::new(), now());
        assert_eq!(ids(&out), vec!["t3", "t6", "t2", "t4", "t1", "t5"]);
    }

    #[test]
    fn test_category_filter_descending() {
        let criteria = FilterCriteria::new().with_category("Groceries");
        let out = filter_transactions(&sample(), &criteria, now());
        assert_eq!(ids(&out), vec!["t3", "t6", "t1"]);
        assert!(out.iter().all(|t| t.category == "Groceries"));
    }

    #[test]
    fn test_search_matches_description_or_merchant() {
        let by_merchant = FilterCriteria::new().with_search("WHOLE foods");
        assert_eq!(ids(&filter_transactions(&sample(), &by_merchant, now())), vec!["t3", "t6"]);

        let by_description = FilterCriteria::new().with_search("rent");
        assert_eq!(ids(&filter_transactions(&sample(), &by_description, now())), vec!["t4"]);

        let blank = FilterCriteria::new().with_search("   ");
        assert!(blank.is_unconstrained());
    }

    #[test]
    fn test_dimensions_combine_with_and() {
        let criteria = FilterCriteria::new()
            .with_category("Groceries")
            .with_account("chk")
            .with_type(TransactionType::Expense);
        let out = filter_transactions(&sample(), &criteria, now());
        assert_eq!(ids(&out), vec!["t6", "t1"]);
    }

    #[test]
    fn test_type_and_account_sets() {
        let criteria = FilterCriteria::new()
            .with_type(TransactionType::Income)
            .with_type(TransactionType::Transfer);
        assert_eq!(ids(&filter_transactions(&sample(), &criteria, now())), vec!["t2", "t5"]);

        let card = FilterCriteria::new().with_account("card");
        assert_eq!(ids(&filter_transactions(&sample(), &card, now())), vec!["t3"]);
    }

    #[test]
    fn test_inclusive_date_bounds() {
        let criteria = FilterCriteria::new()
            .with_date_range(DateRange::between(date(2025, 10, 1), date(2025, 10, 12)));
        let out = filter_transactions(&sample(), &criteria, now());
        assert_eq!(ids(&out), vec!["t3", "t6", "t2", "t4"]);

        let open_end = FilterCriteria::new().with_date_range(DateRange::Between {
            start: Some(date(2025, 10, 2)),
            end: None,
        });
        assert_eq!(ids(&filter_transactions(&sample(), &open_end, now())), vec!["t3", "t6"]);

        let inverted = FilterCriteria::new()
            .with_date_range(DateRange::between(date(2025, 10, 12), date(2025, 10, 1)));
        assert!(filter_transactions(&sample(), &inverted, now()).is_empty());
    }

    #[test]
    fn test_presets_resolve_against_now() {
        let n = now();
        assert_eq!(DatePreset::Last7Days.resolve(n), (date(2025, 10, 8), n));
        assert_eq!(DatePreset::Last30Days.resolve(n), (date(2025, 9, 15), n));
        assert_eq!(DatePreset::Last90Days.resolve(n), (date(2025, 7, 17), n));
        assert_eq!(DatePreset::ThisMonth.resolve(n), (date(2025, 10, 1), n));
        assert_eq!(DatePreset::LastMonth.resolve(n), (date(2025, 9, 1), date(2025, 9, 30)));
        assert_eq!(DatePreset::Last3Months.resolve(n), (date(2025, 7, 15), n));
        assert_eq!(DatePreset::Last6Months.resolve(n), (date(2025, 4, 15), n));
        assert_eq!(DatePreset::ThisYear.resolve(n), (date(2025, 1, 1), n));
        assert_eq!(DatePreset::LastYear.resolve(n), (date(2024, 1, 1), date(2024, 12, 31)));

        // month-end clamping
        assert_eq!(
            DatePreset::Last3Months.resolve(date(2025, 5, 31)).0,
            date(2025, 2, 28)
        );
        assert_eq!(
            DatePreset::Last6Months.resolve(date(2025, 8, 31)).0,
            date(2025, 2, 28)
        );
        // last month from the 31st is the whole previous month, however short
        assert_eq!(
            DatePreset::LastMonth.resolve(date(2025, 10, 31)),
            (date(2025, 9, 1), date(2025, 9, 30))
        );
        assert_eq!(
            DatePreset::LastMonth.resolve(date(2025, 3, 31)),
            (date(2025, 2, 1), date(2025, 2, 28))
        );
        // January rolls back into the previous year
        assert_eq!(
            DatePreset::LastMonth.resolve(date(2025, 1, 10)),
            (date(2024, 12, 1), date(2024, 12, 31))
        );
    }

    #[test]
    fn test_preset_filtering() {
        let criteria = FilterCriteria::new().with_date_range(DateRange::Preset(DatePreset::ThisMonth));
        let out = filter_transactions(&sample(), &criteria, now());
        assert_eq!(ids(&out), vec!["t3", "t6", "t2", "t4"]);

        let last30 = FilterCriteria::new().with_date_range(DateRange::Preset(DatePreset::Last30Days));
        let out = filter_transactions(&sample(), &last30, now());
        assert_eq!(ids(&out), vec!["t3", "t6", "t2", "t4"]);

        let last3 = FilterCriteria::new().with_date_range(DateRange::Preset(DatePreset::Last3Months));
        let out = filter_transactions(&sample(), &last3, now());
        assert_eq!(ids(&out), vec!["t3", "t6", "t2", "t4", "t1", "t5"]);
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!("last-30-days".parse::<DatePreset>().unwrap(), DatePreset::Last30Days);
        assert_eq!("This Month".parse::<DatePreset>().unwrap(), DatePreset::ThisMonth);
        assert_eq!("last_3_months".parse::<DatePreset>().unwrap(), DatePreset::Last3Months);
        assert!("fortnight".parse::<DatePreset>().is_err());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let criteria = FilterCriteria::new()
            .with_search("o")
            .with_date_range(DateRange::Preset(DatePreset::Last90Days));
        let once = filter_transactions(&sample(), &criteria, now());
        let twice = filter_transactions(&once, &criteria, now());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_input_not_mutated() {
        let input = sample();
        let before = input.clone();
        let _ = filter_transactions(&input, &FilterCriteria::new().with_category("Housing"), now());
        assert_eq!(input, before);
    }
}

use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::Args;

use finboard_core::time::parse_date;
use finboard_core::{DatePreset, DateRange, FilterCriteria, TransactionType};

/// clap value parser for YYYY-MM-DD flags
pub fn date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive match on description or merchant
    #[arg(long)]
    pub search: Option<String>,

    /// Category to include (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Account id to include (repeatable)
    #[arg(long = "account")]
    pub accounts: Vec<String>,

    /// income, expense or transfer (repeatable)
    #[arg(long = "type")]
    pub types: Vec<TransactionType>,

    /// Relative window, e.g. last-30-days, this-month, last-year
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub preset: Option<DatePreset>,

    /// Inclusive start date (YYYY-MM-DD)
    #[arg(long, value_parser = date_arg)]
    pub from: Option<NaiveDate>,

    /// Inclusive end date (YYYY-MM-DD)
    #[arg(long, value_parser = date_arg)]
    pub to: Option<NaiveDate>,
}

impl FilterArgs {
    pub fn criteria(&self) -> Result<FilterCriteria> {
        let date_range = match (self.preset, self.from, self.to) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                bail!("--preset cannot be combined with --from/--to")
            }
            (Some(preset), None, None) => DateRange::Preset(preset),
            (None, None, None) => DateRange::Any,
            (None, start, end) => DateRange::Between { start, end },
        };

        let mut criteria = FilterCriteria::new().with_date_range(date_range);
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            criteria = criteria.with_search(search);
        }
        for c in &self.categories {
            criteria = criteria.with_category(c.clone());
        }
        for a in &self.accounts {
            criteria = criteria.with_account(a.clone());
        }
        for t in &self.types {
            criteria = criteria.with_type(*t);
        }
        Ok(criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        filters: FilterArgs,
    }

    fn parse(args: &[&str]) -> Result<FilterCriteria> {
        let mut argv = vec!["finboard"];
        argv.extend_from_slice(args);
        Harness::try_parse_from(argv)?.filters.criteria()
    }

    #[test]
    fn test_no_flags_is_unconstrained() {
        assert!(parse(&[]).unwrap().is_unconstrained());
    }

    #[test]
    fn test_repeatable_flags() {
        let c = parse(&[
            "--category",
            "Dining",
            "--category",
            "Groceries",
            "--type",
            "expense",
            "--preset",
            "last-30-days",
        ])
        .unwrap();
        assert_eq!(c.categories.len(), 2);
        assert!(c.types.contains(&TransactionType::Expense));
        assert_eq!(c.date_range, DateRange::Preset(DatePreset::Last30Days));
    }

    #[test]
    fn test_open_ended_range() {
        let c = parse(&["--from", "2025-09-01"]).unwrap();
        assert_eq!(
            c.date_range,
            DateRange::Between { start: NaiveDate::from_ymd_opt(2025, 9, 1), end: None }
        );
    }

    #[test]
    fn test_bad_flags_rejected_up_front() {
        assert!(parse(&["--from", "09/01/2025"]).is_err());
        assert!(parse(&["--type", "refund"]).is_err());
        assert!(parse(&["--preset", "fortnight"]).is_err());
        assert!(parse(&["--preset", "this-month", "--to", "2025-10-01"]).is_err());
    }
}

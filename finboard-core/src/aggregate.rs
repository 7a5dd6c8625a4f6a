//! Scalar and grouped statistics over transaction subsets.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::records::Transaction;
use crate::rollup::{Rollup, rollup};

/// Totals for a list of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub count: usize,
    pub income_total: f64,
    /// Sum of absolute expense amounts (positive)
    pub expense_total: f64,
    pub net_flow: f64,
    pub average_abs_amount: f64,
    pub max_abs_expense: f64,
}

/// `numerator / denominator`, or 0 when the denominator is zero or the result is not finite.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let r = numerator / denominator;
    if r.is_finite() { r } else { 0.0 }
}

/// Same guard as [`ratio`], scaled to a percentage.
pub fn percent(numerator: f64, denominator: f64) -> f64 {
    ratio(numerator, denominator) * 100.0
}

pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut income_total = 0.0;
    let mut expense_total = 0.0;
    let mut abs_total = 0.0;
    let mut max_abs_expense: f64 = 0.0;

    for txn in transactions {
        abs_total += txn.abs_amount();
        if txn.is_income() {
            income_total += txn.amount;
        } else if txn.is_expense() {
            expense_total += txn.abs_amount();
            max_abs_expense = max_abs_expense.max(txn.abs_amount());
        }
    }

    Summary {
        count: transactions.len(),
        income_total,
        expense_total,
        net_flow: income_total - expense_total,
        average_abs_amount: ratio(abs_total, transactions.len() as f64),
        max_abs_expense,
    }
}

/// Bucket transactions by calendar day, newest day first.
/// Within a bucket the input order is kept.
pub fn group_by_date(transactions: &[Transaction]) -> Vec<(NaiveDate, Vec<Transaction>)> {
    let mut groups: BTreeMap<NaiveDate, Vec<Transaction>> = BTreeMap::new();
    for txn in transactions {
        groups.entry(txn.date).or_default().push(txn.clone());
    }
    groups.into_iter().rev().collect()
}

/// Share of income kept, as a percentage of income.
pub fn savings_rate(summary: &Summary) -> f64 {
    percent(summary.net_flow, summary.income_total)
}

pub fn income_expense_ratio(summary: &Summary) -> f64 {
    ratio(summary.income_total, summary.expense_total)
}

/// Expense transactions rolled up by category on their absolute amount.
pub fn spending_by_category(transactions: &[Transaction]) -> Rollup<String, &Transaction> {
    let expenses: Vec<&Transaction> = transactions.iter().filter(|t| t.is_expense()).collect();
    rollup(expenses, |t| t.category.clone(), |t| t.abs_amount())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::TransactionType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(id: &str, amount: f64, kind: TransactionType, d: NaiveDate, category: &str) -> Transaction {
        Transaction::new(id, d, id, "Merchant", amount, category, kind, "acc-1")
    }

    fn october() -> Vec<Transaction> {
        vec![
            txn("pay", 5000.0, TransactionType::Income, date(2025, 10, 1), "Salary"),
            txn("rent", -1200.0, TransactionType::Expense, date(2025, 10, 1), "Housing"),
            txn("food", -300.0, TransactionType::Expense, date(2025, 10, 2), "Groceries"),
        ]
    }

    #[test]
    fn test_summarize_income_and_expenses() {
        let s = summarize(&october());
        assert_eq!(s.count, 3);
        assert_eq!(s.income_total, 5000.0);
        assert_eq!(s.expense_total, 1500.0);
        assert_eq!(s.net_flow, 3500.0);
        assert!((s.average_abs_amount - 6500.0 / 3.0).abs() < 1e-9);
        assert_eq!(s.max_abs_expense, 1200.0);
    }

    #[test]
    fn test_summarize_empty_is_all_zero() {
        let s = summarize(&[]);
        assert_eq!(s, Summary::default());
        assert!(!s.average_abs_amount.is_nan());
    }

    #[test]
    fn test_transfers_only_count_toward_average() {
        let list = vec![txn("move", -400.0, TransactionType::Transfer, date(2025, 10, 3), "Transfer")];
        let s = summarize(&list);
        assert_eq!(s.income_total, 0.0);
        assert_eq!(s.expense_total, 0.0);
        assert_eq!(s.average_abs_amount, 400.0);
        assert_eq!(s.max_abs_expense, 0.0);
    }

    #[test]
    fn test_ratio_zero_guard() {
        assert_eq!(ratio(10.0, 0.0), 0.0);
        assert_eq!(ratio(0.0, 0.0), 0.0);
        assert_eq!(ratio(f64::INFINITY, 1.0), 0.0);
        assert_eq!(ratio(1.0, 4.0), 0.25);
        assert_eq!(percent(1.0, 4.0), 25.0);
        assert_eq!(percent(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_savings_rate_and_income_ratio() {
        let s = summarize(&october());
        assert!((savings_rate(&s) - 70.0).abs() < 1e-9);
        assert!((income_expense_ratio(&s) - 5000.0 / 1500.0).abs() < 1e-9);

        let empty = summarize(&[]);
        assert_eq!(savings_rate(&empty), 0.0);
        assert_eq!(income_expense_ratio(&empty), 0.0);
    }

    #[test]
    fn test_group_by_date_descending_and_unique() {
        let groups = group_by_date(&october());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, date(2025, 10, 2));
        assert_eq!(groups[1].0, date(2025, 10, 1));
        assert_eq!(groups[1].1.len(), 2);
        assert_eq!(groups[1].1[0].id, "pay");
        assert_eq!(groups[1].1[1].id, "rent");

        let day = summarize(&groups[1].1);
        assert_eq!(day.net_flow, 3800.0);
        assert!(group_by_date(&[]).is_empty());
    }

    #[test]
    fn test_spending_by_category() {
        let list = october();
        let r = spending_by_category(&list);
        assert_eq!(r.grand_total, 1500.0);
        assert_eq!(r.buckets["Housing"].total, 1200.0);
        assert_eq!(r.buckets["Groceries"].total, 300.0);
        assert!(!r.buckets.contains_key("Salary"));
    }
}

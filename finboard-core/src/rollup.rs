//! Category roll-ups: partition entities into named buckets with bucket and
//! grand totals, plus the budget, portfolio and balance-sheet views built on them.
//!
//! Sign convention: every account is valued by [`Account::sheet_value`].
//! Liabilities (credit balances) are carried as the amount owed in their own
//! total. They are only netted against assets in [`balance_sheet`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::aggregate::percent;
use crate::records::{
    Account, AccountType, BudgetCategory, Flexibility, Investment, InvestmentCategory,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket<T> {
    pub total: f64,
    pub items: Vec<T>,
    pub percent_of_grand: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rollup<K: Ord, T> {
    pub buckets: BTreeMap<K, Bucket<T>>,
    /// Sum of the bucket totals
    pub grand_total: f64,
}

impl<K: Ord, T> Rollup<K, T> {
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total_for(&self, key: &K) -> f64 {
        self.buckets.get(key).map(|b| b.total).unwrap_or(0.0)
    }
}

/// Partition `items` by `key`, summing `value` per bucket.
pub fn rollup<I, T, K, FK, FV>(items: I, key: FK, value: FV) -> Rollup<K, T>
where
    I: IntoIterator<Item = T>,
    K: Ord,
    FK: Fn(&T) -> K,
    FV: Fn(&T) -> f64,
{
    let mut buckets: BTreeMap<K, Bucket<T>> = BTreeMap::new();
    for item in items {
        let bucket = buckets.entry(key(&item)).or_insert_with(|| Bucket {
            total: 0.0,
            items: Vec::new(),
            percent_of_grand: 0.0,
        });
        bucket.total += value(&item);
        bucket.items.push(item);
    }

    let grand_total: f64 = buckets.values().map(|b| b.total).sum();
    for bucket in buckets.values_mut() {
        bucket.percent_of_grand = percent(bucket.total, grand_total);
    }

    Rollup { buckets, grand_total }
}

/// Fixed vs flexible spending.
pub fn budget_rollup(categories: &[BudgetCategory]) -> Rollup<Flexibility, &BudgetCategory> {
    rollup(categories, |c| c.flexibility, |c| c.spent)
}

/// Portfolio allocation by asset class on current value.
pub fn portfolio_rollup(investments: &[Investment]) -> Rollup<InvestmentCategory, &Investment> {
    rollup(investments, |i| i.category, |i| i.current_value)
}

/// Active account balances by type, valued as in [`balance_sheet`]: the asset
/// buckets sum to `assets` and the credit bucket to `liabilities`.
pub fn account_rollup(accounts: &[Account]) -> Rollup<AccountType, &Account> {
    rollup(accounts.iter().filter(|a| a.active), |a| a.kind, |a| a.sheet_value())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    pub assets: f64,
    /// Positive magnitude
    pub liabilities: f64,
    pub net_worth: f64,
}

/// Assets minus liabilities over active accounts.
///
/// An asset account with a negative balance (an overdrawn checking account)
/// reduces assets; a credit account with a positive balance (a refund owed to
/// the holder) reduces liabilities.
pub fn balance_sheet(accounts: &[Account]) -> BalanceSheet {
    let mut assets = 0.0;
    let mut liabilities = 0.0;
    for account in accounts.iter().filter(|a| a.active) {
        if account.kind.is_liability() {
            liabilities += account.sheet_value();
        } else {
            assets += account.sheet_value();
        }
    }
    BalanceSheet {
        assets,
        liabilities,
        net_worth: assets - liabilities,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetTotals {
    pub budgeted: f64,
    pub spent: f64,
    pub remaining: f64,
    pub utilization_percent: f64,
    pub over_budget_count: usize,
}

pub fn budget_totals(categories: &[BudgetCategory]) -> BudgetTotals {
    let budgeted: f64 = categories.iter().map(|c| c.budgeted).sum();
    let spent: f64 = categories.iter().map(|c| c.spent).sum();
    BudgetTotals {
        budgeted,
        spent,
        remaining: budgeted - spent,
        utilization_percent: percent(spent, budgeted),
        over_budget_count: categories.iter().filter(|c| c.is_over_budget()).count(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_cost: f64,
    pub total_gain_loss: f64,
    pub total_gain_loss_percent: f64,
    pub daily_change: f64,
    /// Against the portfolio's previous-day value
    pub daily_change_percent: f64,
}

pub fn portfolio_summary(investments: &[Investment]) -> PortfolioSummary {
    let total_value: f64 = investments.iter().map(|i| i.current_value).sum();
    let total_cost: f64 = investments.iter().map(|i| i.purchase_value).sum();
    let daily_change: f64 = investments.iter().map(|i| i.daily_change).sum();
    let total_gain_loss = total_value - total_cost;
    PortfolioSummary {
        total_value,
        total_cost,
        total_gain_loss,
        total_gain_loss_percent: percent(total_gain_loss, total_cost),
        daily_change,
        daily_change_percent: percent(daily_change, total_value - daily_change),
    }
}

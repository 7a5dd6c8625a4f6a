//! Terminal rendering for command output. Every report also has a JSON form
//! (`--json`) built from the same library values.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use finboard_core::{
    Account, AccountType, BalanceSheet, BudgetCategory, BudgetTotals, FinancialDataPoint,
    Flexibility, GoalForecast, GoalStatus, Investment, InvestmentCategory, PortfolioSummary,
    RecordStore, Rollup, SeriesStats, Summary, Transaction,
};

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{s}");
    Ok(())
}

fn money(v: f64) -> String {
    if v < 0.0 {
        format!("-${:.2}", v.abs())
    } else {
        format!("${v:.2}")
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

fn transaction_line(store: &RecordStore, t: &Transaction) -> String {
    format!(
        "{:<28} {:<14} {:<20} {:>12}",
        truncate(&t.description, 28),
        truncate(&t.category, 14),
        truncate(store.resolve_account(t).name(), 20),
        money(t.amount)
    )
}

pub fn print_transactions(store: &RecordStore, txns: &[Transaction]) {
    for t in txns {
        println!("{}  {}", t.date, transaction_line(store, t));
    }
    println!("\n{} transactions", txns.len());
}

#[derive(Serialize)]
pub struct DayGroup<'a> {
    pub date: NaiveDate,
    pub transactions: &'a [Transaction],
}

pub fn day_groups(groups: &[(NaiveDate, Vec<Transaction>)]) -> Vec<DayGroup<'_>> {
    groups
        .iter()
        .map(|(date, transactions)| DayGroup { date: *date, transactions })
        .collect()
}

pub fn print_grouped(store: &RecordStore, groups: &[(NaiveDate, Vec<Transaction>)]) {
    for (date, txns) in groups {
        let net: f64 = txns.iter().map(|t| t.amount).sum();
        println!("{}  ({} items, net {})", date.format("%a %b %-d, %Y"), txns.len(), money(net));
        for t in txns {
            println!("    {}", transaction_line(store, t));
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    #[serde(flatten)]
    pub summary: Summary,
    pub savings_rate: f64,
    pub income_expense_ratio: f64,
}

pub fn print_summary(r: &SummaryReport) {
    let s = &r.summary;
    println!("Transactions      {}", s.count);
    println!("Income            {:>12}", money(s.income_total));
    println!("Expenses          {:>12}", money(s.expense_total));
    println!("Net flow          {:>12}", money(s.net_flow));
    println!("Average amount    {:>12}", money(s.average_abs_amount));
    println!("Largest expense   {:>12}", money(s.max_abs_expense));
    println!("Savings rate      {:>11.1}%", r.savings_rate);
    println!("Income / expense  {:>12.2}", r.income_expense_ratio);
}

#[derive(Serialize)]
pub struct SeriesReport<'a> {
    pub points: &'a [FinancialDataPoint],
    pub stats: SeriesStats,
}

pub fn print_series(points: &[FinancialDataPoint], stats: &SeriesStats) {
    println!(
        "{:<12} {:>12} {:>10} {:>10} {:>10} {:>10} {:>8}",
        "date", "net worth", "income", "expenses", "spending", "cashflow", "change"
    );
    for p in points {
        println!(
            "{:<12} {:>12.0} {:>10.0} {:>10.0} {:>10.0} {:>10.0} {:>7.2}%",
            p.date.to_string(),
            p.networth,
            p.income,
            p.expenses,
            p.spending,
            p.cashflow,
            p.change_percent
        );
    }
    println!(
        "\nChange {} ({:.2}%), average cashflow {}",
        money(stats.total_change),
        stats.total_change_percent,
        money(stats.average_cashflow)
    );
    if let (Some(best), Some(worst)) = (stats.best_period, stats.worst_period) {
        println!("Best period {best}, worst period {worst}");
    }
}

fn print_buckets<K: Ord, T>(rollup: &Rollup<K, T>, label: impl Fn(&K) -> String) {
    for (key, bucket) in &rollup.buckets {
        println!(
            "{:<16} {:>12} {:>6.1}%  ({} items)",
            label(key),
            money(bucket.total),
            bucket.percent_of_grand,
            bucket.items.len()
        );
    }
    println!("{:<16} {:>12}", "total", money(rollup.grand_total));
}

pub fn print_budgets(rollup: &Rollup<Flexibility, &BudgetCategory>, totals: &BudgetTotals) {
    for (flex, bucket) in &rollup.buckets {
        println!(
            "{flex:?} ({} spent, {:.1}% of all spending)",
            money(bucket.total),
            bucket.percent_of_grand
        );
        for c in &bucket.items {
            let flag = if c.is_over_budget() { "  OVER" } else { "" };
            println!(
                "    {:<16} {:>10} of {:>10}  {:>5.0}%{flag}",
                c.name,
                money(c.spent),
                money(c.budgeted),
                c.utilization_percent()
            );
        }
    }
    println!(
        "\nBudgeted {}, spent {}, remaining {} ({:.1}% used, {} over budget)",
        money(totals.budgeted),
        money(totals.spent),
        money(totals.remaining),
        totals.utilization_percent,
        totals.over_budget_count
    );
}

pub fn print_portfolio(
    rollup: &Rollup<InvestmentCategory, &Investment>,
    summary: &PortfolioSummary,
) {
    print_buckets(rollup, |k| k.as_str().to_string());
    println!(
        "\nValue {} on cost {}: {} ({:.2}%), today {} ({:.2}%)",
        money(summary.total_value),
        money(summary.total_cost),
        money(summary.total_gain_loss),
        summary.total_gain_loss_percent,
        money(summary.daily_change),
        summary.daily_change_percent
    );
}

pub fn print_accounts(rollup: &Rollup<AccountType, &Account>, sheet: &BalanceSheet) {
    print_buckets(rollup, |k| k.as_str().to_string());
    println!(
        "\nAssets {}, liabilities {}, net worth {}",
        money(sheet.assets),
        money(sheet.liabilities),
        money(sheet.net_worth)
    );
}

pub fn print_spending(rollup: &Rollup<String, &Transaction>) {
    if rollup.is_empty() {
        println!("No spending in range");
        return;
    }
    print_buckets(rollup, |k| truncate(k, 16));
}

fn status_label(s: GoalStatus) -> &'static str {
    match s {
        GoalStatus::Completed => "completed",
        GoalStatus::OnTrack => "on track",
        GoalStatus::Behind => "behind",
        GoalStatus::Stalled => "stalled",
    }
}

pub fn print_goals(store: &RecordStore, forecasts: &[GoalForecast]) {
    for f in forecasts {
        let name = store
            .goals()
            .iter()
            .find(|g| g.id == f.goal_id)
            .map(|g| g.name.as_str())
            .unwrap_or(f.goal_id.as_str());
        let eta = match f.projected_completion_date {
            Some(d) => d.to_string(),
            None => "never at current rate".to_string(),
        };
        println!(
            "{:<22} {:<10} remaining {:>11}  save {:>9}/mo  eta {:<22} {:>3.0}% likely",
            truncate(name, 22),
            status_label(f.status),
            money(f.remaining.max(0.0)),
            money(f.recommended_monthly_amount),
            eta,
            f.success_probability.as_percent()
        );
    }
}

use anyhow::Result;
use chrono::NaiveDate;
use clap::Subcommand;
use serde::Serialize;
use tracing::debug;

use finboard_core::{
    RecordStore, account_rollup, balance_sheet, budget_rollup, budget_totals, filter_transactions,
    portfolio_rollup, portfolio_summary, spending_by_category,
};

use crate::filters::FilterArgs;
use crate::report;

#[derive(Subcommand, Debug)]
pub enum RollupCommand {
    /// Budget categories split into fixed and flexible
    Budgets,

    /// Portfolio allocation by asset class
    Portfolio,

    /// Account balances by type, plus the balance sheet
    Accounts,

    /// Expense transactions by category
    Spending {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Serialize)]
struct WithTotals<R, T> {
    rollup: R,
    totals: T,
}

pub fn run(cmd: RollupCommand, store: &RecordStore, today: NaiveDate, json: bool) -> Result<()> {
    match cmd {
        RollupCommand::Budgets => {
            let rollup = budget_rollup(store.budget_categories());
            let totals = budget_totals(store.budget_categories());
            if json {
                return report::print_json(&WithTotals { rollup, totals });
            }
            report::print_budgets(&rollup, &totals);
        }
        RollupCommand::Portfolio => {
            let rollup = portfolio_rollup(store.investments());
            let totals = portfolio_summary(store.investments());
            if json {
                return report::print_json(&WithTotals { rollup, totals });
            }
            report::print_portfolio(&rollup, &totals);
        }
        RollupCommand::Accounts => {
            let rollup = account_rollup(store.accounts());
            let totals = balance_sheet(store.accounts());
            if json {
                return report::print_json(&WithTotals { rollup, totals });
            }
            report::print_accounts(&rollup, &totals);
        }
        RollupCommand::Spending { filters } => {
            let criteria = filters.criteria()?;
            let txns = filter_transactions(store.transactions(), &criteria, today);
            debug!(matched = txns.len(), "spending rollup");
            let rollup = spending_by_category(&txns);
            if json {
                return report::print_json(&rollup);
            }
            report::print_spending(&rollup);
        }
    }
    Ok(())
}

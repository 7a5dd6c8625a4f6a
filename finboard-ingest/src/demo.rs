//! Built-in demo dataset: a plausible household over the last three months.
//!
//! Dates are laid out relative to `today` so presets like "this month" always
//! have something to show. Nothing here is random.

use chrono::{Datelike, Months, NaiveDate};

use finboard_core::{
    Account, AccountType, BudgetCategory, Flexibility, Goal, GoalCategory, Investment,
    InvestmentCategory, RecordStore, Snapshot, Transaction, TransactionType,
};

use finboard_core::TransactionType::{Expense, Income, Transfer};

const MONTHS_OF_HISTORY: u32 = 3;

/// (day of month, description, merchant, amount, category, type, account)
type Template = (u32, &'static str, &'static str, f64, &'static str, TransactionType, &'static str);

const MONTHLY: &[Template] = &[
    (1, "Payroll ACME Corp", "ACME Corp", 4250.0, "Salary", Income, "chk"),
    (1, "Rent", "Oak Street Apartments", -1800.0, "Housing", Expense, "chk"),
    (3, "Weekly groceries", "Whole Foods", -132.40, "Groceries", Expense, "card"),
    (5, "Electric bill", "ComEd", -96.20, "Utilities", Expense, "chk"),
    (6, "Internet", "Xfinity", -79.99, "Utilities", Expense, "chk"),
    (7, "Dinner", "Girl & the Goat", -86.50, "Dining", Expense, "card"),
    (9, "Ventra pass", "CTA", -75.00, "Transport", Expense, "chk"),
    (10, "Weekly groceries", "Trader Joe's", -98.75, "Groceries", Expense, "card"),
    (12, "Streaming", "Netflix", -15.49, "Entertainment", Expense, "card"),
    (12, "Music", "Spotify", -11.99, "Entertainment", Expense, "card"),
    (14, "Lunch", "Sweetgreen", -16.25, "Dining", Expense, "card"),
    (15, "Payroll ACME Corp", "ACME Corp", 4250.0, "Salary", Income, "chk"),
    (15, "Transfer to savings", "Ally", -800.0, "Transfer", Transfer, "chk"),
    (17, "Weekly groceries", "Whole Foods", -121.10, "Groceries", Expense, "card"),
    (18, "Gym membership", "Equinox", -45.00, "Health", Expense, "card"),
    (19, "Rideshare", "Uber", -23.40, "Transport", Expense, "card"),
    (20, "Card payment", "American Express", -1200.0, "Transfer", Transfer, "chk"),
    (21, "Brunch", "Wildberry", -54.30, "Dining", Expense, "card"),
    (22, "Freelance invoice", "Upwork", 650.0, "Freelance", Income, "chk"),
    (24, "Weekly groceries", "Trader Joe's", -104.60, "Groceries", Expense, "card"),
    (26, "Household goods", "Target", -67.85, "Shopping", Expense, "card"),
    (27, "Farmers market", "Green City Market", -28.00, "Groceries", Expense, "cash"),
];

fn first_of_month(today: NaiveDate, back: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(today.year(), today.month(), 1)?.checked_sub_months(Months::new(back))
}

fn demo_transactions(today: NaiveDate) -> Vec<Transaction> {
    let mut out = Vec::new();
    for back in 0..MONTHS_OF_HISTORY {
        let Some(month) = first_of_month(today, back) else { continue };
        // small month-to-month drift so the series is not flat
        let drift = 1.0 + 0.03 * back as f64;
        for (n, entry) in MONTHLY.iter().enumerate() {
            let &(day, desc, merchant, amount, category, kind, account) = entry;
            let Some(date) = month.with_day(day) else { continue };
            if date > today {
                continue;
            }
            let amount = if kind == Expense && category != "Housing" {
                (amount * drift * 100.0).round() / 100.0
            } else {
                amount
            };
            let id = format!("txn-{}-{:02}", month.format("%Y%m"), n + 1);
            out.push(Transaction::new(id, date, desc, merchant, amount, category, kind, account));
        }
    }
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

fn demo_accounts(today: NaiveDate) -> Vec<Account> {
    let since = |years: u32| today.checked_sub_months(Months::new(12 * years)).unwrap_or(today);
    vec![
        Account::new("chk", "Everyday Checking", "Chase", AccountType::Checking, 6_842.17, since(4)),
        Account::new("sav", "High-Yield Savings", "Ally", AccountType::Savings, 18_450.00, since(3)),
        Account::new("card", "Gold Card", "American Express", AccountType::Credit, -1_934.52, since(2)),
        Account::new("brokerage", "Individual Brokerage", "Fidelity", AccountType::Investment, 55_600.00, since(5)),
        Account::new("car", "2019 Subaru Outback", "Kelley Blue Book", AccountType::Asset, 17_800.00, since(1)),
        Account::new("old-card", "Quicksilver", "Capital One", AccountType::Credit, 0.0, since(6)).inactive(),
    ]
}

fn demo_budgets() -> Vec<BudgetCategory> {
    vec![
        BudgetCategory::new("housing", "Housing", 1800.0, 1800.0, Flexibility::Fixed),
        BudgetCategory::new("utilities", "Utilities", 200.0, 176.19, Flexibility::Fixed),
        BudgetCategory::new("insurance", "Insurance", 310.0, 310.0, Flexibility::Fixed),
        BudgetCategory::new("subscriptions", "Subscriptions", 60.0, 72.48, Flexibility::Fixed),
        BudgetCategory::new("groceries", "Groceries", 650.0, 484.85, Flexibility::Flexible),
        BudgetCategory::new("dining", "Dining", 150.0, 157.05, Flexibility::Flexible),
        BudgetCategory::new("transport", "Transport", 150.0, 98.40, Flexibility::Flexible),
        BudgetCategory::new("shopping", "Shopping", 250.0, 67.85, Flexibility::Flexible),
    ]
}

fn demo_investments() -> Vec<Investment> {
    use InvestmentCategory::*;
    vec![
        Investment::new("inv-vti", "VTI", Stocks, 31_250.0, 26_400.0, 182.40),
        Investment::new("inv-aapl", "AAPL", Stocks, 8_920.0, 6_150.0, -64.10),
        Investment::new("inv-btc", "BTC", Crypto, 6_480.0, 4_000.0, 215.75),
        Investment::new("inv-eth", "ETH", Crypto, 2_140.0, 2_900.0, -38.20),
        Investment::new("inv-gld", "GLD", Commodity, 3_360.0, 3_050.0, 11.90),
        Investment::new("inv-vnq", "VNQ", RealEstate, 3_450.0, 3_700.0, 6.35),
    ]
}

fn demo_goals(today: NaiveDate) -> Vec<Goal> {
    let ahead = |months: u32| today.checked_add_months(Months::new(months)).unwrap_or(today);
    vec![
        Goal::new("goal-emergency", "Emergency fund", 20_000.0, 11_500.0, ahead(10), 800.0, GoalCategory::EmergencyFund),
        Goal::new("goal-japan", "Japan trip", 6_000.0, 2_250.0, ahead(8), 500.0, GoalCategory::Vacation),
        Goal::new("goal-house", "House down payment", 60_000.0, 14_800.0, ahead(30), 1_200.0, GoalCategory::Home),
        Goal::new("goal-car", "Car replacement", 12_000.0, 12_400.0, ahead(18), 0.0, GoalCategory::Vehicle),
        Goal::new("goal-masters", "Evening MBA", 25_000.0, 1_000.0, ahead(12), 0.0, GoalCategory::Education),
    ]
}

pub fn demo_snapshot(today: NaiveDate) -> Snapshot {
    Snapshot {
        transactions: demo_transactions(today),
        accounts: demo_accounts(today),
        budget_categories: demo_budgets(),
        investments: demo_investments(),
        goals: demo_goals(today),
    }
}

pub fn demo_store(today: NaiveDate) -> RecordStore {
    RecordStore::new(demo_snapshot(today))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 16).unwrap()
    }

    #[test]
    fn test_no_future_transactions() {
        let store = demo_store(today());
        assert!(store.transactions().iter().all(|t| t.date <= today()));
        // Oct 1..16 plus all of Sep and Aug
        let october = store.transactions().iter().filter(|t| t.date.month() == 10).count();
        assert_eq!(october, 13);
        assert_eq!(store.transactions().len(), 13 + 2 * MONTHLY.len());
    }

    #[test]
    fn test_ids_unique_and_newest_first() {
        let store = demo_store(today());
        let txns = store.transactions();
        let mut ids: Vec<_> = txns.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), txns.len());
        assert!(txns.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn test_cash_transactions_are_unresolved() {
        let store = demo_store(today());
        let unresolved = store.unresolved_transactions();
        assert!(!unresolved.is_empty());
        assert!(unresolved.iter().all(|t| t.account_id == "cash"));
    }

    #[test]
    fn test_expense_signs() {
        let store = demo_store(today());
        for t in store.transactions() {
            match t.kind {
                Income => assert!(t.amount > 0.0),
                Expense => assert!(t.amount < 0.0),
                Transfer => {}
            }
        }
    }
}

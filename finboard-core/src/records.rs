//! Record types for the dashboard snapshot: transactions, accounts, budgets,
//! investments and goals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::percent;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Transfer => "transfer",
        }
    }

    /// Infer the type from the sign of an amount (used when a source leaves the type blank)
    pub fn from_sign(amount: f64) -> Self {
        if amount > 0.0 {
            TransactionType::Income
        } else if amount < 0.0 {
            TransactionType::Expense
        } else {
            TransactionType::Transfer
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            "transfer" => Ok(TransactionType::Transfer),
            other => Err(crate::CoreError::InvalidParameter(format!(
                "unknown transaction type '{other}'"
            ))),
        }
    }
}

/// A single money movement. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub merchant: String,
    /// Positive = inflow, negative = outflow
    pub amount: f64,
    pub currency: String,
    /// Open set (e.g. "Groceries", "Housing")
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub date: NaiveDate,
    pub account_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    /// Create a transaction in USD with no note
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        merchant: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        kind: TransactionType,
        account_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            merchant: merchant.into(),
            amount,
            currency: "USD".to_string(),
            category: category.into(),
            kind,
            date,
            account_id: account_id.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Checking,
    Savings,
    Credit,
    Investment,
    Asset,
}

impl AccountType {
    /// Credit balances are liabilities; everything else counts as an asset.
    pub fn is_liability(&self) -> bool {
        matches!(self, AccountType::Credit)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "checking",
            AccountType::Savings => "savings",
            AccountType::Credit => "credit",
            AccountType::Investment => "investment",
            AccountType::Asset => "asset",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub institution: String,
    #[serde(rename = "type")]
    pub kind: AccountType,
    /// Signed; credit accounts usually carry a negative balance
    pub balance: f64,
    pub currency: String,
    #[serde(default = "default_active")]
    pub active: bool,
    pub connected_on: NaiveDate,
}

fn default_active() -> bool {
    true
}

impl Account {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        institution: impl Into<String>,
        kind: AccountType,
        balance: f64,
        connected_on: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            institution: institution.into(),
            kind,
            balance,
            currency: "USD".to_string(),
            active: true,
            connected_on,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// The balance as it counts on its side of the balance sheet: asset
    /// balances as-is, credit balances negated into the amount owed.
    pub fn sheet_value(&self) -> f64 {
        if self.kind.is_liability() {
            -self.balance
        } else {
            self.balance
        }
    }
}

/// Budget partition: every category is exactly one of these
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Flexibility {
    Fixed,
    Flexible,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCategory {
    pub id: String,
    pub name: String,
    pub budgeted: f64,
    pub spent: f64,
    pub flexibility: Flexibility,
}

impl BudgetCategory {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        budgeted: f64,
        spent: f64,
        flexibility: Flexibility,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            budgeted,
            spent,
            flexibility,
        }
    }

    /// Negative when overspent
    pub fn remaining(&self) -> f64 {
        self.budgeted - self.spent
    }

    pub fn utilization_percent(&self) -> f64 {
        percent(self.spent, self.budgeted)
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.budgeted
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum InvestmentCategory {
    Stocks,
    Crypto,
    Commodity,
    RealEstate,
}

impl InvestmentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentCategory::Stocks => "stocks",
            InvestmentCategory::Crypto => "crypto",
            InvestmentCategory::Commodity => "commodity",
            InvestmentCategory::RealEstate => "real-estate",
        }
    }
}

/// An investment position.
///
/// Only the raw valuations are stored; gain/loss and daily-change percentages
/// are derived so they can never disagree with the values they come from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub symbol: String,
    pub category: InvestmentCategory,
    pub current_value: f64,
    pub purchase_value: f64,
    /// Absolute change since the previous close
    pub daily_change: f64,
}

impl Investment {
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        category: InvestmentCategory,
        current_value: f64,
        purchase_value: f64,
        daily_change: f64,
    ) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            category,
            current_value,
            purchase_value,
            daily_change,
        }
    }

    /// Value at the previous close
    pub fn previous_value(&self) -> f64 {
        self.current_value - self.daily_change
    }

    /// Percent move against the previous-day value
    pub fn daily_change_percent(&self) -> f64 {
        percent(self.daily_change, self.previous_value())
    }

    pub fn total_gain_loss(&self) -> f64 {
        self.current_value - self.purchase_value
    }

    pub fn total_gain_loss_percent(&self) -> f64 {
        percent(self.total_gain_loss(), self.purchase_value)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum GoalCategory {
    EmergencyFund,
    Vacation,
    Home,
    Vehicle,
    Education,
    Retirement,
    Other,
}

/// A savings goal. Forecast outputs are computed by [`crate::goals::forecast`],
/// never stored here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    /// Not capped at the target
    pub current_amount: f64,
    pub target_date: NaiveDate,
    pub monthly_contribution: f64,
    pub category: GoalCategory,
}

impl Goal {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        target_amount: f64,
        current_amount: f64,
        target_date: NaiveDate,
        monthly_contribution: f64,
        category: GoalCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            target_amount,
            current_amount,
            target_date,
            monthly_contribution,
            category,
        }
    }

    /// Amount still needed; zero or negative means the goal is already met
    pub fn remaining(&self) -> f64 {
        self.target_amount - self.current_amount
    }

    pub fn is_met(&self) -> bool {
        self.remaining() <= 0.0
    }

    pub fn with_contribution(mut self, monthly_contribution: f64) -> Self {
        self.monthly_contribution = monthly_contribution;
        self
    }
}

/// One periodic snapshot of the household's finances
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialDataPoint {
    pub date: NaiveDate,
    pub networth: f64,
    pub income: f64,
    pub expenses: f64,
    /// Display subset of expenses; not reconciled against them
    pub spending: f64,
    pub cashflow: f64,
    pub change: f64,
    pub change_percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_transaction_creation() {
        let txn = Transaction::new(
            "t-001",
            date(2025, 10, 1),
            "Weekly groceries",
            "Whole Foods",
            -142.5,
            "Groceries",
            TransactionType::Expense,
            "acc-checking",
        )
        .with_note("split with roommate");
        assert!(txn.is_expense());
        assert_eq!(txn.abs_amount(), 142.5);
        assert_eq!(txn.note.as_deref(), Some("split with roommate"));
    }

    #[test]
    fn test_transaction_type_from_sign() {
        assert_eq!(TransactionType::from_sign(10.0), TransactionType::Income);
        assert_eq!(TransactionType::from_sign(-3.0), TransactionType::Expense);
        assert_eq!(TransactionType::from_sign(0.0), TransactionType::Transfer);
        assert_eq!("Expense".parse::<TransactionType>().unwrap(), TransactionType::Expense);
        assert!("refund".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_transaction_json_shape() {
        let txn = Transaction::new(
            "t-1",
            date(2025, 10, 2),
            "Paycheck",
            "Acme Corp",
            5000.0,
            "Salary",
            TransactionType::Income,
            "acc-1",
        );
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["accountId"], "acc-1");
        assert_eq!(json["date"], "2025-10-02");
        assert!(json.get("note").is_none());
    }

    #[test]
    fn test_investment_derived_fields() {
        let inv = Investment::new("i-1", "VTI", InvestmentCategory::Stocks, 11_000.0, 10_000.0, 100.0);
        assert_eq!(inv.total_gain_loss(), 1000.0);
        assert!((inv.total_gain_loss_percent() - 10.0).abs() < 1e-9);
        // previous-day basis: 100 / 10_900
        assert!((inv.daily_change_percent() - 100.0 / 10_900.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_investment_zero_basis_is_guarded() {
        let inv = Investment::new("i-2", "AIRDROP", InvestmentCategory::Crypto, 50.0, 0.0, 50.0);
        assert_eq!(inv.total_gain_loss_percent(), 0.0);
        assert_eq!(inv.daily_change_percent(), 0.0);
    }

    #[test]
    fn test_budget_category_helpers() {
        let rent = BudgetCategory::new("b-1", "Rent", 2000.0, 2000.0, Flexibility::Fixed);
        let dining = BudgetCategory::new("b-2", "Dining", 300.0, 420.0, Flexibility::Flexible);
        assert_eq!(rent.remaining(), 0.0);
        assert!(!rent.is_over_budget());
        assert_eq!(dining.remaining(), -120.0);
        assert!(dining.is_over_budget());
        assert!((dining.utilization_percent() - 140.0).abs() < 1e-9);

        let unbudgeted = BudgetCategory::new("b-3", "Misc", 0.0, 25.0, Flexibility::Flexible);
        assert_eq!(unbudgeted.utilization_percent(), 0.0);
    }

    #[test]
    fn test_goal_remaining_not_capped() {
        let goal = Goal::new(
            "g-1",
            "Vacation",
            3000.0,
            3500.0,
            date(2026, 6, 1),
            200.0,
            GoalCategory::Vacation,
        );
        assert_eq!(goal.remaining(), -500.0);
        assert!(goal.is_met());
    }

    #[test]
    fn test_account_liability_classification() {
        assert!(AccountType::Credit.is_liability());
        assert!(!AccountType::Savings.is_liability());
        let opened = date(2024, 1, 5);
        let card = Account::new("a-1", "Sapphire", "Chase", AccountType::Credit, -1250.0, opened);
        assert_eq!(card.sheet_value(), 1250.0);
        assert!(card.active);

        let refund = Account::new("a-2", "Freedom", "Chase", AccountType::Credit, 40.0, opened);
        assert_eq!(refund.sheet_value(), -40.0);
        let overdrawn =
            Account::new("a-3", "Checking", "Chase", AccountType::Checking, -75.0, opened);
        assert_eq!(overdrawn.sheet_value(), -75.0);
    }
}

//! finboard-core: derived financial metrics for the dashboard.
//!
//! Pure functions over an immutable [`RecordStore`] snapshot: filtering,
//! aggregation, time-series generation, roll-ups and goal forecasting.

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod goals;
pub mod records;
pub mod rollup;
pub mod series;
pub mod store;
pub mod tags;
pub mod time;

pub use aggregate::{
    Summary, group_by_date, income_expense_ratio, percent, ratio, savings_rate,
    spending_by_category, summarize,
};
pub use error::CoreError;
pub use filter::{DatePreset, DateRange, FilterCriteria, filter_transactions};
pub use goals::{
    GoalForecast, GoalStatus, RecommendationBasis, SuccessProbability, forecast, forecast_all,
    progress_percent,
};
pub use records::{
    Account, AccountType, BudgetCategory, FinancialDataPoint, Flexibility, Goal, GoalCategory,
    Investment, InvestmentCategory, Transaction, TransactionType,
};
pub use rollup::{
    BalanceSheet, Bucket, BudgetTotals, PortfolioSummary, Rollup, account_rollup, balance_sheet,
    budget_rollup, budget_totals, portfolio_rollup, portfolio_summary, rollup,
};
pub use series::{
    Granularity, MAX_SERIES_POINTS, NoiseAmplitude, NoiseSource, RngNoise, SeriesParams,
    SeriesStats, ZeroNoise, generate_series, series_stats,
};
pub use store::{AccountRef, RecordStore, Snapshot};
pub use tags::{CategoryTag, InstitutionTag};

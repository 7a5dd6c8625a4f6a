//! Goal forecaster: projected completion, schedule deviation, recommended
//! contribution and a bounded success score for a savings goal.
//!
//! Deterministic: the same goal, date and basis always give the same forecast.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::CoreError;
use crate::aggregate::{percent, ratio};
use crate::records::Goal;
use crate::time::{add_fractional_months, months_between};

/// Share of income recommended for savings when an income figure is supplied.
pub const DEFAULT_SAVINGS_RATE: f64 = 0.20;

/// Success score in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuccessProbability(f64);

impl SuccessProbability {
    /// Clamped to 0.0-1.0; NaN collapses to 0.0
    pub fn new(score: f64) -> Self {
        if score.is_nan() {
            return Self(0.0);
        }
        Self(score.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn as_percent(&self) -> f64 {
        self.0 * 100.0
    }
}

/// How the recommended monthly amount is derived
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecommendationBasis {
    /// `remaining / months until the target date`
    RemainingOverTime,
    /// A fixed share of a monthly income figure
    IncomeShare { monthly_income: f64, savings_rate: f64 },
}

impl RecommendationBasis {
    pub fn income_share(monthly_income: f64) -> Self {
        RecommendationBasis::IncomeShare {
            monthly_income,
            savings_rate: DEFAULT_SAVINGS_RATE,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if let RecommendationBasis::IncomeShare { monthly_income, savings_rate } = *self {
            if !monthly_income.is_finite() || monthly_income < 0.0 {
                return Err(CoreError::InvalidParameter(format!(
                    "monthly income must be a non-negative number, got {monthly_income}"
                )));
            }
            if !(0.0..=1.0).contains(&savings_rate) {
                return Err(CoreError::InvalidParameter(format!(
                    "savings rate must be within [0, 1], got {savings_rate}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    Completed,
    OnTrack,
    Behind,
    /// Money remaining but nothing being contributed
    Stalled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalForecast {
    pub goal_id: String,
    pub remaining: f64,
    /// Zero once the target date has passed
    pub months_until_target: f64,
    /// `None` when the goal never completes at the current rate
    pub months_needed: Option<f64>,
    pub projected_completion_date: Option<NaiveDate>,
    /// Positive = ahead of schedule, negative = behind
    pub months_ahead_or_behind: Option<f64>,
    pub recommended_monthly_amount: f64,
    pub success_probability: SuccessProbability,
    pub status: GoalStatus,
}

/// Current amount as a share of the target (not capped at 100).
pub fn progress_percent(goal: &Goal) -> f64 {
    percent(goal.current_amount, goal.target_amount)
}

pub fn recommended_monthly_amount(goal: &Goal, now: NaiveDate, basis: RecommendationBasis) -> f64 {
    let remaining = goal.remaining();
    if remaining <= 0.0 {
        return 0.0;
    }
    match basis {
        RecommendationBasis::IncomeShare { monthly_income, savings_rate } => {
            (monthly_income * savings_rate).max(0.0)
        }
        RecommendationBasis::RemainingOverTime => {
            let months = months_between(now, goal.target_date);
            // at or past the deadline the whole remainder is due now
            if months <= 1.0 { remaining } else { remaining / months }
        }
    }
}

pub fn forecast(goal: &Goal, now: NaiveDate, basis: RecommendationBasis) -> GoalForecast {
    let remaining = goal.remaining();
    let months_until_target = months_between(now, goal.target_date).max(0.0);
    let recommended = recommended_monthly_amount(goal, now, basis);
    let contribution = goal.monthly_contribution;

    let months_needed = if remaining <= 0.0 {
        Some(0.0)
    } else if contribution > 0.0 {
        let m = remaining / contribution;
        m.is_finite().then_some(m)
    } else {
        None
    };

    let projected_completion_date = months_needed.and_then(|m| add_fractional_months(now, m));
    let months_ahead_or_behind = months_needed.map(|m| months_until_target - m);

    let status = match months_ahead_or_behind {
        _ if remaining <= 0.0 => GoalStatus::Completed,
        None => GoalStatus::Stalled,
        Some(d) if d >= 0.0 => GoalStatus::OnTrack,
        Some(_) => GoalStatus::Behind,
    };

    let success_probability = if remaining <= 0.0 {
        SuccessProbability::new(1.0)
    } else {
        score(goal, months_until_target, months_ahead_or_behind, contribution, recommended)
    };

    GoalForecast {
        goal_id: goal.id.clone(),
        remaining,
        months_until_target,
        months_needed,
        projected_completion_date,
        months_ahead_or_behind,
        recommended_monthly_amount: recommended,
        success_probability,
        status,
    }
}

/// Weighted heuristic:
/// - 0.5 schedule: 0.5 when exactly on time, rising toward 1 when ahead
/// - 0.3 coverage: contribution vs. recommended amount
/// - 0.2 progress: share of the target already saved
///
/// Every term is non-decreasing in the contribution.
fn score(
    goal: &Goal,
    months_until_target: f64,
    months_ahead_or_behind: Option<f64>,
    contribution: f64,
    recommended: f64,
) -> SuccessProbability {
    let horizon = months_until_target.max(1.0);
    let schedule = match months_ahead_or_behind {
        None => 0.0,
        Some(d) => (0.5 + d / (2.0 * horizon)).clamp(0.0, 1.0),
    };
    let coverage = if recommended > 0.0 {
        ratio(contribution, recommended).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let progress = ratio(goal.current_amount, goal.target_amount).clamp(0.0, 1.0);

    SuccessProbability::new(0.5 * schedule + 0.3 * coverage + 0.2 * progress)
}

pub fn forecast_all(
    goals: &[Goal],
    now: NaiveDate,
    basis: RecommendationBasis,
) -> Vec<GoalForecast> {
    goals.iter().map(|g| forecast(g, now, basis)).collect()
}

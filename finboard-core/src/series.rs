//! Time-series generator: periodic net-worth / cash-flow snapshots at a
//! requested granularity.
//!
//! Net worth moves only through cash flow plus a market-drift term, so
//! `networth[t] - networth[t-1] == change[t]` for every point after the first.
//! Randomness comes in through [`NoiseSource`] so a seeded source reproduces
//! the same series.

use chrono::{Duration, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::CoreError;
use crate::aggregate::{percent, ratio};
use crate::records::FinancialDataPoint;

/// Upper bound on a single series request.
pub const MAX_SERIES_POINTS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Granularity {
    /// How many of these periods fit in one month
    pub fn periods_per_month(&self) -> f64 {
        match self {
            Granularity::Daily => 30.0,
            Granularity::Weekly => 4.33,
            Granularity::Monthly => 1.0,
            Granularity::Yearly => 1.0 / 12.0,
        }
    }

    /// The date `periods` steps before `anchor`.
    pub fn offset_back(&self, anchor: NaiveDate, periods: u32) -> Option<NaiveDate> {
        match self {
            Granularity::Daily => anchor.checked_sub_signed(Duration::days(periods as i64)),
            Granularity::Weekly => anchor.checked_sub_signed(Duration::weeks(periods as i64)),
            Granularity::Monthly => anchor.checked_sub_months(Months::new(periods)),
            Granularity::Yearly => anchor.checked_sub_months(Months::new(periods.checked_mul(12)?)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
            Granularity::Yearly => "yearly",
        }
    }
}

impl std::str::FromStr for Granularity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Ok(Granularity::Daily),
            "weekly" | "week" => Ok(Granularity::Weekly),
            "monthly" | "month" => Ok(Granularity::Monthly),
            "yearly" | "year" | "annual" => Ok(Granularity::Yearly),
            other => Err(CoreError::InvalidParameter(format!("unknown granularity '{other}'"))),
        }
    }
}

/// A source of noise draws uniformly distributed in `[-1, 1]`.
pub trait NoiseSource {
    fn next_unit(&mut self) -> f64;
}

/// Adapts any `rand` RNG into a [`NoiseSource`].
#[derive(Debug, Clone)]
pub struct RngNoise<R>(pub R);

impl RngNoise<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        RngNoise(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        RngNoise(StdRng::from_entropy())
    }
}

impl<R: Rng> NoiseSource for RngNoise<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen_range(-1.0..=1.0)
    }
}

/// Always 0: produces the noiseless baseline trajectory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    fn next_unit(&mut self) -> f64 {
        0.0
    }
}

/// Noise amplitudes, each a fraction of the value it perturbs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoiseAmplitude {
    /// Of per-period income
    pub income: f64,
    /// Of per-period expenses
    pub expenses: f64,
    /// Of the point's expenses, on top of the spending ratio
    pub spending: f64,
    /// Of the previous point's net worth
    pub market: f64,
}

impl Default for NoiseAmplitude {
    fn default() -> Self {
        Self {
            income: 0.10,
            expenses: 0.10,
            spending: 0.05,
            market: 0.005,
        }
    }
}

impl NoiseAmplitude {
    pub fn none() -> Self {
        Self {
            income: 0.0,
            expenses: 0.0,
            spending: 0.0,
            market: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesParams {
    pub granularity: Granularity,
    pub points: usize,
    pub start_value: f64,
    /// Monthly baseline
    pub base_income: f64,
    /// Monthly baseline
    pub base_expenses: f64,
    pub noise: NoiseAmplitude,
    /// Share of expenses shown as discretionary spending
    pub spending_ratio: f64,
    /// Date of the newest point
    pub anchor: NaiveDate,
}

impl SeriesParams {
    pub fn new(granularity: Granularity, points: usize, anchor: NaiveDate) -> Self {
        Self {
            granularity,
            points,
            start_value: 50_000.0,
            base_income: 6_000.0,
            base_expenses: 4_500.0,
            noise: NoiseAmplitude::default(),
            spending_ratio: 0.7,
            anchor,
        }
    }

    pub fn with_baseline(mut self, start_value: f64, base_income: f64, base_expenses: f64) -> Self {
        self.start_value = start_value;
        self.base_income = base_income;
        self.base_expenses = base_expenses;
        self
    }

    pub fn with_noise(mut self, noise: NoiseAmplitude) -> Self {
        self.noise = noise;
        self
    }

    pub fn with_spending_ratio(mut self, ratio: f64) -> Self {
        self.spending_ratio = ratio;
        self
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.points > MAX_SERIES_POINTS {
            debug!(requested = self.points, max = MAX_SERIES_POINTS, "series request rejected");
            return Err(CoreError::SeriesTooLong {
                requested: self.points,
                max: MAX_SERIES_POINTS,
            });
        }
        for (name, v) in [
            ("start_value", self.start_value),
            ("base_income", self.base_income),
            ("base_expenses", self.base_expenses),
        ] {
            if !v.is_finite() {
                return Err(CoreError::InvalidParameter(format!("{name} must be finite")));
            }
        }
        let n = &self.noise;
        for (name, v) in [
            ("income noise", n.income),
            ("expense noise", n.expenses),
            ("spending noise", n.spending),
            ("market noise", n.market),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(CoreError::InvalidParameter(format!(
                    "{name} must be a non-negative number, got {v}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.spending_ratio) {
            return Err(CoreError::InvalidParameter(format!(
                "spending ratio must be within [0, 1], got {}",
                self.spending_ratio
            )));
        }
        Ok(())
    }
}

/// Generate `params.points` snapshots, oldest first, ending at `params.anchor`.
pub fn generate_series(
    params: &SeriesParams,
    noise: &mut impl NoiseSource,
) -> Result<Vec<FinancialDataPoint>, CoreError> {
    params.validate()?;

    let ppm = params.granularity.periods_per_month();
    let per_income = params.base_income / ppm;
    let per_expenses = params.base_expenses / ppm;
    let amp = params.noise;

    let mut out: Vec<FinancialDataPoint> = Vec::with_capacity(params.points);
    for i in 0..params.points {
        let back = (params.points - 1 - i) as u32;
        let date = params
            .granularity
            .offset_back(params.anchor, back)
            .ok_or_else(|| {
                CoreError::InvalidParameter(format!(
                    "{} {} periods before {} is out of range",
                    back,
                    params.granularity.as_str(),
                    params.anchor
                ))
            })?;

        let income = (per_income * (1.0 + amp.income * noise.next_unit())).round().max(0.0);
        let expenses = (per_expenses * (1.0 + amp.expenses * noise.next_unit())).round().max(0.0);
        let spending = (expenses * (params.spending_ratio + amp.spending * noise.next_unit()))
            .round()
            .max(0.0);
        let cashflow = income - expenses;

        let (networth, change, change_percent) = match out.last() {
            None => (params.start_value.round(), 0.0, 0.0),
            Some(prev) => {
                let market = prev.networth * amp.market * noise.next_unit();
                let networth = (prev.networth + cashflow + market).round();
                let change = networth - prev.networth;
                (networth, change, percent(change, prev.networth))
            }
        };

        out.push(FinancialDataPoint {
            date,
            networth,
            income,
            expenses,
            spending,
            cashflow,
            change,
            change_percent,
        });
    }

    Ok(out)
}

/// Headline numbers over a generated series
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStats {
    pub total_change: f64,
    pub total_change_percent: f64,
    pub average_cashflow: f64,
    pub best_period: Option<NaiveDate>,
    pub worst_period: Option<NaiveDate>,
}

pub fn series_stats(points: &[FinancialDataPoint]) -> SeriesStats {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return SeriesStats::default();
    };
    let total_change = last.networth - first.networth;
    let cashflow: f64 = points.iter().map(|p| p.cashflow).sum();

    // the first point's change is zero by convention, so rank from the second on
    let ranked = points.get(1..).unwrap_or(&[]);
    let best = ranked
        .iter()
        .max_by(|a, b| a.change.total_cmp(&b.change))
        .map(|p| p.date);
    let worst = ranked
        .iter()
        .min_by(|a, b| a.change.total_cmp(&b.change))
        .map(|p| p.date);

    SeriesStats {
        total_change,
        total_change_percent: percent(total_change, first.networth),
        average_cashflow: ratio(cashflow, points.len() as f64),
        best_period: best,
        worst_period: worst,
    }
}

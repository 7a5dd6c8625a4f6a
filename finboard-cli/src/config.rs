use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use finboard_core::goals::DEFAULT_SAVINGS_RATE;
use finboard_core::{Granularity, NoiseAmplitude, RecommendationBasis, SeriesParams};

use crate::state::ensure_finboard_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataSection,
    pub series: SeriesSection,
    pub forecast: ForecastSection,
    pub assistant: AssistantSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSection {
    /// JSON snapshot to load; the demo dataset is used when unset
    pub snapshot: Option<PathBuf>,
    /// IANA timezone used to decide what "today" is
    pub timezone: String,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            snapshot: None,
            timezone: "America/Chicago".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesSection {
    pub start_value: f64,
    pub base_income: f64,
    pub base_expenses: f64,
    pub income_noise: f64,
    pub expense_noise: f64,
    pub spending_noise: f64,
    pub market_noise: f64,
    pub spending_ratio: f64,
    /// Fixed seed for reproducible series; fresh entropy when unset
    pub seed: Option<u64>,
}

impl Default for SeriesSection {
    fn default() -> Self {
        let noise = NoiseAmplitude::default();
        Self {
            start_value: 50_000.0,
            base_income: 6_000.0,
            base_expenses: 4_500.0,
            income_noise: noise.income,
            expense_noise: noise.expenses,
            spending_noise: noise.spending,
            market_noise: noise.market,
            spending_ratio: 0.7,
            seed: None,
        }
    }
}

impl SeriesSection {
    pub fn params(
        &self,
        granularity: Granularity,
        points: usize,
        anchor: chrono::NaiveDate,
    ) -> SeriesParams {
        SeriesParams::new(granularity, points, anchor)
            .with_baseline(self.start_value, self.base_income, self.base_expenses)
            .with_noise(NoiseAmplitude {
                income: self.income_noise,
                expenses: self.expense_noise,
                spending: self.spending_noise,
                market: self.market_noise,
            })
            .with_spending_ratio(self.spending_ratio)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSection {
    pub savings_rate: f64,
    /// When set, recommendations are a share of this income instead of remaining / time
    pub monthly_income: Option<f64>,
}

impl Default for ForecastSection {
    fn default() -> Self {
        Self {
            savings_rate: DEFAULT_SAVINGS_RATE,
            monthly_income: None,
        }
    }
}

impl ForecastSection {
    /// `--income` beats the configured income; neither means remaining / time.
    pub fn basis(&self, income_override: Option<f64>) -> RecommendationBasis {
        match income_override.or(self.monthly_income) {
            Some(monthly_income) => RecommendationBasis::IncomeShare {
                monthly_income,
                savings_rate: self.savings_rate,
            },
            None => RecommendationBasis::RemainingOverTime,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantSection {
    /// TOML response table replacing the built-in replies
    pub responses: Option<PathBuf>,
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_finboard_home()?.join("config.toml"))
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg = parse_config(
            r#"
[data]
timezone = "Europe/Berlin"

[series]
seed = 42
market_noise = 0.0
"#,
        )
        .unwrap();
        assert_eq!(cfg.data.timezone, "Europe/Berlin");
        assert!(cfg.data.snapshot.is_none());
        assert_eq!(cfg.series.seed, Some(42));
        assert_eq!(cfg.series.market_noise, 0.0);
        assert_eq!(cfg.series.spending_ratio, 0.7);
        assert_eq!(cfg.forecast.savings_rate, 0.20);
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(parse_config(&text).unwrap(), cfg);
    }

    #[test]
    fn test_forecast_basis_precedence() {
        let mut section = ForecastSection::default();
        assert_eq!(section.basis(None), RecommendationBasis::RemainingOverTime);

        section.monthly_income = Some(5_000.0);
        assert_eq!(
            section.basis(Some(8_000.0)),
            RecommendationBasis::IncomeShare { monthly_income: 8_000.0, savings_rate: 0.20 }
        );
        assert_eq!(
            section.basis(None),
            RecommendationBasis::IncomeShare { monthly_income: 5_000.0, savings_rate: 0.20 }
        );
    }

    #[test]
    fn test_series_params_from_section() {
        let anchor = chrono::NaiveDate::from_ymd_opt(2025, 10, 16).unwrap();
        let params = SeriesSection::default().params(Granularity::Weekly, 8, anchor);
        assert_eq!(params.points, 8);
        assert_eq!(params.noise, NoiseAmplitude::default());
        assert_eq!(params.anchor, anchor);
    }
}

//! Time utilities: reference dates, strict date parsing, month arithmetic.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// Average Gregorian month length in days.
pub const AVG_DAYS_PER_MONTH: f64 = 30.44;

/// Resolve the calendar day it currently is in an IANA tz like "America/Chicago".
pub fn today_in_tz(tz: &str, now_utc: DateTime<Utc>) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(now_utc.with_timezone(&tz).date_naive())
}

/// Parse a YYYY-MM-DD date. Anything else is rejected.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

/// Fractional months from `from` to `to` (negative when `to` is earlier).
pub fn months_between(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64 / AVG_DAYS_PER_MONTH
}

/// Move `from` forward by a fractional number of months, rounding up to whole days.
pub fn add_fractional_months(from: NaiveDate, months: f64) -> Option<NaiveDate> {
    if !months.is_finite() || months < 0.0 {
        return None;
    }
    let days = (months * AVG_DAYS_PER_MONTH).ceil();
    // chrono's date range tops out around year 262_000
    if days > 36_500_000.0 {
        return None;
    }
    from.checked_add_signed(Duration::days(days as i64))
}

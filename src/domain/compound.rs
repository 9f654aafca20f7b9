//! Compound-growth projection over a monthly contribution schedule.
//!
//! FV = C * (1 + i)^n + PMT * ((1 + i)^n - 1) / i
//!
//! Contributed and total values are rounded to cents on output; the unrounded
//! total is kept alongside for chained recomputation.

use std::str::FromStr;

use crate::domain::numeric::{parse_count, parse_decimal, round_to};

/// Months between two points of the projection series.
pub const SERIES_STEP: u32 = 12;

/// Longest projection a form can request: 100 years of monthly periods.
/// Longer durations are clamped so the series stays bounded.
pub const MAX_PERIODS: u32 = 1200;

/// What to do when the periodic rate is exactly zero, where the annuity term
/// divides by zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroRatePolicy {
    /// Use the limit of the annuity term as the rate tends to zero:
    /// `contribution * periods`.
    #[default]
    ArithmeticLimit,
    /// Divide by the raw rate and let NaN/infinity through.
    NonFinite,
}

impl FromStr for ZeroRatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "limit" => Ok(ZeroRatePolicy::ArithmeticLimit),
            "nonfinite" | "non-finite" | "raw" => Ok(ZeroRatePolicy::NonFinite),
            other => Err(format!("unknown zero-rate policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundInput {
    pub monthly_contribution: f64,
    pub initial_capital: f64,
    /// Rate per period as a fraction (0.01 = 1%).
    pub periodic_rate: f64,
    pub period_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub total_contributed: f64,
    pub total_value: f64,
    pub total_interest: f64,
    pub period_count: u32,
    /// `total_value` before rounding.
    pub exact_value: f64,
}

/// Project with the default [`ZeroRatePolicy::ArithmeticLimit`].
pub fn project(
    monthly_contribution: f64,
    initial_capital: f64,
    periodic_rate: f64,
    period_count: u32,
) -> Projection {
    project_with(
        monthly_contribution,
        initial_capital,
        periodic_rate,
        period_count,
        ZeroRatePolicy::default(),
    )
}

pub fn project_with(
    monthly_contribution: f64,
    initial_capital: f64,
    periodic_rate: f64,
    period_count: u32,
    policy: ZeroRatePolicy,
) -> Projection {
    let n = period_count as f64;
    let growth = (1.0 + periodic_rate).powf(n);

    let contributed = n * monthly_contribution + initial_capital;
    let principal_value = initial_capital * growth;
    let annuity_value = if periodic_rate == 0.0 && policy == ZeroRatePolicy::ArithmeticLimit {
        monthly_contribution * n
    } else {
        monthly_contribution * (growth - 1.0) / periodic_rate
    };
    let exact_value = principal_value + annuity_value;

    Projection {
        total_contributed: round_to(contributed, 2),
        total_value: round_to(exact_value, 2),
        total_interest: round_to(exact_value - contributed, 2),
        period_count,
        exact_value,
    }
}

/// Period counts sampled by [`project_series`]: 0, 12, 24, ... and always the
/// final period.
pub fn series_periods(period_count: u32) -> Vec<u32> {
    let mut periods: Vec<u32> = (0..=period_count).step_by(SERIES_STEP as usize).collect();
    if periods.last() != Some(&period_count) {
        periods.push(period_count);
    }
    periods
}

/// One projection per sampled period, for charting growth over time.
pub fn project_series(input: &CompoundInput, policy: ZeroRatePolicy) -> Vec<Projection> {
    series_periods(input.period_count)
        .into_iter()
        .map(|n| {
            project_with(
                input.monthly_contribution,
                input.initial_capital,
                input.periodic_rate,
                n,
                policy,
            )
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RatePeriod {
    #[default]
    Monthly,
    Annual,
}

impl FromStr for RatePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" | "mensal" => Ok(RatePeriod::Monthly),
            "annual" | "yearly" | "year" | "anual" => Ok(RatePeriod::Annual),
            other => Err(format!("unknown rate period '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DurationUnit {
    #[default]
    Months,
    Years,
}

impl FromStr for DurationUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "months" | "month" | "meses" => Ok(DurationUnit::Months),
            "years" | "year" | "anos" => Ok(DurationUnit::Years),
            other => Err(format!("unknown duration unit '{other}'")),
        }
    }
}

/// Raw form fields as typed by the user. `rate` is a percentage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundForm {
    pub capital: String,
    pub monthly_contribution: String,
    pub rate: String,
    pub rate_period: RatePeriod,
    pub duration: String,
    pub duration_unit: DurationUnit,
}

impl CompoundForm {
    /// Period count as typed, before clamping to [`MAX_PERIODS`].
    pub fn requested_periods(&self) -> u32 {
        let duration = parse_count(&self.duration);
        match self.duration_unit {
            DurationUnit::Months => duration,
            DurationUnit::Years => duration.saturating_mul(12),
        }
    }

    /// Convert to numeric input. Unparseable fields become zero, an annual rate
    /// is converted to its equivalent monthly rate and the period count is
    /// clamped to [`MAX_PERIODS`].
    pub fn to_input(&self) -> CompoundInput {
        let rate = parse_decimal(&self.rate) / 100.0;
        let periodic_rate = match self.rate_period {
            RatePeriod::Monthly => rate,
            RatePeriod::Annual => (1.0 + rate).powf(1.0 / 12.0) - 1.0,
        };
        let period_count = self.requested_periods().min(MAX_PERIODS);

        CompoundInput {
            monthly_contribution: parse_decimal(&self.monthly_contribution),
            initial_capital: parse_decimal(&self.capital),
            periodic_rate,
            period_count,
        }
    }
}

//! Risk/reward management table.
//!
//! The capital at risk is spread top-down over the calendar: per month, then
//! per week, per day and per operation. Gain targets follow from the loss
//! budget through the payoff multiplier.
//!
//! Aggregate totals weight the loss side by `(1 - win_rate)`. The gain side is
//! weighted by `win_rate` for Positive and Negative payoffs and by 1 for
//! Neutral.

use std::fmt;
use std::str::FromStr;

use crate::domain::numeric::parse_decimal;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PayoffMode {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl PayoffMode {
    /// Gain target as a multiple of the loss budget.
    pub fn multiplier(self) -> f64 {
        match self {
            PayoffMode::Negative => 0.5,
            PayoffMode::Neutral => 1.0,
            PayoffMode::Positive => 2.0,
        }
    }

    /// Weight applied to the aggregate gain total.
    pub fn gain_weight(self, win_rate: f64) -> f64 {
        match self {
            PayoffMode::Neutral => 1.0,
            PayoffMode::Positive | PayoffMode::Negative => win_rate,
        }
    }
}

impl FromStr for PayoffMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" | "positivo" => Ok(PayoffMode::Positive),
            "neutral" | "neutro" => Ok(PayoffMode::Neutral),
            "negative" | "negativo" => Ok(PayoffMode::Negative),
            other => Err(format!("unknown payoff mode '{other}'")),
        }
    }
}

impl fmt::Display for PayoffMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayoffMode::Positive => "positive",
            PayoffMode::Neutral => "neutral",
            PayoffMode::Negative => "negative",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskInput {
    pub capital: f64,
    /// Fraction of winning operations, 0 to 1.
    pub win_rate: f64,
    pub months: f64,
    pub weeks_per_month: f64,
    pub days_per_week: f64,
    pub operations_per_day: f64,
    pub payoff: PayoffMode,
}

/// Stop-loss and take-profit for one slice of the calendar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Budget {
    pub stop_loss: f64,
    pub take_profit: f64,
}

impl Budget {
    fn from_loss(loss: f64, payoff: PayoffMode) -> Self {
        Self {
            stop_loss: loss,
            take_profit: loss * payoff.multiplier(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskTable {
    pub per_operation: Budget,
    pub per_day: Budget,
    pub per_week: Budget,
    pub per_month: Budget,
    pub total_operations: f64,
    pub gain_total: f64,
    pub loss_total: f64,
    /// `gain_total - loss_total`.
    pub projected_balance: f64,
}

/// Build the management table. Zero divisors give NaN or infinity in the
/// affected fields rather than an error.
pub fn compute_risk_table(input: &RiskInput) -> RiskTable {
    let loss_per_month = input.capital / input.months;
    let loss_per_week = loss_per_month / input.weeks_per_month;
    let loss_per_day = loss_per_week / input.days_per_week;
    let loss_per_operation = loss_per_day / input.operations_per_day;

    let per_operation = Budget::from_loss(loss_per_operation, input.payoff);
    let total_operations =
        input.months * input.weeks_per_month * input.days_per_week * input.operations_per_day;

    let loss_total = total_operations * per_operation.stop_loss * (1.0 - input.win_rate);
    let gain_total =
        total_operations * per_operation.take_profit * input.payoff.gain_weight(input.win_rate);

    RiskTable {
        per_operation,
        per_day: Budget::from_loss(loss_per_day, input.payoff),
        per_week: Budget::from_loss(loss_per_week, input.payoff),
        per_month: Budget::from_loss(loss_per_month, input.payoff),
        total_operations,
        gain_total,
        loss_total,
        projected_balance: gain_total - loss_total,
    }
}

/// Raw form fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskForm {
    pub capital: String,
    pub win_rate: String,
    pub months: String,
    pub weeks_per_month: String,
    pub days_per_week: String,
    pub operations_per_day: String,
    pub payoff: PayoffMode,
}

impl RiskForm {
    pub fn to_input(&self) -> RiskInput {
        RiskInput {
            capital: parse_decimal(&self.capital),
            win_rate: parse_decimal(&self.win_rate),
            months: parse_decimal(&self.months),
            weeks_per_month: parse_decimal(&self.weeks_per_month),
            days_per_week: parse_decimal(&self.days_per_week),
            operations_per_day: parse_decimal(&self.operations_per_day),
            payoff: self.payoff,
        }
    }
}

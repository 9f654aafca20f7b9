//! Position-size ("lot") calculator.
//!
//! lot = loss_budget / point_distance, divided by a fixed cross rate for pairs
//! quoted against a non-USD currency. A reference table maps standard lot
//! increments to the point distance that spends the same loss budget.

use std::fmt;
use std::ops::Index;

use crate::domain::numeric::{parse_decimal, round_to};

/// Approximate USD/JPY cross divisor. Fixed, not a live rate.
pub const USDJPY_DIVISOR: f64 = 0.754;
/// Approximate USD/CHF cross divisor. Fixed, not a live rate.
pub const USDCHF_DIVISOR: f64 = 1.125;
/// Approximate USD/CAD cross divisor. Fixed, not a live rate.
pub const USDCAD_DIVISOR: f64 = 0.739;

/// Point-distance scale applied to index rows of the reference table.
pub const INDEX_POINT_SCALE: f64 = 100.0;

const TABLE_ROWS: u32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Instrument {
    Gold,
    #[default]
    MajorPair,
    UsdJpy,
    UsdChf,
    UsdCad,
    Index,
}

impl Instrument {
    /// Resolve a selector such as `XAUUSD`, `EURUSD`, `USDJPY` or `US30`.
    pub fn try_from_selector(selector: &str) -> Option<Self> {
        let key: String = selector
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_uppercase();
        let instrument = match key.as_str() {
            "GOLD" | "XAU" | "XAUUSD" | "METAL" | "METALS" => Instrument::Gold,
            "MAJOR" | "FOREX" | "EURUSD" | "GBPUSD" | "AUDUSD" | "NZDUSD" => {
                Instrument::MajorPair
            }
            "USDJPY" | "JPY" => Instrument::UsdJpy,
            "USDCHF" | "CHF" => Instrument::UsdChf,
            "USDCAD" | "CAD" => Instrument::UsdCad,
            "INDEX" | "INDICES" | "US30" | "US100" | "NAS100" | "US500" | "SPX500" | "GER40"
            | "DE40" => Instrument::Index,
            _ => return None,
        };
        Some(instrument)
    }

    /// Like [`Instrument::try_from_selector`], degrading to [`Instrument::MajorPair`].
    pub fn from_selector(selector: &str) -> Self {
        Self::try_from_selector(selector).unwrap_or_default()
    }

    /// Cross-rate divisor applied to the headline lot size.
    pub fn divisor(self) -> f64 {
        match self {
            Instrument::UsdJpy => USDJPY_DIVISOR,
            Instrument::UsdChf => USDCHF_DIVISOR,
            Instrument::UsdCad => USDCAD_DIVISOR,
            Instrument::Gold | Instrument::MajorPair | Instrument::Index => 1.0,
        }
    }

    /// Decimal places used for every output of this instrument class.
    pub fn precision(self) -> u32 {
        match self {
            Instrument::Gold | Instrument::MajorPair => 3,
            Instrument::Index => 6,
            Instrument::UsdJpy | Instrument::UsdCad => 5,
            Instrument::UsdChf => 4,
        }
    }

    /// Lot increments listed in the reference table.
    pub fn lot_increments(self) -> Vec<f64> {
        let unit = match self {
            Instrument::Index => 10.0,
            _ => 100.0,
        };
        (1..=TABLE_ROWS).map(|step| step as f64 / unit).collect()
    }

    fn lot_label(self, lot: f64) -> String {
        match self {
            Instrument::Index => format!("{lot:.1}"),
            _ => format!("{lot:.2}"),
        }
    }

    fn point_scale(self) -> f64 {
        match self {
            Instrument::Index => INDEX_POINT_SCALE,
            _ => 1.0,
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Instrument::Gold => "XAUUSD",
            Instrument::MajorPair => "major pair",
            Instrument::UsdJpy => "USDJPY",
            Instrument::UsdChf => "USDCHF",
            Instrument::UsdCad => "USDCAD",
            Instrument::Index => "index",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LotRow {
    pub label: String,
    pub lot_size: f64,
    pub required_points: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LotTable {
    pub rows: Vec<LotRow>,
}

impl LotTable {
    pub fn get(&self, label: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.required_points)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Index<&str> for LotTable {
    type Output = f64;

    fn index(&self, label: &str) -> &f64 {
        match self.rows.iter().find(|row| row.label == label) {
            Some(row) => &row.required_points,
            None => panic!("no lot row labelled {label}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LotInput {
    pub instrument: Instrument,
    pub loss_budget: f64,
    pub point_distance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LotResult {
    pub instrument: Instrument,
    pub lot_size: f64,
    pub table: LotTable,
}

/// Lot size for the loss budget plus the reference table. A zero point
/// distance yields an infinite or NaN lot size.
pub fn compute_lots(input: &LotInput) -> LotResult {
    let instrument = input.instrument;
    let precision = instrument.precision();
    let lot_size = input.loss_budget / input.point_distance / instrument.divisor();

    let rows = instrument
        .lot_increments()
        .into_iter()
        .map(|lot| LotRow {
            label: instrument.lot_label(lot),
            lot_size: lot,
            required_points: round_to(
                input.loss_budget / lot * instrument.point_scale(),
                precision,
            ),
        })
        .collect();

    LotResult {
        instrument,
        lot_size: round_to(lot_size, precision),
        table: LotTable { rows },
    }
}

/// Raw form fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LotForm {
    pub instrument: String,
    pub loss: String,
    pub points: String,
}

impl LotForm {
    pub fn to_input(&self) -> LotInput {
        LotInput {
            instrument: Instrument::from_selector(&self.instrument),
            loss_budget: parse_decimal(&self.loss),
            point_distance: parse_decimal(&self.points),
        }
    }
}

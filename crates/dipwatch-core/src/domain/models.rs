use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::Ticker;

/// Asset-class tag selecting which advice cascade applies to an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetClass {
    UsGrowth,
    UsBroad,
    Gold,
    CnGrowth,
    CnValue,
}

impl AssetClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UsGrowth => "us-growth",
            Self::UsBroad => "us-broad",
            Self::Gold => "gold",
            Self::CnGrowth => "cn-growth",
            Self::CnValue => "cn-value",
        }
    }
}

impl Display for AssetClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-instrument advice thresholds, in percent.
///
/// `deep_low < low <= high` is expected but not enforced: a table that
/// violates it leaves later cascade branches unreachable, exactly as the
/// classifier evaluates them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub low: f64,
    pub deep_low: f64,
    pub high: f64,
}

impl Thresholds {
    pub const fn new(low: f64, deep_low: f64, high: f64) -> Self {
        Self {
            low,
            deep_low,
            high,
        }
    }
}

/// Immutable configuration for one evaluated instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Display label for report sections.
    pub name: String,
    pub primary: Ticker,
    /// Foreign proxy substituted when the primary history is unusable.
    pub backup: Option<Ticker>,
    pub asset_class: AssetClass,
    pub currency_symbol: String,
    pub thresholds: Thresholds,
}

impl InstrumentConfig {
    pub fn new(
        name: impl Into<String>,
        primary: Ticker,
        backup: Option<Ticker>,
        asset_class: AssetClass,
        currency_symbol: impl Into<String>,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            name: name.into(),
            primary,
            backup,
            asset_class,
            currency_symbol: currency_symbol.into(),
            thresholds,
        }
    }
}

/// Severity bucket attached to each advice message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceLevel {
    Opportunity,
    Normal,
    Risk,
}

/// Classifier output for one instrument and run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advice {
    pub text: String,
    pub level: AdviceLevel,
}

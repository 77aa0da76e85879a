use serde::Serialize;
use time::Date;

use crate::domain::Ticker;
use crate::error::ValidationError;

/// One cleaned daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: Date,
    pub close: f64,
}

/// Date-ordered daily closes for one identifier.
///
/// Construction cleans the input: non-finite closes are dropped, rows are
/// sorted by date, and duplicate dates are collapsed. The stored invariant
/// is therefore strictly increasing dates with finite closes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    ticker: Ticker,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Minimum usable length: the moving-average/high-water window.
    pub const MIN_ROWS: usize = 250;

    pub fn from_points(ticker: Ticker, points: Vec<PricePoint>) -> Self {
        let mut points: Vec<PricePoint> = points
            .into_iter()
            .filter(|point| point.close.is_finite())
            .collect();
        points.sort_by_key(|point| point.date);
        points.dedup_by_key(|point| point.date);

        Self { ticker, points }
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.points.last().map(|point| point.close)
    }
}

/// Point-in-time quote from the low-latency onshore source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealtimeQuote {
    price: f64,
    prior_close: f64,
}

impl RealtimeQuote {
    pub fn new(price: f64, prior_close: f64) -> Result<Self, ValidationError> {
        if !price.is_finite() {
            return Err(ValidationError::NonFiniteValue { field: "price" });
        }
        if !prior_close.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                field: "prior_close",
            });
        }
        if prior_close <= 0.0 {
            return Err(ValidationError::NonPositivePriorClose { value: prior_close });
        }

        Ok(Self { price, prior_close })
    }

    pub fn price(self) -> f64 {
        self.price
    }

    pub fn prior_close(self) -> f64 {
        self.prior_close
    }

    /// Day-over-day change relative to the prior close, in percent.
    pub fn change_pct(self) -> f64 {
        (self.price - self.prior_close) / self.prior_close * 100.0
    }
}

/// Trend metrics computed once per instrument per run.
///
/// Values are unrounded; rendering rounds to two decimals for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub price: f64,
    pub daily_change_pct: f64,
    pub ma250: f64,
    pub high250: f64,
    pub bias_pct: f64,
    pub drawdown_pct: f64,
}

//! Domain types for the dipwatch signal engine.
//!
//! All models validate their invariants at construction time:
//!
//! - [`Ticker`] — normalized instrument identifier
//! - [`InstrumentConfig`] / [`Thresholds`] — per-instrument configuration
//! - [`PriceSeries`] — cleaned, date-ordered daily closes
//! - [`RealtimeQuote`] — fresher intraday price overlay
//! - [`IndicatorSnapshot`] — per-run computed trend metrics
//! - [`Advice`] / [`AdviceLevel`] — classifier output
//! - [`UtcDateTime`] — UTC report timestamp

mod models;
mod series;
mod ticker;
mod timestamp;

pub use models::{Advice, AdviceLevel, AssetClass, InstrumentConfig, Thresholds};
pub use series::{IndicatorSnapshot, PricePoint, PriceSeries, RealtimeQuote};
pub use ticker::Ticker;
pub use timestamp::UtcDateTime;

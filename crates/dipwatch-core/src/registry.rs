//! Static instrument registry.
//!
//! The watchlist is configuration data, not logic: threshold tuning happens
//! here and never touches the classifier.

use crate::domain::{AssetClass, InstrumentConfig, Thresholds, Ticker};

/// The instruments evaluated on every run, in report order.
pub fn default_registry() -> Vec<InstrumentConfig> {
    [
        (
            "Nasdaq 100 ETF",
            "QQQ",
            None,
            AssetClass::UsGrowth,
            "$",
            Thresholds::new(0.0, -10.0, 15.0),
        ),
        (
            "S&P 500 ETF",
            "SPY",
            None,
            AssetClass::UsBroad,
            "$",
            Thresholds::new(0.0, -10.0, 15.0),
        ),
        (
            "Gold ETF",
            "GLD",
            None,
            AssetClass::Gold,
            "$",
            Thresholds::new(2.0, -5.0, 15.0),
        ),
        (
            "CSI 300 ETF",
            "510300.SS",
            Some("ASHR"),
            AssetClass::CnValue,
            "¥",
            Thresholds::new(0.0, -10.0, 15.0),
        ),
        (
            "ChiNext ETF",
            "159915.SZ",
            Some("CNXT"),
            AssetClass::CnGrowth,
            "¥",
            Thresholds::new(-10.0, -25.0, 25.0),
        ),
    ]
    .into_iter()
    .map(|(name, primary, backup, asset_class, currency, thresholds)| {
        InstrumentConfig::new(
            name,
            Ticker::parse(primary).expect("registry tickers are valid"),
            backup.map(|raw| Ticker::parse(raw).expect("registry tickers are valid")),
            asset_class,
            currency,
            thresholds,
        )
    })
    .collect()
}

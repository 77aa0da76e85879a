//! Per-run evaluation driver.
//!
//! Walks the registry sequentially, applies the primary -> backup fallback
//! for the historical series, overlays the realtime quote for onshore
//! instruments, computes indicators, classifies, and assembles the report.
//! Every instrument-level failure is converted into "drop this row" plus a
//! diagnostic warning; nothing here aborts the run.

use std::sync::Arc;

use crate::domain::{InstrumentConfig, PriceSeries, RealtimeQuote};
use crate::http::HttpClient;
use crate::indicators;
use crate::report::{Report, ReportRow};
use crate::sources::{TencentRealtime, YahooHistory};
use crate::strategy;

/// A finished run: the report plus the diagnostics accumulated on the way.
#[derive(Debug)]
pub struct RunOutcome {
    pub report: Report,
    pub warnings: Vec<String>,
}

pub struct Pipeline {
    history: YahooHistory,
    realtime: TencentRealtime,
}

impl Pipeline {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            history: YahooHistory::new(Arc::clone(&http)),
            realtime: TencentRealtime::new(http),
        }
    }

    pub fn with_quote_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.realtime = self.realtime.with_timeout_ms(timeout_ms);
        self
    }

    /// Evaluate every registry entry in order. One instrument's total
    /// failure never aborts the run.
    pub async fn run(&self, registry: &[InstrumentConfig]) -> RunOutcome {
        let mut rows = Vec::with_capacity(registry.len());
        let mut warnings = Vec::new();

        for config in registry {
            if let Some(row) = self.evaluate(config, &mut warnings).await {
                rows.push(row);
            }
        }

        RunOutcome {
            report: Report::new(rows),
            warnings,
        }
    }

    async fn evaluate(
        &self,
        config: &InstrumentConfig,
        warnings: &mut Vec<String>,
    ) -> Option<ReportRow> {
        let (series, used_backup) = self.fetch_series(config, warnings).await?;
        let realtime = self.overlay_quote(config, warnings).await;

        let snapshot = match indicators::compute(&series, realtime.as_ref(), used_backup) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warnings.push(format!("{}: dropped, indicators unusable: {error}", config.name));
                return None;
            }
        };

        let advice = strategy::classify(
            config.asset_class,
            snapshot.bias_pct,
            snapshot.drawdown_pct,
            &config.thresholds,
        );

        Some(ReportRow {
            instrument: config.clone(),
            snapshot,
            advice,
            used_backup,
            series_ticker: series.ticker().clone(),
        })
    }

    /// Primary -> backup fallback; both unusable drops the instrument.
    async fn fetch_series(
        &self,
        config: &InstrumentConfig,
        warnings: &mut Vec<String>,
    ) -> Option<(PriceSeries, bool)> {
        let primary_error = match self.history.daily_closes(&config.primary).await {
            Ok(series) => return Some((series, false)),
            Err(error) => error,
        };

        let Some(backup) = &config.backup else {
            warnings.push(format!("{}: dropped: {primary_error}", config.name));
            return None;
        };

        match self.history.daily_closes(backup).await {
            Ok(series) => {
                warnings.push(format!(
                    "{}: primary '{}' unusable ({primary_error}); using backup '{backup}'",
                    config.name, config.primary
                ));
                Some((series, true))
            }
            Err(backup_error) => {
                warnings.push(format!(
                    "{}: dropped: primary: {primary_error}; backup: {backup_error}",
                    config.name
                ));
                None
            }
        }
    }

    /// Realtime overlay for onshore primaries; failure only costs freshness.
    ///
    /// Always keyed by the primary identifier: even when the backup series
    /// was used, the quote endpoint serves the true onshore instrument.
    async fn overlay_quote(
        &self,
        config: &InstrumentConfig,
        warnings: &mut Vec<String>,
    ) -> Option<RealtimeQuote> {
        if !TencentRealtime::supports(&config.primary) {
            return None;
        }

        match self.realtime.quote(&config.primary).await {
            Ok(quote) => Some(quote),
            Err(error) => {
                warnings.push(format!(
                    "{}: realtime quote unavailable ({error}); using last close",
                    config.name
                ));
                None
            }
        }
    }
}

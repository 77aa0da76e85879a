//! Per-run report assembly and markdown rendering.

use serde::Serialize;

use crate::domain::{Advice, IndicatorSnapshot, InstrumentConfig, Ticker, UtcDateTime};

/// One successfully evaluated instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub instrument: InstrumentConfig,
    pub snapshot: IndicatorSnapshot,
    pub advice: Advice,
    /// True when the series came from the backup identifier.
    pub used_backup: bool,
    /// Identifier the historical series was actually fetched for.
    pub series_ticker: Ticker,
}

/// The run's only output artifact: surviving rows in registry order plus one
/// generation timestamp. Failed instruments are simply absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub generated_at: UtcDateTime,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn new(rows: Vec<ReportRow>) -> Self {
        Self {
            generated_at: UtcDateTime::now(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Render the report as the markdown body handed to the transport.
///
/// An empty report still renders a valid body; the transport decides
/// whether to send it.
pub fn render_markdown(report: &Report) -> String {
    let mut out = String::new();

    out.push_str("## 🤖 Dipwatch contribution signals\n");
    out.push_str(&format!("**Date**: {}\n", report.generated_at.date()));

    if report.is_empty() {
        out.push_str("\nNo instruments produced usable data this run.\n");
        return out;
    }

    for row in &report.rows {
        let ccy = &row.instrument.currency_symbol;
        out.push_str(&format!(
            "\n### {} ({})\n",
            row.instrument.name, row.instrument.primary
        ));
        out.push_str(&format!(
            "- **Price**: {ccy}{:.2} ({:+.2}%)\n",
            row.snapshot.price, row.snapshot.daily_change_pct
        ));
        out.push_str(&format!(
            "- **250-day bias**: {:.2}%\n",
            row.snapshot.bias_pct
        ));
        out.push_str(&format!(
            "- **Drawdown from 250-day high**: {:.2}%\n",
            row.snapshot.drawdown_pct
        ));
        out.push_str(&format!("- 💡 {}\n", row.advice.text));
        if row.used_backup {
            out.push_str(&format!("- ⚠️ via backup series {}\n", row.series_ticker));
        }
    }

    out.push_str("\n---\n### Legend\n");
    out.push_str("- us-growth / us-broad / cn-value: deep low below -10%, overheated above +15%\n");
    out.push_str("- gold: deep low below -5%, overheated above +15%\n");
    out.push_str("- cn-growth: deep low below -25%, overheated above +25%\n");

    out
}

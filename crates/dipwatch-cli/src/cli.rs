//! CLI argument definitions for dipwatch.
//!
//! One command, one run: evaluate the watchlist and deliver the report.
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--print-only` | `false` | Print to stdout even if a webhook is configured |
//! | `--webhook-url` | env | Webhook endpoint override |
//! | `--quote-timeout-ms` | `2000` | Realtime quote timeout |
//!
//! Without `--webhook-url`, the endpoint comes from `DIPWATCH_WEBHOOK_URL`,
//! then `WECHAT_WEBHOOK_URL`; with neither set the report is printed.

use clap::Parser;

/// Contribution-timing signals for a fixed ETF watchlist.
#[derive(Debug, Parser)]
#[command(
    name = "dipwatch",
    version,
    about = "Contribution-timing signals for a fixed ETF watchlist",
    long_about = "Dipwatch fetches two years of daily closes per instrument (with \
backup-identifier fallback), overlays onshore realtime quotes, computes 250-day \
bias and drawdown, and turns them into per-instrument contribution advice \
delivered to a WeCom-style webhook or stdout."
)]
pub struct Cli {
    /// Print the report to stdout even when a webhook is configured.
    #[arg(long, default_value_t = false)]
    pub print_only: bool,

    /// Webhook endpoint; overrides DIPWATCH_WEBHOOK_URL / WECHAT_WEBHOOK_URL.
    #[arg(long)]
    pub webhook_url: Option<String>,

    /// Timeout budget for the realtime quote call, in milliseconds.
    #[arg(long, default_value_t = 2_000)]
    pub quote_timeout_ms: u64,
}

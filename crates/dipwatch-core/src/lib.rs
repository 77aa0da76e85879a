//! # Dipwatch Core
//!
//! Signal engine for the dipwatch contribution advisor: fetches multi-year
//! daily closes with identifier fallback, overlays onshore realtime quotes,
//! computes 250-day trend indicators, classifies them through per-asset-class
//! rule cascades, and assembles one report per run.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Validated domain types (tickers, series, snapshots, advice) |
//! | [`registry`] | Static instrument watchlist |
//! | [`http`] | HTTP client abstraction (reqwest / mock) |
//! | [`sources`] | Yahoo history and Tencent realtime adapters |
//! | [`indicators`] | 250-day bias and drawdown computation |
//! | [`strategy`] | Ordered-cascade advice classification |
//! | [`report`] | Report assembly and markdown rendering |
//! | [`notify`] | Webhook transport with print fallback |
//! | [`pipeline`] | Per-run evaluation driver |
//! | [`error`] | Per-layer error types |
//!
//! ## Flow
//!
//! ```text
//! registry -> history fetch (primary -> backup) -> indicators -> cascade
//!                  |                                   ^
//!                  +-- realtime overlay (onshore) -----+
//!                                   |
//!                                   v
//!                      report -> webhook / stdout
//! ```
//!
//! A data-source failure never aborts a run: unusable instruments are
//! dropped with a diagnostic warning and the report ships with whatever
//! survived, down to an empty body.

pub mod domain;
pub mod error;
pub mod http;
pub mod indicators;
pub mod notify;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod sources;
pub mod strategy;

pub use domain::{
    Advice, AdviceLevel, AssetClass, IndicatorSnapshot, InstrumentConfig, PricePoint, PriceSeries,
    RealtimeQuote, Thresholds, Ticker, UtcDateTime,
};
pub use error::{
    HistoryError, IndicatorError, NotifyError, QuoteError, ValidationError,
};
pub use http::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};
pub use notify::{Delivery, WebhookNotifier};
pub use pipeline::{Pipeline, RunOutcome};
pub use registry::default_registry;
pub use report::{render_markdown, Report, ReportRow};
pub use sources::{TencentRealtime, YahooHistory};
pub use strategy::classify;

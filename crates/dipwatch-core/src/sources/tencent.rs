use std::sync::Arc;

use crate::domain::{RealtimeQuote, Ticker};
use crate::error::QuoteError;
use crate::http::{HttpClient, HttpRequest};

/// Default budget for the lightweight quote call, in milliseconds.
const QUOTE_TIMEOUT_MS: u64 = 2_000;

/// Fields 0..=5 must be present; index 3 is the current price, index 4 the
/// prior close. Everything after index 5 is ignored.
const MIN_FIELDS: usize = 6;
const PRICE_FIELD: usize = 3;
const PRIOR_CLOSE_FIELD: usize = 4;

/// Realtime quote fetcher for onshore identifiers, backed by the Tencent
/// quote endpoint.
///
/// Only `.SS`/`.SZ` suffixed tickers have a market mapping; everything else
/// is `UnsupportedMarket`. Failures degrade freshness, never the run.
#[derive(Clone)]
pub struct TencentRealtime {
    http: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl TencentRealtime {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            timeout_ms: QUOTE_TIMEOUT_MS,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Market-prefixed code for the quote endpoint, when one exists
    /// (`510300.SS` -> `sh510300`, `159915.SZ` -> `sz159915`).
    pub fn market_code(ticker: &Ticker) -> Option<String> {
        match ticker.suffix() {
            Some("SS") => Some(format!("sh{}", ticker.stem().to_ascii_lowercase())),
            Some("SZ") => Some(format!("sz{}", ticker.stem().to_ascii_lowercase())),
            _ => None,
        }
    }

    /// Whether a realtime overlay can be attempted for this identifier.
    pub fn supports(ticker: &Ticker) -> bool {
        Self::market_code(ticker).is_some()
    }

    pub async fn quote(&self, ticker: &Ticker) -> Result<RealtimeQuote, QuoteError> {
        let code = Self::market_code(ticker).ok_or_else(|| QuoteError::UnsupportedMarket {
            ticker: ticker.as_str().to_owned(),
        })?;

        let endpoint = format!("https://qt.gtimg.cn/q={code}");
        let request = HttpRequest::get(endpoint).with_timeout_ms(self.timeout_ms);

        let response =
            self.http
                .execute(request)
                .await
                .map_err(|error| QuoteError::Transport {
                    ticker: ticker.as_str().to_owned(),
                    message: error.message().to_owned(),
                })?;

        if !response.is_success() {
            return Err(QuoteError::UpstreamStatus {
                ticker: ticker.as_str().to_owned(),
                status: response.status,
            });
        }

        parse_quote_line(ticker, &response.body)
    }
}

/// Parse a tilde-delimited quote line such as
/// `v_sh510300="1~CSI 300 ETF~510300~3.941~3.933~3.940~...";`.
fn parse_quote_line(ticker: &Ticker, body: &str) -> Result<RealtimeQuote, QuoteError> {
    let line = body.trim();
    let payload = line
        .split_once('=')
        .map(|(_, rest)| rest)
        .unwrap_or(line)
        .trim_matches(|ch: char| ch == '"' || ch == ';' || ch.is_whitespace());

    let fields: Vec<&str> = payload.split('~').collect();
    if fields.len() < MIN_FIELDS {
        return Err(QuoteError::Malformed {
            ticker: ticker.as_str().to_owned(),
            message: format!("expected at least {MIN_FIELDS} fields, got {}", fields.len()),
        });
    }

    let price = parse_field(ticker, fields[PRICE_FIELD], "price")?;
    let prior_close = parse_field(ticker, fields[PRIOR_CLOSE_FIELD], "prior close")?;

    RealtimeQuote::new(price, prior_close).map_err(|_| QuoteError::BadPriorClose {
        ticker: ticker.as_str().to_owned(),
    })
}

fn parse_field(ticker: &Ticker, raw: &str, label: &str) -> Result<f64, QuoteError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| QuoteError::Malformed {
            ticker: ticker.as_str().to_owned(),
            message: format!("{label} field '{raw}' is not a number"),
        })
}

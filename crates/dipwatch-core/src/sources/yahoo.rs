use std::sync::Arc;

use serde::Deserialize;
use time::OffsetDateTime;

use crate::domain::{PricePoint, PriceSeries, Ticker};
use crate::error::HistoryError;
use crate::http::{HttpClient, HttpRequest};

/// Historical daily-close fetcher backed by the Yahoo v8 chart endpoint.
///
/// Requests two years of daily candles, enough to cover the 250-row
/// indicator window. Every failure mode is classified as a `HistoryError`
/// so the caller can substitute the backup identifier or drop the
/// instrument; no retry happens at this layer.
#[derive(Clone)]
pub struct YahooHistory {
    http: Arc<dyn HttpClient>,
}

impl YahooHistory {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    pub async fn daily_closes(&self, ticker: &Ticker) -> Result<PriceSeries, HistoryError> {
        let endpoint = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{}?range=2y&interval=1d",
            urlencoding::encode(ticker.as_str())
        );

        // The chart endpoint is anonymous; no per-request timeout so the
        // client default applies.
        let request =
            HttpRequest::get(endpoint).with_header("referer", "https://finance.yahoo.com/");

        let response =
            self.http
                .execute(request)
                .await
                .map_err(|error| HistoryError::Transport {
                    ticker: ticker.as_str().to_owned(),
                    message: error.message().to_owned(),
                })?;

        if !response.is_success() {
            return Err(HistoryError::UpstreamStatus {
                ticker: ticker.as_str().to_owned(),
                status: response.status,
            });
        }

        parse_chart(ticker, &response.body)
    }
}

fn parse_chart(ticker: &Ticker, body: &str) -> Result<PriceSeries, HistoryError> {
    let chart: ChartResponse =
        serde_json::from_str(body).map_err(|error| HistoryError::Malformed {
            ticker: ticker.as_str().to_owned(),
            message: error.to_string(),
        })?;

    if let Some(error) = &chart.chart.error {
        if !error.is_null() {
            return Err(HistoryError::SourceReported {
                ticker: ticker.as_str().to_owned(),
                message: error.to_string(),
            });
        }
    }

    let result = chart
        .chart
        .result
        .as_deref()
        .and_then(<[ChartResult]>::first)
        .ok_or_else(|| HistoryError::EmptySeries {
            ticker: ticker.as_str().to_owned(),
        })?;

    let timestamps = result
        .timestamp
        .as_deref()
        .filter(|stamps| !stamps.is_empty())
        .ok_or_else(|| HistoryError::EmptySeries {
            ticker: ticker.as_str().to_owned(),
        })?;

    let closes = result
        .indicators
        .quote
        .first()
        .map(|quote| quote.close.as_slice())
        .filter(|closes| !closes.is_empty())
        .ok_or_else(|| HistoryError::MissingCloses {
            ticker: ticker.as_str().to_owned(),
        })?;

    let mut points = Vec::with_capacity(timestamps.len());
    for (index, &stamp) in timestamps.iter().enumerate() {
        // Missing-value rows come back as nulls; removed here.
        let Some(Some(close)) = closes.get(index) else {
            continue;
        };

        let date = OffsetDateTime::from_unix_timestamp(stamp)
            .map_err(|error| HistoryError::Malformed {
                ticker: ticker.as_str().to_owned(),
                message: format!("invalid timestamp {stamp}: {error}"),
            })?
            .date();

        points.push(PricePoint {
            date,
            close: *close,
        });
    }

    let series = PriceSeries::from_points(ticker.clone(), points);
    if series.len() < PriceSeries::MIN_ROWS {
        return Err(HistoryError::ShortHistory {
            ticker: ticker.as_str().to_owned(),
            rows: series.len(),
            min: PriceSeries::MIN_ROWS,
        });
    }

    Ok(series)
}

// Yahoo chart response structures; fields beyond what the series needs are
// ignored by serde.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartData,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    #[serde(default)]
    indicators: ChartIndicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ticker() -> Ticker {
        Ticker::parse("SPY").expect("valid ticker")
    }

    fn chart_body(closes: &[Option<f64>]) -> String {
        let base = 1_700_000_000_i64;
        let timestamps: Vec<i64> = (0..closes.len() as i64)
            .map(|index| base + index * 86_400)
            .collect();

        json!({
            "chart": {
                "result": [{
                    "timestamp": timestamps,
                    "indicators": { "quote": [{ "close": closes }] }
                }],
                "error": null
            }
        })
        .to_string()
    }

    #[test]
    fn parses_a_full_series() {
        let closes: Vec<Option<f64>> = (0..260).map(|index| Some(100.0 + index as f64)).collect();
        let series = parse_chart(&ticker(), &chart_body(&closes)).expect("series should parse");

        assert_eq!(series.len(), 260);
        assert_eq!(series.last_close(), Some(359.0));
    }

    #[test]
    fn null_close_rows_are_removed_before_the_length_check() {
        let mut closes: Vec<Option<f64>> =
            (0..255).map(|index| Some(100.0 + index as f64)).collect();
        closes[10] = None;
        closes[17] = None;
        closes[200] = None;
        closes[201] = None;
        closes[202] = None;
        closes[203] = None;

        let err = parse_chart(&ticker(), &chart_body(&closes)).expect_err("must be short");
        assert!(matches!(
            err,
            HistoryError::ShortHistory { rows: 249, min: 250, .. }
        ));
    }

    #[test]
    fn missing_close_field_is_classified() {
        let body = json!({
            "chart": {
                "result": [{
                    "timestamp": [1_700_000_000_i64],
                    "indicators": { "quote": [] }
                }],
                "error": null
            }
        })
        .to_string();

        let err = parse_chart(&ticker(), &body).expect_err("must fail");
        assert!(matches!(err, HistoryError::MissingCloses { .. }));
    }

    #[test]
    fn empty_result_is_classified() {
        let body = json!({ "chart": { "result": [], "error": null } }).to_string();
        let err = parse_chart(&ticker(), &body).expect_err("must fail");
        assert!(matches!(err, HistoryError::EmptySeries { .. }));
    }

    #[test]
    fn chart_level_error_is_classified() {
        let body = json!({
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found" }
            }
        })
        .to_string();

        let err = parse_chart(&ticker(), &body).expect_err("must fail");
        assert!(matches!(err, HistoryError::SourceReported { .. }));
    }

    #[test]
    fn garbage_body_is_malformed() {
        let err = parse_chart(&ticker(), "<html>rate limited</html>").expect_err("must fail");
        assert!(matches!(err, HistoryError::Malformed { .. }));
    }
}

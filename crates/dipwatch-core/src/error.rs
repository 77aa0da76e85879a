use thiserror::Error;

/// Validation and contract errors exposed by `dipwatch-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("quote prior close must be positive, got {value}")]
    NonPositivePriorClose { value: f64 },
}

/// Why a historical series could not be used.
///
/// None of these abort a run: the caller substitutes the backup identifier
/// or drops the instrument from the report.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HistoryError {
    #[error("history transport failed for '{ticker}': {message}")]
    Transport { ticker: String, message: String },
    #[error("history endpoint returned status {status} for '{ticker}'")]
    UpstreamStatus { ticker: String, status: u16 },
    #[error("history payload for '{ticker}' could not be parsed: {message}")]
    Malformed { ticker: String, message: String },
    #[error("history source reported an error for '{ticker}': {message}")]
    SourceReported { ticker: String, message: String },
    #[error("history for '{ticker}' came back empty")]
    EmptySeries { ticker: String },
    #[error("history for '{ticker}' is missing close prices")]
    MissingCloses { ticker: String },
    #[error("history for '{ticker}' has {rows} usable rows, needs {min}")]
    ShortHistory {
        ticker: String,
        rows: usize,
        min: usize,
    },
}

/// Why a realtime quote overlay is unavailable.
///
/// Never fatal: the instrument falls back to its last historical close.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuoteError {
    #[error("no realtime market mapping for '{ticker}'")]
    UnsupportedMarket { ticker: String },
    #[error("realtime transport failed for '{ticker}': {message}")]
    Transport { ticker: String, message: String },
    #[error("realtime endpoint returned status {status} for '{ticker}'")]
    UpstreamStatus { ticker: String, status: u16 },
    #[error("realtime payload for '{ticker}' is malformed: {message}")]
    Malformed { ticker: String, message: String },
    #[error("realtime prior close for '{ticker}' is not positive")]
    BadPriorClose { ticker: String },
}

/// Indicator computation failures; treated like an unusable source.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("series has {rows} rows, indicator window needs {min}")]
    ShortSeries { rows: usize, min: usize },
    #[error("moving average is not a usable number")]
    DegenerateAverage,
    #[error("rolling high is not a usable number")]
    DegenerateHigh,
}

/// Outbound notification failures, surfaced to the caller as a delivery
/// failure so a scheduler can flag the run.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook transport failed: {0}")]
    Transport(String),
    #[error("webhook returned status {0}")]
    UpstreamStatus(u16),
    #[error("webhook acknowledgement could not be parsed: {0}")]
    MalformedAck(#[from] serde_json::Error),
    #[error("webhook rejected the message: errcode={errcode} errmsg={errmsg}")]
    Rejected { errcode: i64, errmsg: String },
}

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const MAX_TICKER_LEN: usize = 15;

/// Normalized instrument identifier.
///
/// Onshore codes such as `510300.SS` begin with a digit, so any ASCII
/// alphanumeric is legal in first position; `.` and `-` are allowed inside.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Parse and normalize a ticker to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTicker);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_TICKER_LEN {
            return Err(ValidationError::TickerTooLong {
                len,
                max: MAX_TICKER_LEN,
            });
        }

        for (index, ch) in normalized.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric() || ch == '.' || ch == '-';
            if !valid {
                return Err(ValidationError::TickerInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exchange code before the market suffix (`510300` for `510300.SS`),
    /// or the whole ticker when there is no suffix.
    pub fn stem(&self) -> &str {
        self.0
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.0)
    }

    /// Market suffix after the last `.` (`SS`, `SZ`), if any.
    pub fn suffix(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(_, suffix)| suffix)
    }
}

impl Display for Ticker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Ticker {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Ticker {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_ticker() {
        let parsed = Ticker::parse(" qqq ").expect("ticker should parse");
        assert_eq!(parsed.as_str(), "QQQ");
    }

    #[test]
    fn accepts_digit_leading_onshore_codes() {
        let parsed = Ticker::parse("510300.ss").expect("ticker should parse");
        assert_eq!(parsed.as_str(), "510300.SS");
        assert_eq!(parsed.stem(), "510300");
        assert_eq!(parsed.suffix(), Some("SS"));
    }

    #[test]
    fn plain_us_ticker_has_no_suffix() {
        let parsed = Ticker::parse("GLD").expect("ticker should parse");
        assert_eq!(parsed.suffix(), None);
        assert_eq!(parsed.stem(), "GLD");
    }

    #[test]
    fn rejects_invalid_chars() {
        let err = Ticker::parse("QQQ$").expect_err("must fail");
        assert!(matches!(err, ValidationError::TickerInvalidChar { .. }));
    }

    #[test]
    fn rejects_empty_input() {
        let err = Ticker::parse("  ").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyTicker));
    }
}

//! Trend-indicator computation: 250-day moving-average bias and high-water
//! drawdown, with an optional realtime price overlay.

use crate::domain::{IndicatorSnapshot, PriceSeries, RealtimeQuote};
use crate::error::IndicatorError;

const WINDOW: usize = PriceSeries::MIN_ROWS;

/// Compute the per-run snapshot for one instrument.
///
/// `used_backup` controls how a realtime overlay is applied:
/// - backup NOT used: the overlay price replaces the displayed price AND
///   becomes the anchor for bias/drawdown (the long-window aggregates still
///   come from the historical series, which the realtime source cannot
///   provide);
/// - backup used: the series is a foreign proxy whose absolute level is not
///   comparable to the onshore quote, so the overlay replaces only the
///   displayed price/change and the anchor stays the series' own last close.
///
/// Pure: identical inputs yield a bit-identical snapshot.
pub fn compute(
    series: &PriceSeries,
    realtime: Option<&RealtimeQuote>,
    used_backup: bool,
) -> Result<IndicatorSnapshot, IndicatorError> {
    let points = series.points();
    if points.len() < WINDOW {
        return Err(IndicatorError::ShortSeries {
            rows: points.len(),
            min: WINDOW,
        });
    }

    let tail = &points[points.len() - WINDOW..];
    let ma250 = tail.iter().map(|point| point.close).sum::<f64>() / WINDOW as f64;
    let high250 = tail
        .iter()
        .map(|point| point.close)
        .fold(f64::NEG_INFINITY, f64::max);

    // Length guard above should make these unreachable; checked anyway so a
    // degenerate series drops the instrument instead of emitting NaN advice.
    if !ma250.is_finite() || ma250 == 0.0 {
        return Err(IndicatorError::DegenerateAverage);
    }
    if !high250.is_finite() || high250 == 0.0 {
        return Err(IndicatorError::DegenerateHigh);
    }

    let last_close = points[points.len() - 1].close;
    let prev_close = points[points.len() - 2].close;
    let base_change_pct = if prev_close != 0.0 {
        (last_close - prev_close) / prev_close * 100.0
    } else {
        0.0
    };

    let (price, daily_change_pct) = match realtime {
        Some(quote) => (quote.price(), quote.change_pct()),
        None => (last_close, base_change_pct),
    };

    let anchor = match realtime {
        Some(quote) if !used_backup => quote.price(),
        _ => last_close,
    };

    Ok(IndicatorSnapshot {
        price,
        daily_change_pct,
        ma250,
        high250,
        bias_pct: (anchor - ma250) / ma250 * 100.0,
        drawdown_pct: (anchor - high250) / high250 * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PricePoint, Ticker};
    use time::{Date, Duration, Month};

    fn series_from(closes: &[f64]) -> PriceSeries {
        let start = Date::from_calendar_date(2024, Month::June, 3).expect("valid date");
        let points = closes
            .iter()
            .enumerate()
            .map(|(index, &close)| PricePoint {
                date: start.saturating_add(Duration::days(index as i64)),
                close,
            })
            .collect();

        PriceSeries::from_points(Ticker::parse("SPY").expect("valid ticker"), points)
    }

    #[test]
    fn window_aggregates_match_mean_and_max_exactly() {
        // 250 closes: 1.0 ..= 250.0 -> mean 125.5, max 250.
        let closes: Vec<f64> = (1..=250).map(f64::from).collect();
        let snapshot = compute(&series_from(&closes), None, false).expect("must compute");

        assert_eq!(snapshot.ma250, 125.5);
        assert_eq!(snapshot.high250, 250.0);
        assert_eq!(snapshot.price, 250.0);
        assert_eq!(snapshot.drawdown_pct, 0.0);
    }

    #[test]
    fn only_the_trailing_window_is_aggregated() {
        // 10 leading rows at 1000 must not leak into the 250-row window.
        let mut closes = vec![1000.0; 10];
        closes.extend((1..=250).map(f64::from));
        let snapshot = compute(&series_from(&closes), None, false).expect("must compute");

        assert_eq!(snapshot.ma250, 125.5);
        assert_eq!(snapshot.high250, 250.0);
    }

    #[test]
    fn same_series_yields_bit_identical_snapshots() {
        let closes: Vec<f64> = (0..260).map(|index| 90.0 + (index % 17) as f64 * 1.3).collect();
        let series = series_from(&closes);

        let first = compute(&series, None, false).expect("must compute");
        let second = compute(&series, None, false).expect("must compute");

        assert_eq!(first, second);
    }

    #[test]
    fn daily_change_uses_the_two_most_recent_closes() {
        let mut closes: Vec<f64> = vec![100.0; 249];
        closes.push(98.0);
        closes.push(100.45);
        let snapshot = compute(&series_from(&closes), None, false).expect("must compute");

        assert!((snapshot.daily_change_pct - 2.5).abs() < 1e-9);
    }

    #[test]
    fn realtime_override_moves_the_bias_anchor_when_primary_series() {
        let closes = vec![100.0; 250];
        let quote = RealtimeQuote::new(80.0, 100.0).expect("valid quote");
        let snapshot =
            compute(&series_from(&closes), Some(&quote), false).expect("must compute");

        assert_eq!(snapshot.price, 80.0);
        assert!((snapshot.daily_change_pct + 20.0).abs() < 1e-9);
        assert!((snapshot.bias_pct + 20.0).abs() < 1e-9);
        assert!((snapshot.drawdown_pct + 20.0).abs() < 1e-9);
    }

    #[test]
    fn realtime_override_keeps_the_series_anchor_when_backup_series() {
        let closes = vec![50.0; 250];
        let quote = RealtimeQuote::new(3.9, 4.0).expect("valid quote");
        let snapshot = compute(&series_from(&closes), Some(&quote), true).expect("must compute");

        // Displayed values come from the quote...
        assert_eq!(snapshot.price, 3.9);
        assert!((snapshot.daily_change_pct + 2.5).abs() < 1e-9);
        // ...but the deviation metrics stay on the proxy series' own level.
        assert_eq!(snapshot.bias_pct, 0.0);
        assert_eq!(snapshot.drawdown_pct, 0.0);
    }

    #[test]
    fn short_series_is_rejected() {
        let closes = vec![100.0; 249];
        let err = compute(&series_from(&closes), None, false).expect_err("must fail");
        assert!(matches!(
            err,
            IndicatorError::ShortSeries { rows: 249, min: 250 }
        ));
    }
}

//! Fixed-window simple moving averages over closing prices.

use crate::domain::bar::{round4, EnrichedBar};

/// Windows persisted in artifacts, matching the sma10/sma50/sma250 fields.
pub const SMA_WINDOWS: [usize; 3] = [10, 50, 250];

/// Simple moving average with a null prefix: indices `0..n-1` are `None`,
/// index `i >= n-1` is the arithmetic mean of `values[i-n+1..=i]` rounded
/// to 4 decimal places.
pub fn sma(values: &[f64], n: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if n == 0 {
        return out;
    }
    for i in (n.saturating_sub(1))..values.len() {
        let window: f64 = values[i + 1 - n..=i].iter().sum();
        out[i] = Some(round4(window / n as f64));
    }
    out
}

/// Populate the SMA fields of a series in place. Each interval's series is
/// enriched independently; a daily and a weekly series for the same symbol
/// have non-interchangeable averages.
pub fn enrich(bars: &mut [EnrichedBar]) {
    let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
    let sma10 = sma(&closes, 10);
    let sma50 = sma(&closes, 50);
    let sma250 = sma(&closes, 250);
    for (i, bar) in bars.iter_mut().enumerate() {
        bar.sma10 = sma10[i];
        bar.sma50 = sma50[i];
        bar.sma250 = sma250[i];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn make_bar(day: u32, close: f64) -> EnrichedBar {
        EnrichedBar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000,
            sma10: None,
            sma50: None,
            sma250: None,
        }
    }

    #[test]
    fn null_prefix_then_mean() {
        let values = [10.0, 20.0, 30.0, 40.0];
        let result = sma(&values, 3);

        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        assert_relative_eq!(result[2].unwrap(), 20.0);
        assert_relative_eq!(result[3].unwrap(), 30.0);
    }

    #[test]
    fn repeating_cycle_gives_constant_average() {
        let values = [10.0, 20.0, 30.0, 10.0, 20.0, 30.0, 10.0, 20.0, 30.0, 10.0];
        let result = sma(&values, 3);

        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        for value in &result[2..] {
            assert_relative_eq!(value.unwrap(), 20.0);
        }
    }

    #[test]
    fn series_shorter_than_window_is_all_none() {
        let result = sma(&[10.0, 20.0], 5);
        assert_eq!(result, vec![None, None]);
    }

    #[test]
    fn window_one_echoes_values() {
        let result = sma(&[1.5, 2.5], 1);
        assert_eq!(result, vec![Some(1.5), Some(2.5)]);
    }

    #[test]
    fn values_are_rounded_to_four_decimals() {
        let result = sma(&[1.0, 2.0, 1.0], 3);
        // 4/3 = 1.3333...
        assert_eq!(result[2], Some(1.3333));
    }

    #[test]
    fn enrich_fills_all_three_windows() {
        let mut bars: Vec<EnrichedBar> = (1..=12).map(|d| make_bar(d, d as f64)).collect();
        enrich(&mut bars);

        assert!(bars[8].sma10.is_none());
        // mean of 1..=10
        assert_relative_eq!(bars[9].sma10.unwrap(), 5.5);
        assert_relative_eq!(bars[10].sma10.unwrap(), 6.5);
        // 12 bars cannot satisfy the longer windows
        assert!(bars.iter().all(|b| b.sma50.is_none()));
        assert!(bars.iter().all(|b| b.sma250.is_none()));
    }

    proptest! {
        #[test]
        fn null_prefix_law(
            values in proptest::collection::vec(-1_000.0f64..1_000.0, 0..60),
            n in 1usize..20,
        ) {
            let result = sma(&values, n);
            prop_assert_eq!(result.len(), values.len());
            for (i, value) in result.iter().enumerate() {
                if i + 1 < n {
                    prop_assert!(value.is_none());
                } else {
                    prop_assert!(value.is_some());
                }
            }
        }
    }
}

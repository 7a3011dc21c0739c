//! OHLCV bar representations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Round to 4 decimal places, the precision persisted in artifacts.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// A raw bar as returned by a data source, before enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// A bar as persisted in artifacts: prices rounded to 4 decimals, SMA fields
/// filled in by enrichment. The compact JSON keys are the wire format the
/// dashboard pages consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedBar {
    #[serde(rename = "t")]
    pub date: NaiveDate,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v")]
    pub volume: u64,
    pub sma10: Option<f64>,
    pub sma50: Option<f64>,
    pub sma250: Option<f64>,
}

impl EnrichedBar {
    pub fn from_raw(raw: &RawBar) -> Self {
        Self {
            date: raw.date,
            open: round4(raw.open),
            high: round4(raw.high),
            low: round4(raw.low),
            close: round4(raw.close),
            volume: raw.volume,
            sma10: None,
            sma50: None,
            sma250: None,
        }
    }
}

//! CSV file data source adapter.
//!
//! Serves OHLCV series from `<SYMBOL>_<granularity>.csv` files (columns
//! `date,open,high,low,close,volume`) and company metadata from an
//! `info.csv` table (`symbol,name,sector,industry`) in the same directory.
//! This is the offline source the CLI wires in; it is also what the
//! integration fixtures use.

use crate::domain::bar::RawBar;
use crate::domain::error::GridsyncError;
use crate::domain::info::SymbolInfo;
use crate::ports::data_source::DataSource;
use chrono::{Days, Local, Months, NaiveDate};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

pub struct CsvSource {
    base_path: PathBuf,
    today: NaiveDate,
}

impl CsvSource {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            base_path,
            today: Local::now().date_naive(),
        }
    }

    /// Pin the reference date used for span filtering.
    pub fn with_today(base_path: PathBuf, today: NaiveDate) -> Self {
        Self { base_path, today }
    }

    fn series_path(&self, symbol: &str, granularity: &str) -> PathBuf {
        self.base_path.join(format!("{symbol}_{granularity}.csv"))
    }

    fn read_series(
        &self,
        symbol: &str,
        granularity: &str,
        start: Option<NaiveDate>,
    ) -> Result<Vec<RawBar>, GridsyncError> {
        let path = self.series_path(symbol, granularity);
        let content = fs::read_to_string(&path).map_err(|e| GridsyncError::Fetch {
            symbol: symbol.to_string(),
            reason: format!("failed to read {}: {e}", path.display()),
        })?;

        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in reader.records() {
            let record = result.map_err(|e| GridsyncError::Parse {
                symbol: symbol.to_string(),
                reason: format!("CSV error: {e}"),
            })?;

            let field = |idx: usize, name: &str| {
                record
                    .get(idx)
                    .ok_or_else(|| GridsyncError::Parse {
                        symbol: symbol.to_string(),
                        reason: format!("missing {name} column"),
                    })
            };

            let date = NaiveDate::parse_from_str(field(0, "date")?, "%Y-%m-%d").map_err(
                |e| GridsyncError::Parse {
                    symbol: symbol.to_string(),
                    reason: format!("invalid date: {e}"),
                },
            )?;

            if let Some(start) = start {
                if date < start {
                    continue;
                }
            }

            let price = |idx: usize, name: &str| -> Result<f64, GridsyncError> {
                field(idx, name)?.parse().map_err(|e| GridsyncError::Parse {
                    symbol: symbol.to_string(),
                    reason: format!("invalid {name} value: {e}"),
                })
            };

            let volume: u64 =
                field(5, "volume")?.parse().map_err(|e| GridsyncError::Parse {
                    symbol: symbol.to_string(),
                    reason: format!("invalid volume value: {e}"),
                })?;

            bars.push(RawBar {
                date,
                open: price(1, "open")?,
                high: price(2, "high")?,
                low: price(3, "low")?,
                close: price(4, "close")?,
                volume,
            });
        }

        bars.sort_by_key(|bar| bar.date);
        Ok(bars)
    }
}

/// Parse a history span like `2y`, `6mo`, or `30d` into the first date it
/// covers, relative to `today`. `max` means no lower bound.
pub(crate) fn span_start(today: NaiveDate, span: &str) -> Option<NaiveDate> {
    let span = span.trim();
    if span.eq_ignore_ascii_case("max") {
        return None;
    }
    if let Some(n) = span
        .strip_suffix("mo")
        .and_then(|v| v.parse::<u32>().ok())
    {
        return today.checked_sub_months(Months::new(n));
    }
    if let Some(n) = span.strip_suffix('y').and_then(|v| v.parse::<u32>().ok()) {
        return today.checked_sub_months(Months::new(n * 12));
    }
    if let Some(n) = span.strip_suffix('d').and_then(|v| v.parse::<u64>().ok()) {
        return today.checked_sub_days(Days::new(n));
    }
    None
}

impl DataSource for CsvSource {
    fn fetch_series(
        &self,
        symbols: &[String],
        span: &str,
        granularity: &str,
    ) -> Result<HashMap<String, Vec<RawBar>>, GridsyncError> {
        let start = span_start(self.today, span);
        let mut out = HashMap::new();

        for symbol in symbols {
            match self.read_series(symbol, granularity, start) {
                Ok(bars) => {
                    out.insert(symbol.clone(), bars);
                }
                // Per-symbol failure: omit from the map, the orchestrator
                // marks it failed without aborting the batch.
                Err(e) => eprintln!("warning: {e}"),
            }
        }

        Ok(out)
    }

    fn fetch_info(&self, symbol: &str) -> Result<SymbolInfo, GridsyncError> {
        let path = self.base_path.join("info.csv");
        let content = fs::read_to_string(&path).map_err(|e| GridsyncError::Fetch {
            symbol: symbol.to_string(),
            reason: format!("failed to read {}: {e}", path.display()),
        })?;

        let mut reader = csv::Reader::from_reader(content.as_bytes());
        for result in reader.records() {
            let record = result.map_err(|e| GridsyncError::Parse {
                symbol: symbol.to_string(),
                reason: format!("CSV error: {e}"),
            })?;

            if record.get(0) != Some(symbol) {
                continue;
            }

            let optional = |idx: usize| {
                record
                    .get(idx)
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
            };

            return Ok(SymbolInfo {
                display_name: record
                    .get(1)
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .unwrap_or(symbol)
                    .to_string(),
                sector: optional(2),
                industry: optional(3),
            });
        }

        Err(GridsyncError::Fetch {
            symbol: symbol.to_string(),
            reason: "no info row".into(),
        })
    }
}

#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use gridsync::domain::bar::RawBar;
use gridsync::domain::error::GridsyncError;
use gridsync::domain::grid::Grid;
use gridsync::domain::info::SymbolInfo;
use gridsync::ports::data_source::DataSource;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(date_str: &str, close: f64) -> RawBar {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap();
    RawBar {
        date,
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1000,
    }
}

/// `count` consecutive daily bars starting at `start`, closes rising from
/// `base` by 1.0 per bar.
pub fn generate_bars(start: &str, count: usize, base: f64) -> Vec<RawBar> {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| {
            let close = base + i as f64;
            RawBar {
                date: start.checked_add_days(Days::new(i as u64)).unwrap(),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1000 + i as u64,
            }
        })
        .collect()
}

pub fn make_grid(name: &str, symbols: &[&str]) -> Grid {
    Grid {
        name: name.to_string(),
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
    }
}

/// In-memory data source that records every call, so tests can assert on
/// fetch scheduling (dedup, skip-when-fresh, info fetched once).
pub struct MockDataSource {
    pub series: HashMap<String, Vec<RawBar>>,
    pub infos: HashMap<String, SymbolInfo>,
    /// Granularities whose batch fetches fail outright.
    pub failing_granularities: HashSet<String>,
    pub fetch_calls: RefCell<Vec<Vec<String>>>,
    pub info_calls: RefCell<Vec<String>>,
}

impl MockDataSource {
    pub fn new() -> Self {
        Self {
            series: HashMap::new(),
            infos: HashMap::new(),
            failing_granularities: HashSet::new(),
            fetch_calls: RefCell::new(Vec::new()),
            info_calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_series(mut self, symbol: &str, bars: Vec<RawBar>) -> Self {
        self.infos.insert(
            symbol.to_string(),
            SymbolInfo {
                display_name: format!("{symbol} Inc."),
                sector: Some("Technology".into()),
                industry: None,
            },
        );
        self.series.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_info(mut self, symbol: &str, info: SymbolInfo) -> Self {
        self.infos.insert(symbol.to_string(), info);
        self
    }

    pub fn without_info(mut self, symbol: &str) -> Self {
        self.infos.remove(symbol);
        self
    }

    pub fn failing_granularity(mut self, granularity: &str) -> Self {
        self.failing_granularities.insert(granularity.to_string());
        self
    }

    /// Symbols requested across all fetch_series calls, in order.
    pub fn fetched_symbols(&self) -> Vec<String> {
        self.fetch_calls.borrow().iter().flatten().cloned().collect()
    }

    pub fn info_fetch_count(&self, symbol: &str) -> usize {
        self.info_calls
            .borrow()
            .iter()
            .filter(|s| s.as_str() == symbol)
            .count()
    }
}

impl DataSource for MockDataSource {
    fn fetch_series(
        &self,
        symbols: &[String],
        _span: &str,
        granularity: &str,
    ) -> Result<HashMap<String, Vec<RawBar>>, GridsyncError> {
        self.fetch_calls.borrow_mut().push(symbols.to_vec());

        if self.failing_granularities.contains(granularity) {
            return Err(GridsyncError::Fetch {
                symbol: symbols.first().cloned().unwrap_or_default(),
                reason: "simulated transport outage".into(),
            });
        }

        let mut out = HashMap::new();
        for symbol in symbols {
            if let Some(bars) = self.series.get(symbol) {
                out.insert(symbol.clone(), bars.clone());
            }
        }
        Ok(out)
    }

    fn fetch_info(&self, symbol: &str) -> Result<SymbolInfo, GridsyncError> {
        self.info_calls.borrow_mut().push(symbol.to_string());
        self.infos
            .get(symbol)
            .cloned()
            .ok_or_else(|| GridsyncError::Fetch {
                symbol: symbol.to_string(),
                reason: "no info available".into(),
            })
    }
}

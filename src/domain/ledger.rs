//! Last-refresh ledger keyed by (interval label, symbol).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persistent record of the last successful refresh date per
/// (symbol, interval). An entry exists iff that pair was refreshed
/// successfully at least once; [`record`](CacheLedger::record) is only
/// called after the artifact write succeeds, so a crash mid-fetch leaves
/// the pair stale and the next run retries it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheLedger {
    #[serde(flatten)]
    refreshed: BTreeMap<String, BTreeMap<String, NaiveDate>>,
}

impl CacheLedger {
    pub fn last_refresh(&self, symbol: &str, label: &str) -> Option<NaiveDate> {
        self.refreshed.get(label).and_then(|m| m.get(symbol)).copied()
    }

    /// Date check only. The orchestrator ORs this with artifact absence, so
    /// an externally deleted artifact forces a re-fetch even when this says
    /// fresh.
    pub fn is_stale(&self, symbol: &str, label: &str, today: NaiveDate) -> bool {
        self.last_refresh(symbol, label) != Some(today)
    }

    pub fn record(&mut self, symbol: &str, label: &str, date: NaiveDate) {
        self.refreshed
            .entry(label.to_string())
            .or_default()
            .insert(symbol.to_string(), date);
    }

    pub fn len(&self) -> usize {
        self.refreshed.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.refreshed.values().all(BTreeMap::is_empty)
    }
}

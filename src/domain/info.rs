//! Company metadata and its persistent cache.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Descriptive metadata for one symbol. `None` means the source had no
/// value; "not yet fetched" is instead absence from the [`InfoCache`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolInfo {
    #[serde(rename = "shortName")]
    pub display_name: String,
    pub sector: Option<String>,
    pub industry: Option<String>,
}

impl SymbolInfo {
    /// Fallback when the source cannot supply metadata. Callers must not
    /// cache it, so the next run retries the fetch.
    pub fn unknown(symbol: &str) -> Self {
        Self {
            display_name: symbol.to_string(),
            sector: None,
            industry: None,
        }
    }
}

/// Persistent symbol → info map. Append-only in practice: an entry is
/// fetched at most once and never invalidated by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoCache {
    #[serde(flatten)]
    entries: BTreeMap<String, SymbolInfo>,
}

impl InfoCache {
    pub fn get(&self, symbol: &str) -> Option<&SymbolInfo> {
        self.entries.get(symbol)
    }

    pub fn insert(&mut self, symbol: String, info: SymbolInfo) {
        self.entries.insert(symbol, info);
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! The persisted per-(symbol, interval) data document.

use crate::domain::bar::EnrichedBar;
use crate::domain::info::SymbolInfo;
use serde::{Deserialize, Serialize};

/// Bumped whenever the row shape changes, so old artifacts and new code
/// cannot silently disagree.
pub const ARTIFACT_SCHEMA_VERSION: u32 = 1;

/// One symbol's series plus metadata for one interval. Created or fully
/// overwritten whenever a fetch succeeds; never partially written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub schema: u32,
    pub ticker: String,
    pub info: SymbolInfo,
    pub ohlcv: Vec<EnrichedBar>,
}

impl Artifact {
    pub fn new(ticker: String, info: SymbolInfo, ohlcv: Vec<EnrichedBar>) -> Self {
        Self {
            schema: ARTIFACT_SCHEMA_VERSION,
            ticker,
            info,
            ohlcv,
        }
    }
}

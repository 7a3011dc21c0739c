//! Market data access port.

use crate::domain::bar::RawBar;
use crate::domain::error::GridsyncError;
use crate::domain::info::SymbolInfo;
use std::collections::HashMap;

/// External supplier of OHLCV series and company metadata.
///
/// `fetch_series` takes one batch of symbols; an implementation reports a
/// per-symbol failure by omitting that symbol from the returned map, and a
/// transport failure for the whole batch by returning `Err`. The
/// orchestrator tolerates both without aborting the run.
pub trait DataSource {
    fn fetch_series(
        &self,
        symbols: &[String],
        span: &str,
        granularity: &str,
    ) -> Result<HashMap<String, Vec<RawBar>>, GridsyncError>;

    fn fetch_info(&self, symbol: &str) -> Result<SymbolInfo, GridsyncError>;
}

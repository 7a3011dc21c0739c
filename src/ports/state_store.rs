//! Persistence port for the cross-run mutable state.

use crate::domain::error::GridsyncError;
use crate::domain::info::InfoCache;
use crate::domain::ledger::CacheLedger;

/// Loads and saves the refresh ledger and info cache. Loading when no state
/// has ever been saved yields empty defaults. Saves happen at batch
/// boundaries, so a crash loses at most one in-flight batch.
pub trait StateStore {
    fn load_ledger(&self) -> Result<CacheLedger, GridsyncError>;

    fn save_ledger(&self, ledger: &CacheLedger) -> Result<(), GridsyncError>;

    fn load_info_cache(&self) -> Result<InfoCache, GridsyncError>;

    fn save_info_cache(&self, cache: &InfoCache) -> Result<(), GridsyncError>;
}

//! The synchronization engine: staleness filtering, batched fetch,
//! enrichment, artifact writes, and durability checkpoints.

use crate::domain::artifact::Artifact;
use crate::domain::bar::EnrichedBar;
use crate::domain::error::GridsyncError;
use crate::domain::indicator::enrich;
use crate::domain::info::{InfoCache, SymbolInfo};
use crate::domain::interval::IntervalSpec;
use crate::domain::ledger::CacheLedger;
use crate::ports::artifact_store::ArtifactStore;
use crate::ports::data_source::DataSource;
use crate::ports::state_store::StateStore;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Upper bound on symbols per fetch call, so one oversized batch cannot
/// dominate the run.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Outcome of one interval's refresh pass.
#[derive(Debug, Clone, Default)]
pub struct IntervalReport {
    pub label: String,
    pub updated: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

/// Outcome of a full sync run, one report per configured interval.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub intervals: Vec<IntervalReport>,
}

impl SyncReport {
    pub fn total_updated(&self) -> usize {
        self.intervals.iter().map(|r| r.updated.len()).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.intervals.iter().map(|r| r.failed.len()).sum()
    }
}

/// Refresh every stale (symbol, interval) pair in the pool.
///
/// Intervals are processed independently: an outage on one cadence never
/// blocks another. Within an interval, the stale set is partitioned into
/// `batch_size` chunks processed strictly in order, and the ledger and info
/// cache are flushed after each batch so a crash loses at most the
/// in-flight batch. Individual fetch failures are recorded and skipped;
/// only store-level persistence failures abort the run.
#[allow(clippy::too_many_arguments)]
pub fn sync(
    source: &dyn DataSource,
    store: &dyn ArtifactStore,
    state: &dyn StateStore,
    ledger: &mut CacheLedger,
    info_cache: &mut InfoCache,
    pool: &BTreeSet<String>,
    intervals: &[IntervalSpec],
    today: NaiveDate,
    batch_size: usize,
) -> Result<SyncReport, GridsyncError> {
    let mut report = SyncReport::default();
    for spec in intervals {
        report.intervals.push(sync_interval(
            source, store, state, ledger, info_cache, pool, spec, today, batch_size,
        )?);
    }
    Ok(report)
}

/// Symbols in the pool that need a refresh for this interval: ledger date
/// differs from today, or the artifact file has gone missing. The dual
/// check makes the ledger self-healing against externally deleted files.
pub fn stale_symbols(
    ledger: &CacheLedger,
    store: &dyn ArtifactStore,
    pool: &BTreeSet<String>,
    spec: &IntervalSpec,
    today: NaiveDate,
) -> Vec<String> {
    pool.iter()
        .filter(|symbol| {
            ledger.is_stale(symbol, &spec.label, today)
                || !store.has_artifact(symbol, &spec.suffix)
        })
        .cloned()
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn sync_interval(
    source: &dyn DataSource,
    store: &dyn ArtifactStore,
    state: &dyn StateStore,
    ledger: &mut CacheLedger,
    info_cache: &mut InfoCache,
    pool: &BTreeSet<String>,
    spec: &IntervalSpec,
    today: NaiveDate,
    batch_size: usize,
) -> Result<IntervalReport, GridsyncError> {
    let mut report = IntervalReport {
        label: spec.label.clone(),
        ..IntervalReport::default()
    };

    let stale = stale_symbols(ledger, store, pool, spec, today);
    report.skipped = pool
        .iter()
        .filter(|symbol| !stale.contains(symbol))
        .cloned()
        .collect();

    eprintln!(
        "[{}] {} stale, {} up to date",
        spec.label,
        stale.len(),
        report.skipped.len()
    );

    for batch in stale.chunks(batch_size.max(1)) {
        let mut series_by_symbol =
            match source.fetch_series(batch, &spec.span, &spec.granularity) {
                Ok(map) => map,
                Err(e) => {
                    eprintln!("warning: [{}] batch fetch failed ({e})", spec.label);
                    report.failed.extend(batch.iter().cloned());
                    continue;
                }
            };

        for symbol in batch {
            let Some(raw_bars) = series_by_symbol.remove(symbol) else {
                eprintln!("warning: [{}] no data for {symbol}", spec.label);
                report.failed.push(symbol.clone());
                continue;
            };
            if raw_bars.is_empty() {
                eprintln!("warning: [{}] empty series for {symbol}", spec.label);
                report.failed.push(symbol.clone());
                continue;
            }

            let info = ensure_info(source, info_cache, symbol);

            let mut bars: Vec<EnrichedBar> =
                raw_bars.iter().map(EnrichedBar::from_raw).collect();
            enrich(&mut bars);

            let artifact = Artifact::new(symbol.clone(), info, bars);
            if let Err(e) = store.write_artifact(&artifact, &spec.suffix) {
                eprintln!("warning: [{}] write failed for {symbol} ({e})", spec.label);
                report.failed.push(symbol.clone());
                continue;
            }

            // Only now: the ledger must never point at a missing artifact.
            ledger.record(symbol, &spec.label, today);
            report.updated.push(symbol.clone());
        }

        // Durability checkpoint after every batch.
        state.save_ledger(ledger)?;
        state.save_info_cache(info_cache)?;
    }

    Ok(report)
}

/// Info is fetched at most once per symbol for the lifetime of the cache,
/// decoupled from the daily price cadence. A failed fetch falls back to
/// [`SymbolInfo::unknown`] without caching it, so the next run retries.
fn ensure_info(source: &dyn DataSource, cache: &mut InfoCache, symbol: &str) -> SymbolInfo {
    if let Some(info) = cache.get(symbol) {
        return info.clone();
    }
    match source.fetch_info(symbol) {
        Ok(info) => {
            cache.insert(symbol.to_string(), info.clone());
            info
        }
        Err(e) => {
            eprintln!("warning: info fetch failed for {symbol} ({e})");
            SymbolInfo::unknown(symbol)
        }
    }
}

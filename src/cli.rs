//! CLI definition and dispatch.

use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_source::CsvSource;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::fs_store::FsStore;
use crate::adapters::grid_registry::GridRegistry;
use crate::domain::config_validation::validate_sync_config;
use crate::domain::error::GridsyncError;
use crate::domain::grid::{ticker_pool, Grid};
use crate::domain::interval::IntervalSpec;
use crate::domain::manifest::{build_index, build_manifest};
use crate::domain::sync::{stale_symbols, sync, SyncReport, DEFAULT_BATCH_SIZE};
use crate::ports::artifact_store::ArtifactStore;
use crate::ports::config_port::ConfigPort;
use crate::ports::state_store::StateStore;

#[derive(Parser, Debug)]
#[command(name = "gridsync", about = "Grid-based market data cache synchronizer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Refresh stale symbols and regenerate manifests
    Sync {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        grids_dir: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// List discovered grids and their symbol counts
    ListGrids {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show last-refresh dates for a symbol
    Status {
        #[arg(long)]
        symbol: String,
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Sync {
            config,
            grids_dir,
            data_dir,
            dry_run,
        } => run_sync(&config, grids_dir, data_dir, dry_run),
        Command::ListGrids { config } => run_list_grids(&config),
        Command::Status { symbol, config } => run_status(&symbol, &config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = GridsyncError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Everything `sync` needs, resolved from config plus CLI overrides.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    pub grids_dir: PathBuf,
    pub data_dir: PathBuf,
    pub source_path: PathBuf,
    pub batch_size: usize,
    pub intervals: Vec<IntervalSpec>,
}

pub fn build_settings(
    config: &dyn ConfigPort,
    grids_dir_override: Option<PathBuf>,
    data_dir_override: Option<PathBuf>,
) -> Result<SyncSettings, GridsyncError> {
    let source_path = config.get_string("source", "path").ok_or_else(|| {
        GridsyncError::ConfigMissing {
            section: "source".into(),
            key: "path".into(),
        }
    })?;

    let grids_dir = grids_dir_override.unwrap_or_else(|| {
        PathBuf::from(
            config
                .get_string("sync", "grids_dir")
                .unwrap_or_else(|| ".".to_string()),
        )
    });
    let data_dir = data_dir_override.unwrap_or_else(|| {
        PathBuf::from(
            config
                .get_string("sync", "data_dir")
                .unwrap_or_else(|| "data".to_string()),
        )
    });

    let batch_size = config.get_int("sync", "batch_size", DEFAULT_BATCH_SIZE as i64);
    if batch_size < 1 {
        return Err(GridsyncError::ConfigInvalid {
            section: "sync".into(),
            key: "batch_size".into(),
            reason: format!("must be at least 1, got {batch_size}"),
        });
    }

    let intervals = match config.get_string("sync", "intervals") {
        Some(labels) => IntervalSpec::from_labels(&labels)?,
        None => vec![IntervalSpec::daily()],
    };

    Ok(SyncSettings {
        grids_dir,
        data_dir,
        source_path: PathBuf::from(source_path),
        batch_size: batch_size as usize,
        intervals,
    })
}

/// The full run after config resolution: discover grids, sync the pool,
/// regenerate every manifest and the grids index.
pub fn run_sync_pipeline(settings: &SyncSettings) -> Result<SyncReport, GridsyncError> {
    let registry = GridRegistry::new(settings.grids_dir.clone());
    let grids = registry.load_all()?;

    let names: Vec<&str> = grids.iter().map(|g| g.name.as_str()).collect();
    eprintln!("Found {} grid(s): {}", grids.len(), names.join(", "));
    for grid in &grids {
        eprintln!("  {}: {} tickers", grid.name, grid.count());
    }

    let pool = ticker_pool(&grids);
    eprintln!("Pool: {} unique symbols", pool.len());

    let store = FsStore::new(settings.data_dir.clone())?;
    let mut ledger = store.load_ledger()?;
    let mut info_cache = store.load_info_cache()?;
    let source = CsvSource::new(settings.source_path.clone());

    let today = Local::now().date_naive();
    let report = sync(
        &source,
        &store,
        &store,
        &mut ledger,
        &mut info_cache,
        &pool,
        &settings.intervals,
        today,
        settings.batch_size,
    )?;

    write_manifests(&grids, &store, settings)?;
    Ok(report)
}

fn write_manifests(
    grids: &[Grid],
    store: &FsStore,
    settings: &SyncSettings,
) -> Result<(), GridsyncError> {
    // One timestamp shared by the index and every manifest, so consumers
    // can tell they were generated together.
    let generated = Local::now().naive_local();
    let primary_suffix = &settings.intervals[0].suffix;

    for grid in grids {
        let manifest = build_manifest(grid, store, primary_suffix, generated);
        store.write_manifest(&manifest)?;
        eprintln!(
            "  Manifest written: manifest_{}.json ({} tickers)",
            manifest.grid,
            manifest.tickers.len()
        );
    }

    let names: Vec<String> = grids.iter().map(|g| g.name.clone()).collect();
    store.write_index(&build_index(&names, generated))?;
    eprintln!("  grids.json written: {} grids registered", names.len());
    Ok(())
}

fn run_sync(
    config_path: &PathBuf,
    grids_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    dry_run: bool,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_sync_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let settings = match build_settings(&adapter, grids_dir, data_dir) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if dry_run {
        return run_dry_run(&settings);
    }

    match run_sync_pipeline(&settings) {
        Ok(report) => {
            eprintln!();
            for interval in &report.intervals {
                eprintln!(
                    "[{}] updated: {}  skipped: {}  failed: {}",
                    interval.label,
                    interval.updated.len(),
                    interval.skipped.len(),
                    interval.failed.len()
                );
                if !interval.failed.is_empty() {
                    eprintln!("[{}] failed: {}", interval.label, interval.failed.join(", "));
                }
            }
            // Individual failures are non-fatal; only a grid-less run is.
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Report what a sync would fetch, writing nothing.
fn run_dry_run(settings: &SyncSettings) -> ExitCode {
    let registry = GridRegistry::new(settings.grids_dir.clone());
    let grids = match registry.load_all() {
        Ok(g) => g,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let pool = ticker_pool(&grids);
    eprintln!(
        "Found {} grid(s), {} unique symbols",
        grids.len(),
        pool.len()
    );

    let store = match FsStore::new(settings.data_dir.clone()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let ledger = match store.load_ledger() {
        Ok(l) => l,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let today = Local::now().date_naive();
    for spec in &settings.intervals {
        let stale = stale_symbols(&ledger, &store, &pool, spec, today);
        eprintln!(
            "[{}] would fetch {} symbol(s) in batches of {}",
            spec.label,
            stale.len(),
            settings.batch_size
        );
        if !stale.is_empty() {
            eprintln!("[{}] stale: {}", spec.label, stale.join(", "));
        }
    }

    eprintln!("\nDry run complete: nothing written");
    ExitCode::SUCCESS
}

fn run_list_grids(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let settings = match build_settings(&adapter, None, None) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let registry = GridRegistry::new(settings.grids_dir);
    match registry.load_all() {
        Ok(grids) => {
            for grid in &grids {
                println!("{}\t{} tickers", grid.name, grid.count());
            }
            eprintln!("{} grid(s) found", grids.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_status(symbol: &str, config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let settings = match build_settings(&adapter, None, None) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let store = match FsStore::new(settings.data_dir.clone()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let ledger = match store.load_ledger() {
        Ok(l) => l,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbol = symbol.to_uppercase();
    for spec in &settings.intervals {
        let artifact = store.has_artifact(&symbol, &spec.suffix);
        match ledger.last_refresh(&symbol, &spec.label) {
            Some(date) => println!(
                "{symbol} [{}]: last refreshed {date}, artifact {}",
                spec.label,
                if artifact { "present" } else { "MISSING" }
            ),
            None => println!(
                "{symbol} [{}]: never refreshed, artifact {}",
                spec.label,
                if artifact { "present" } else { "absent" }
            ),
        }
    }
    ExitCode::SUCCESS
}

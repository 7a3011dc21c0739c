//! Filesystem data-directory adapter.
//!
//! Everything lives under one data dir: `<SYMBOL><suffix>.json` artifacts,
//! `manifest_<grid>.json` per grid, `grids.json`, and the two state files
//! `cache_meta.json` and `info_cache.json`. Documents are written to a
//! temp file and renamed into place, so readers never observe a partial
//! series.

use crate::domain::artifact::Artifact;
use crate::domain::error::GridsyncError;
use crate::domain::info::InfoCache;
use crate::domain::ledger::CacheLedger;
use crate::domain::manifest::{GridsIndex, Manifest};
use crate::ports::artifact_store::ArtifactStore;
use crate::ports::state_store::StateStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

const LEDGER_FILE: &str = "cache_meta.json";
const INFO_CACHE_FILE: &str = "info_cache.json";
const INDEX_FILE: &str = "grids.json";

pub struct FsStore {
    data_dir: PathBuf,
}

impl FsStore {
    pub fn new(data_dir: PathBuf) -> Result<Self, GridsyncError> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn artifact_path(&self, symbol: &str, suffix: &str) -> PathBuf {
        self.data_dir.join(format!("{symbol}{suffix}.json"))
    }

    fn manifest_path(&self, grid: &str) -> PathBuf {
        self.data_dir.join(format!("manifest_{grid}.json"))
    }

    fn write_json<T: Serialize>(
        &self,
        path: &Path,
        value: &T,
        pretty: bool,
    ) -> Result<(), GridsyncError> {
        let json = if pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
        .map_err(|e| GridsyncError::Store {
            reason: format!("failed to serialize {}: {e}", path.display()),
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    fn read_json_or_default<T>(&self, file_name: &str) -> Result<T, GridsyncError>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.data_dir.join(file_name);
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| GridsyncError::Store {
            reason: format!("failed to parse {}: {e}", path.display()),
        })
    }
}

impl ArtifactStore for FsStore {
    fn has_artifact(&self, symbol: &str, suffix: &str) -> bool {
        self.artifact_path(symbol, suffix).exists()
    }

    fn write_artifact(&self, artifact: &Artifact, suffix: &str) -> Result<(), GridsyncError> {
        // Artifacts are the bulk of the data dir; keep them compact.
        self.write_json(&self.artifact_path(&artifact.ticker, suffix), artifact, false)
    }

    fn write_manifest(&self, manifest: &Manifest) -> Result<(), GridsyncError> {
        self.write_json(&self.manifest_path(&manifest.grid), manifest, true)
    }

    fn write_index(&self, index: &GridsIndex) -> Result<(), GridsyncError> {
        self.write_json(&self.data_dir.join(INDEX_FILE), index, true)
    }
}

impl StateStore for FsStore {
    fn load_ledger(&self) -> Result<CacheLedger, GridsyncError> {
        self.read_json_or_default(LEDGER_FILE)
    }

    fn save_ledger(&self, ledger: &CacheLedger) -> Result<(), GridsyncError> {
        self.write_json(&self.data_dir.join(LEDGER_FILE), ledger, true)
    }

    fn load_info_cache(&self) -> Result<InfoCache, GridsyncError> {
        self.read_json_or_default(INFO_CACHE_FILE)
    }

    fn save_info_cache(&self, cache: &InfoCache) -> Result<(), GridsyncError> {
        self.write_json(&self.data_dir.join(INFO_CACHE_FILE), cache, true)
    }
}

//! Ticker-list discovery adapter.
//!
//! Grids are declared as `tickers_<name>.txt` files in one directory; the
//! grid name is whatever sits between the prefix and the extension. Adding
//! a grid is just dropping a new file in and re-running.

use crate::domain::error::GridsyncError;
use crate::domain::grid::{parse_symbol_lines, Grid};
use std::fs;
use std::path::{Path, PathBuf};

const PREFIX: &str = "tickers_";
const EXTENSION: &str = ".txt";

pub struct GridRegistry {
    grids_dir: PathBuf,
}

impl GridRegistry {
    pub fn new(grids_dir: PathBuf) -> Self {
        Self { grids_dir }
    }

    /// Enumerate grid sources, sorted by file name. That order is the
    /// discovery order the grids index publishes. Zero sources is fatal:
    /// the run cannot proceed without at least one grid.
    pub fn discover(&self) -> Result<Vec<(String, PathBuf)>, GridsyncError> {
        let entries = fs::read_dir(&self.grids_dir)?;
        let mut grids = Vec::new();

        for entry in entries {
            let entry = entry?;
            let file_name = entry.file_name();
            let name_str = file_name.to_string_lossy();

            if let Some(stem) = name_str
                .strip_prefix(PREFIX)
                .and_then(|rest| rest.strip_suffix(EXTENSION))
            {
                if !stem.is_empty() {
                    grids.push((stem.to_string(), entry.path()));
                }
            }
        }

        if grids.is_empty() {
            return Err(GridsyncError::NoGrids {
                dir: self.grids_dir.display().to_string(),
            });
        }

        grids.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(grids)
    }

    pub fn load(&self, name: &str, path: &Path) -> Result<Grid, GridsyncError> {
        let content = fs::read_to_string(path)?;
        Ok(Grid {
            name: name.to_string(),
            symbols: parse_symbol_lines(&content),
        })
    }

    /// Discover and load every grid, in discovery order.
    pub fn load_all(&self) -> Result<Vec<Grid>, GridsyncError> {
        self.discover()?
            .into_iter()
            .map(|(name, path)| self.load(&name, &path))
            .collect()
    }
}

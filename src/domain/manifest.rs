//! Per-grid manifests and the global grids index.

use crate::domain::grid::Grid;
use crate::ports::artifact_store::ArtifactStore;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The published list of symbols with usable data for one grid. Fully
/// regenerated every run, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub grid: String,
    pub tickers: Vec<String>,
    pub generated: NaiveDateTime,
}

/// Singleton index of all grids, so consumers can enumerate them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridsIndex {
    pub grids: Vec<String>,
    pub generated: NaiveDateTime,
}

/// A symbol is listed iff its primary-interval artifact exists right now:
/// an artifact surviving from an earlier run counts even if this run's
/// fetch failed, and a symbol that has never fetched successfully is
/// silently omitted. Order follows the grid's declared order, not pool
/// order.
pub fn build_manifest(
    grid: &Grid,
    store: &dyn ArtifactStore,
    primary_suffix: &str,
    generated: NaiveDateTime,
) -> Manifest {
    let tickers = grid
        .symbols
        .iter()
        .filter(|symbol| store.has_artifact(symbol, primary_suffix))
        .cloned()
        .collect();

    Manifest {
        grid: grid.name.clone(),
        tickers,
        generated,
    }
}

/// Grid names in discovery order, stamped with the same timestamp as every
/// manifest written in the run.
pub fn build_index(grid_names: &[String], generated: NaiveDateTime) -> GridsIndex {
    GridsIndex {
        grids: grid_names.to_vec(),
        generated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::artifact::Artifact;
    use crate::domain::error::GridsyncError;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    struct FixedStore {
        present: HashSet<(String, String)>,
    }

    impl FixedStore {
        fn with(symbols: &[(&str, &str)]) -> Self {
            Self {
                present: symbols
                    .iter()
                    .map(|(s, x)| (s.to_string(), x.to_string()))
                    .collect(),
            }
        }
    }

    impl ArtifactStore for FixedStore {
        fn has_artifact(&self, symbol: &str, suffix: &str) -> bool {
            self.present
                .contains(&(symbol.to_string(), suffix.to_string()))
        }

        fn write_artifact(&self, _: &Artifact, _: &str) -> Result<(), GridsyncError> {
            unreachable!("manifest building never writes artifacts")
        }

        fn write_manifest(&self, _: &Manifest) -> Result<(), GridsyncError> {
            unreachable!()
        }

        fn write_index(&self, _: &GridsIndex) -> Result<(), GridsyncError> {
            unreachable!()
        }
    }

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn lists_only_symbols_with_primary_artifact() {
        let grid = Grid {
            name: "tech".into(),
            symbols: vec!["AAPL".into(), "MSFT".into(), "NVDA".into()],
        };
        let store = FixedStore::with(&[("AAPL", ""), ("NVDA", "")]);

        let manifest = build_manifest(&grid, &store, "", stamp());
        assert_eq!(manifest.grid, "tech");
        assert_eq!(manifest.tickers, vec!["AAPL", "NVDA"]);
    }

    #[test]
    fn order_follows_grid_declaration_not_pool_order() {
        let grid = Grid {
            name: "faves".into(),
            symbols: vec!["ZM".into(), "AAPL".into(), "MSFT".into()],
        };
        let store = FixedStore::with(&[("AAPL", ""), ("MSFT", ""), ("ZM", "")]);

        let manifest = build_manifest(&grid, &store, "", stamp());
        assert_eq!(manifest.tickers, vec!["ZM", "AAPL", "MSFT"]);
    }

    #[test]
    fn availability_checks_the_primary_suffix_only() {
        let grid = Grid {
            name: "tech".into(),
            symbols: vec!["AAPL".into()],
        };
        // Only the weekly artifact exists.
        let store = FixedStore::with(&[("AAPL", "_w")]);

        let manifest = build_manifest(&grid, &store, "", stamp());
        assert!(manifest.tickers.is_empty());
    }

    #[test]
    fn index_preserves_discovery_order() {
        let names = vec!["tech".to_string(), "banks".to_string()];
        let index = build_index(&names, stamp());
        assert_eq!(index.grids, vec!["tech", "banks"]);
        assert_eq!(index.generated, stamp());
    }

    #[test]
    fn manifest_serializes_with_wire_keys() {
        let manifest = Manifest {
            grid: "tech".into(),
            tickers: vec!["AAPL".into()],
            generated: stamp(),
        };
        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["grid"], "tech");
        assert_eq!(json["tickers"][0], "AAPL");
        assert_eq!(json["generated"], "2024-01-15T09:30:00");
    }
}

//! Artifact and manifest persistence port.

use crate::domain::artifact::Artifact;
use crate::domain::error::GridsyncError;
use crate::domain::manifest::{GridsIndex, Manifest};

/// Where artifacts, manifests, and the grids index live. One artifact per
/// (symbol, interval suffix); writes must be atomic from a reader's point
/// of view.
pub trait ArtifactStore {
    fn has_artifact(&self, symbol: &str, suffix: &str) -> bool;

    fn write_artifact(&self, artifact: &Artifact, suffix: &str) -> Result<(), GridsyncError>;

    fn write_manifest(&self, manifest: &Manifest) -> Result<(), GridsyncError>;

    fn write_index(&self, index: &GridsIndex) -> Result<(), GridsyncError>;
}

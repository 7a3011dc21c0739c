//! Domain error types.

/// Top-level error type for gridsync.
#[derive(Debug, thiserror::Error)]
pub enum GridsyncError {
    #[error("no grid sources found in {dir}")]
    NoGrids { dir: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("fetch failed for {symbol}: {reason}")]
    Fetch { symbol: String, reason: String },

    #[error("malformed data for {symbol}: {reason}")]
    Parse { symbol: String, reason: String },

    #[error("store error: {reason}")]
    Store { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&GridsyncError> for std::process::ExitCode {
    fn from(err: &GridsyncError) -> Self {
        let code: u8 = match err {
            GridsyncError::Io(_) => 1,
            GridsyncError::ConfigParse { .. }
            | GridsyncError::ConfigMissing { .. }
            | GridsyncError::ConfigInvalid { .. } => 2,
            GridsyncError::Store { .. } => 3,
            GridsyncError::Fetch { .. } | GridsyncError::Parse { .. } => 4,
            GridsyncError::NoGrids { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

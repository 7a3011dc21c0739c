//! Config validation for the sync pipeline.

use crate::domain::error::GridsyncError;
use crate::domain::interval::IntervalSpec;
use crate::domain::sync::DEFAULT_BATCH_SIZE;
use crate::ports::config_port::ConfigPort;

/// Validate everything `sync` needs before it touches the store or the
/// source: the source path must be present, batch size positive, and the
/// interval labels known.
pub fn validate_sync_config(config: &dyn ConfigPort) -> Result<(), GridsyncError> {
    if config.get_string("source", "path").is_none() {
        return Err(GridsyncError::ConfigMissing {
            section: "source".into(),
            key: "path".into(),
        });
    }

    let batch_size = config.get_int("sync", "batch_size", DEFAULT_BATCH_SIZE as i64);
    if batch_size < 1 {
        return Err(GridsyncError::ConfigInvalid {
            section: "sync".into(),
            key: "batch_size".into(),
            reason: format!("must be at least 1, got {batch_size}"),
        });
    }

    if let Some(labels) = config.get_string("sync", "intervals") {
        IntervalSpec::from_labels(&labels)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn adapter(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn minimal_valid_config_passes() {
        let config = adapter("[source]\npath = ./source\n");
        assert!(validate_sync_config(&config).is_ok());
    }

    #[test]
    fn missing_source_path_is_rejected() {
        let config = adapter("[sync]\nbatch_size = 100\n");
        let result = validate_sync_config(&config);
        assert!(matches!(
            result,
            Err(GridsyncError::ConfigMissing { section, key })
                if section == "source" && key == "path"
        ));
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let config = adapter("[source]\npath = ./source\n\n[sync]\nbatch_size = 0\n");
        assert!(matches!(
            validate_sync_config(&config),
            Err(GridsyncError::ConfigInvalid { key, .. }) if key == "batch_size"
        ));
    }

    #[test]
    fn unknown_interval_is_rejected() {
        let config = adapter("[source]\npath = ./source\n\n[sync]\nintervals = hourly\n");
        assert!(matches!(
            validate_sync_config(&config),
            Err(GridsyncError::ConfigInvalid { key, .. }) if key == "intervals"
        ));
    }

    #[test]
    fn full_config_passes() {
        let config = adapter(
            "[source]\npath = ./source\n\n[sync]\ngrids_dir = ./grids\ndata_dir = ./data\nbatch_size = 50\nintervals = daily,weekly\n",
        );
        assert!(validate_sync_config(&config).is_ok());
    }
}

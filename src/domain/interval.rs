//! Interval specifications for the fetch pipeline.

use crate::domain::error::GridsyncError;

/// One fetch cadence: how much history to request, at what sampling
/// granularity, and which artifact filename suffix it owns. The whole
/// pipeline is parameterized by a list of these; single-interval operation
/// is simply a one-element list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalSpec {
    pub label: String,
    pub span: String,
    pub granularity: String,
    pub suffix: String,
}

impl IntervalSpec {
    /// Two years of daily bars, stored without a filename suffix. This is
    /// the primary interval when it is configured first.
    pub fn daily() -> Self {
        Self {
            label: "daily".into(),
            span: "2y".into(),
            granularity: "1d".into(),
            suffix: String::new(),
        }
    }

    /// Ten years of weekly bars, stored under a `_w` suffix.
    pub fn weekly() -> Self {
        Self {
            label: "weekly".into(),
            span: "10y".into(),
            granularity: "1wk".into(),
            suffix: "_w".into(),
        }
    }

    /// Resolve a comma-separated label list (e.g. `daily,weekly`) from
    /// config into specs, in the order given. The first entry is the
    /// primary interval used for manifest availability.
    pub fn from_labels(input: &str) -> Result<Vec<IntervalSpec>, GridsyncError> {
        let mut specs = Vec::new();
        for token in input.split(',') {
            let label = token.trim().to_lowercase();
            match label.as_str() {
                "daily" => specs.push(IntervalSpec::daily()),
                "weekly" => specs.push(IntervalSpec::weekly()),
                "" => {
                    return Err(GridsyncError::ConfigInvalid {
                        section: "sync".into(),
                        key: "intervals".into(),
                        reason: "empty interval label".into(),
                    });
                }
                other => {
                    return Err(GridsyncError::ConfigInvalid {
                        section: "sync".into(),
                        key: "intervals".into(),
                        reason: format!("unknown interval '{other}'"),
                    });
                }
            }
        }
        Ok(specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_has_no_suffix() {
        let spec = IntervalSpec::daily();
        assert_eq!(spec.label, "daily");
        assert_eq!(spec.span, "2y");
        assert_eq!(spec.granularity, "1d");
        assert_eq!(spec.suffix, "");
    }

    #[test]
    fn from_labels_resolves_both_builtins() {
        let specs = IntervalSpec::from_labels("daily,weekly").unwrap();
        assert_eq!(specs, vec![IntervalSpec::daily(), IntervalSpec::weekly()]);
    }

    #[test]
    fn from_labels_trims_and_lowercases() {
        let specs = IntervalSpec::from_labels(" Weekly , DAILY ").unwrap();
        assert_eq!(specs, vec![IntervalSpec::weekly(), IntervalSpec::daily()]);
    }

    #[test]
    fn from_labels_rejects_unknown() {
        let result = IntervalSpec::from_labels("daily,hourly");
        assert!(matches!(
            result,
            Err(GridsyncError::ConfigInvalid { key, .. }) if key == "intervals"
        ));
    }

    #[test]
    fn from_labels_rejects_empty_token() {
        assert!(IntervalSpec::from_labels("daily,,weekly").is_err());
    }
}

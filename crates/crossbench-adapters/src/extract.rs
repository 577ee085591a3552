//! Turning one result location into a [`ResultRecord`].

use crate::scan::ResultLocation;
use crossbench_types::{CriterionBenchmark, CriterionEstimates, ResultRecord};
use serde::de::DeserializeOwned;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("missing artifact {}", .path.display())]
    MissingArtifact { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid `{field}` in {}: {reason}", .path.display())]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        reason: String,
    },
}

/// Read both artifacts of `location` and build a record from them.
///
/// Timings must be finite and non-negative, and the mean must lie inside its
/// confidence interval.
pub fn extract_record(location: &ResultLocation) -> Result<ResultRecord, ExtractError> {
    let estimates_path = location.estimates_path();
    let estimates: CriterionEstimates = read_artifact(&estimates_path)?;
    let info: CriterionBenchmark = read_artifact(&location.benchmark_path())?;

    let record = ResultRecord {
        group_id: info.group_id.clone(),
        function_id: info.function_id.clone(),
        test_case: info.test_case().to_string(),
        mean_time_ns: estimates.mean.point_estimate,
        median_time_ns: estimates.median.point_estimate,
        std_dev: estimates.std_dev.point_estimate,
        mean_confidence_lower: estimates.mean.confidence_interval.lower_bound,
        mean_confidence_upper: estimates.mean.confidence_interval.upper_bound,
        throughput_bytes: info.throughput_bytes(),
    };

    validate(&record, &estimates_path)?;
    Ok(record)
}

/// Like [`extract_record`], but logs the failure and yields `None`.
pub fn try_extract(location: &ResultLocation) -> Option<ResultRecord> {
    match extract_record(location) {
        Ok(record) => Some(record),
        Err(err) => {
            warn!(
                location = %location.dir.display(),
                error = %err,
                "skipping result location"
            );
            None
        }
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ExtractError> {
    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ExtractError::MissingArtifact {
                path: path.to_path_buf(),
            }
        } else {
            ExtractError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    serde_json::from_slice(&bytes).map_err(|source| ExtractError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

fn validate(record: &ResultRecord, path: &Path) -> Result<(), ExtractError> {
    let invalid = |field: &'static str, reason: String| ExtractError::InvalidField {
        path: path.to_path_buf(),
        field,
        reason,
    };

    let timings = [
        ("mean.point_estimate", record.mean_time_ns),
        ("median.point_estimate", record.median_time_ns),
        ("std_dev.point_estimate", record.std_dev),
        ("mean.confidence_interval.lower_bound", record.mean_confidence_lower),
        ("mean.confidence_interval.upper_bound", record.mean_confidence_upper),
    ];
    for (field, value) in timings {
        if !value.is_finite() || value < 0.0 {
            return Err(invalid(
                field,
                format!("expected a finite non-negative value, got {value}"),
            ));
        }
    }

    let lower = record.mean_confidence_lower;
    let mean = record.mean_time_ns;
    let upper = record.mean_confidence_upper;
    if !(lower <= mean && mean <= upper) {
        return Err(invalid(
            "mean.confidence_interval",
            format!("mean {mean} is outside [{lower}, {upper}]"),
        ));
    }

    Ok(())
}

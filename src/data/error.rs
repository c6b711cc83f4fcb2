use std::path::{Path, PathBuf};

use thiserror::Error;

// ---------------------------------------------------------------------------
// ChartError – everything that can abort one chart's pipeline
// ---------------------------------------------------------------------------

/// Failure kinds surfaced by the loader and the aggregators.
///
/// None of these are transient: they all describe missing or malformed input,
/// so callers abort the affected chart and move on to the next one.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Expected input is absent, or a directory holds no result files.
    #[error("missing data in {}: {reason}", .path.display())]
    MissingData { path: PathBuf, reason: String },

    /// Unreadable, non-numeric or non-rectangular content.
    #[error("bad data format in {}: {reason}", .path.display())]
    DataFormat { path: PathBuf, reason: String },

    /// Inconsistent prototype counts, dimensionality or series lengths.
    #[error("shape error in {dataset}: {reason}")]
    Shape { dataset: String, reason: String },

    /// Number of loaded datasets differs from the number of expected labels.
    #[error("{dataset}: {found} dataset(s) loaded but {expected} label(s) configured")]
    Mismatch {
        dataset: String,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, ChartError>;

impl ChartError {
    pub fn missing(path: &Path, reason: impl Into<String>) -> Self {
        ChartError::MissingData {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn format(path: &Path, reason: impl Into<String>) -> Self {
        ChartError::DataFormat {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn shape(dataset: impl Into<String>, reason: impl Into<String>) -> Self {
        ChartError::Shape {
            dataset: dataset.into(),
            reason: reason.into(),
        }
    }

    /// Map an I/O failure on `path`: "not found" is missing data, anything
    /// else means the file could not be read as data.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            ChartError::missing(path, "file or directory does not exist")
        } else {
            ChartError::format(path, err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = ChartError::format(Path::new("Gaussian/eps.csv"), "row 3 has 1 column(s), expected 2");
        let msg = err.to_string();
        assert!(msg.contains("Gaussian/eps.csv"), "{msg}");
        assert!(msg.contains("row 3"), "{msg}");

        let err = ChartError::Mismatch {
            dataset: "Bernoulli".into(),
            expected: 4,
            found: 3,
        };
        assert_eq!(
            err.to_string(),
            "Bernoulli: 3 dataset(s) loaded but 4 label(s) configured"
        );
    }

    #[test]
    fn not_found_maps_to_missing_data() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            ChartError::from_io(Path::new("x.csv"), io),
            ChartError::MissingData { .. }
        ));

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(
            ChartError::from_io(Path::new("x.csv"), io),
            ChartError::DataFormat { .. }
        ));
    }
}

//! Common error types used across all stats charts crates
//! Provides consistent error handling and reporting

use crate::tree::MetricPath;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural errors raised while reading a series tree
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum SeriesError {
    // Traversal errors
    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    #[error("Path does not name a record: {path}")]
    NotARecord { path: String },

    #[error("Path does not name a nested tree: {path}")]
    NotABranch { path: String },

    #[error("Missing axis record: {key}")]
    MissingAxis { key: String },

    // Decoding errors
    #[error("Invalid data format: expected {expected} but got {actual}")]
    InvalidFormat { expected: String, actual: String },

    #[error("Length mismatch: axis has {expected} samples but data has {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Axis value missing at index {index}")]
    AxisValueMissing { index: usize },

    #[error("Malformed mutations: {message}")]
    MalformedMutations { message: String },

    // Tree-wide checks
    #[error("Tree validation failed: {errors:?}")]
    Validation { errors: Vec<String> },
}

/// Result type alias for series operations
pub type SeriesResult<T> = Result<T, SeriesError>;

/// A structural error tied to the metric whose chart could not be prepared
#[derive(Error, Debug, Clone, PartialEq)]
#[error("metric `{path}`: {source}")]
pub struct ChartError {
    pub path: MetricPath,
    #[source]
    pub source: SeriesError,
}

impl ChartError {
    pub fn new(path: MetricPath, source: SeriesError) -> Self {
        Self { path, source }
    }
}

/// Attach the offending metric path to a series result
pub trait WithMetricPath<T> {
    fn for_metric(self, path: &MetricPath) -> Result<T, ChartError>;
}

impl<T> WithMetricPath<T> for SeriesResult<T> {
    fn for_metric(self, path: &MetricPath) -> Result<T, ChartError> {
        self.map_err(|source| ChartError::new(path.clone(), source))
    }
}

/// Helper macro for creating errors with fields
#[macro_export]
macro_rules! series_error {
    ($variant:ident { $($field:ident: $value:expr),* }) => {
        $crate::errors::SeriesError::$variant {
            $($field: $value.into()),*
        }
    };
}

//! Data Manager crate for stats charts
//! Turns snapshot trees into chart-ready series
//!
//! The pipeline for one chart is: resolve the metric in the tree, decode it
//! against the selected axis ([`decoder`]), optionally move it onto another
//! axis ([`axis`]) and smooth it with a trailing window ([`aggregation`]).
//! Every step is a pure function over borrowed input.

pub mod aggregation;
pub mod axis;
pub mod compression;
pub mod decoder;
pub mod manager;

pub use aggregation::{aggregate, aggregate_on_axis};
pub use axis::remap_axis;
pub use compression::{decode_runs, EncodedValues, RunLengthCodec, RunLengthConfig};
pub use decoder::{check_length, decode_axis, decode_series, decode_values, zip_axis};
pub use manager::{
    prepare_chart, prepare_charts, ChartManager, ChartRequest, ChartResult, PreparedChart,
};

pub use stats_charts_shared as shared;

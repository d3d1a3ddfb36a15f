//! Shared types for the stats charts workspace
//!
//! This crate contains the time-series data model shared between the
//! data-manager and config-system crates: series records, the nested series
//! tree they live in, per-chart options and the structural error taxonomy.
//! Everything here is a plain value; nothing holds interior mutability, so
//! trees can be read from several threads at once.

pub mod chart_config;
pub mod data_types;
pub mod errors;
pub mod tree;

pub use chart_config::{AggregationMode, AxisKind, ChartOptions, GAME_TIME_KEY, TIME_STAMP_KEY};
pub use data_types::{decoded_length, Mutation, Point, Series, SeriesData, SeriesRecord};
pub use errors::{ChartError, SeriesError, SeriesResult, WithMetricPath};
pub use tree::{MetricPath, SeriesNode, SeriesTree, WILDCARD};

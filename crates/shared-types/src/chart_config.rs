//! Per-chart options supplied by the dashboard

use serde::{Deserialize, Serialize};
use std::fmt;

/// Root key holding the wall-clock axis
pub const TIME_STAMP_KEY: &str = "timeStamp";

/// Root key holding the simulation tick axis
pub const GAME_TIME_KEY: &str = "gameTime";

/// Which x-axis a chart is plotted or windowed against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    /// Wall-clock milliseconds (`timeStamp`)
    #[default]
    Time,
    /// Simulation ticks (`gameTime`)
    Tick,
}

impl AxisKind {
    /// Root tree key of the axis record
    pub fn key(&self) -> &'static str {
        match self {
            AxisKind::Time => TIME_STAMP_KEY,
            AxisKind::Tick => GAME_TIME_KEY,
        }
    }
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisKind::Time => write!(f, "time"),
            AxisKind::Tick => write!(f, "tick"),
        }
    }
}

/// How samples inside one window are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    #[default]
    Average,
    Sum,
    /// Series is returned untouched
    #[serde(rename = "none")]
    Passthrough,
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationMode::Average => write!(f, "average"),
            AggregationMode::Sum => write!(f, "sum"),
            AggregationMode::Passthrough => write!(f, "none"),
        }
    }
}

/// Options for preparing one chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    /// Axis the chart is plotted against
    #[serde(default)]
    pub axis: AxisKind,
    /// Window size in units of the windowing axis; absent or zero disables
    /// aggregation
    #[serde(default, rename = "intervalForAggregation")]
    pub interval: Option<f64>,
    #[serde(default)]
    pub mode: AggregationMode,
    /// Axis used to build windows when it differs from the display axis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_axis: Option<AxisKind>,
}

impl ChartOptions {
    pub fn new(axis: AxisKind, interval: Option<f64>, mode: AggregationMode) -> Self {
        Self {
            axis,
            interval,
            mode,
            aggregate_axis: None,
        }
    }

    pub fn with_aggregate_axis(mut self, axis: AxisKind) -> Self {
        self.aggregate_axis = Some(axis);
        self
    }

    /// Axis the aggregation windows are measured on; the display axis unless
    /// `aggregate_axis` selects the other one
    pub fn window_axis(&self) -> AxisKind {
        self.aggregate_axis.unwrap_or(self.axis)
    }
}

//! Configuration system for stats charts
//! Manages dashboard chart lists, per-chart options and built-in presets

use log::debug;
use serde::{Deserialize, Serialize};
use stats_charts_data::ChartRequest;
use stats_charts_shared::{AggregationMode, AxisKind, ChartOptions, MetricPath, SeriesTree, WILDCARD};
use thiserror::Error;

pub mod parser;
pub mod presets;
pub mod validation;

pub use parser::{ConfigFormat, ConfigParser, ConfigSerializer};
pub use presets::PresetManager;
pub use validation::ConfigValidator;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Per-chart option overrides; unset fields come from the dashboard defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<AxisKind>,
    #[serde(
        default,
        rename = "intervalForAggregation",
        skip_serializing_if = "Option::is_none"
    )]
    pub interval: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<AggregationMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_axis: Option<AxisKind>,
}

impl ChartOverrides {
    pub fn apply(&self, defaults: &ChartOptions) -> ChartOptions {
        ChartOptions {
            axis: self.axis.unwrap_or(defaults.axis),
            interval: self.interval.or(defaults.interval),
            mode: self.mode.unwrap_or(defaults.mode),
            aggregate_axis: self.aggregate_axis.or(defaults.aggregate_axis),
        }
    }
}

/// One configured chart; `path` may contain `*` segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub label: String,
    pub path: MetricPath,
    #[serde(default)]
    pub options: ChartOverrides,
}

impl ChartSpec {
    pub fn new(label: &str, path: &str) -> Self {
        Self {
            label: label.to_string(),
            path: MetricPath::parse(path),
            options: ChartOverrides::default(),
        }
    }

    pub fn with_mode(mut self, mode: AggregationMode) -> Self {
        self.options.mode = Some(mode);
        self
    }

    pub fn with_interval(mut self, interval: f64) -> Self {
        self.options.interval = Some(interval);
        self
    }
}

/// A chart request with the label the dashboard shows for it
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRequest {
    pub label: String,
    pub request: ChartRequest,
}

/// Dashboard description loaded from a config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub defaults: ChartOptions,
    #[serde(default)]
    pub charts: Vec<ChartSpec>,
}

impl DashboardConfig {
    /// Effective options of one chart
    pub fn options_for(&self, chart: &ChartSpec) -> ChartOptions {
        chart.options.apply(&self.defaults)
    }

    /// Turn the configured charts into concrete requests against `tree`
    ///
    /// Wildcard paths expand to every matching metric, labelled with the keys
    /// the wildcards matched. A wildcard path that matches nothing is kept
    /// as-is so the chart pipeline reports it as missing.
    pub fn requests(&self, tree: &SeriesTree) -> Vec<LabeledRequest> {
        let mut requests = Vec::new();

        for chart in &self.charts {
            let options = self.options_for(chart);
            if !chart.path.has_wildcard() {
                requests.push(LabeledRequest {
                    label: chart.label.clone(),
                    request: ChartRequest::new(chart.path.clone(), options),
                });
                continue;
            }

            let matches = tree.expand(&chart.path);
            debug!("{} expands to {} metrics", chart.path, matches.len());
            if matches.is_empty() {
                requests.push(LabeledRequest {
                    label: chart.label.clone(),
                    request: ChartRequest::new(chart.path.clone(), options),
                });
                continue;
            }

            for path in matches {
                let label = format!("{} [{}]", chart.label, wildcard_keys(&chart.path, &path));
                requests.push(LabeledRequest {
                    label,
                    request: ChartRequest::new(path, options),
                });
            }
        }

        requests
    }
}

/// Keys that filled the wildcard positions of `pattern`, joined by '.'
fn wildcard_keys(pattern: &MetricPath, path: &MetricPath) -> String {
    pattern
        .segments()
        .iter()
        .zip(path.segments())
        .filter(|(segment, _)| segment.as_str() == WILDCARD)
        .map(|(_, key)| key.as_str())
        .collect::<Vec<_>>()
        .join(".")
}

//! Chart preparation over one snapshot tree
//!
//! [`ChartManager`] borrows a [`SeriesTree`] for the duration of one dashboard
//! refresh and turns metric paths into chart-ready series. Each chart is
//! prepared independently: a structural fault in one metric is reported for
//! that metric only and never stops the others.

use crate::aggregation::{aggregate, aggregate_on_axis};
use crate::decoder::{check_length, decode_axis, decode_values, zip_axis};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use stats_charts_shared::{
    AxisKind, ChartError, ChartOptions, MetricPath, Series, SeriesError, SeriesResult, SeriesTree,
    WithMetricPath,
};
use std::sync::OnceLock;

/// One chart the dashboard wants drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub path: MetricPath,
    #[serde(default)]
    pub options: ChartOptions,
}

impl ChartRequest {
    pub fn new(path: impl Into<MetricPath>, options: ChartOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }
}

/// Series ready for the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedChart {
    pub path: MetricPath,
    pub options: ChartOptions,
    /// `[x, y]` pairs; `null` y-values are gaps
    pub points: Series,
}

/// Result of preparing one chart
pub type ChartResult = Result<PreparedChart, ChartError>;

/// Prepares charts from a borrowed snapshot tree
///
/// Axis records are decoded at most once per manager.
pub struct ChartManager<'a> {
    tree: &'a SeriesTree,
    time_axis: OnceLock<SeriesResult<Vec<f64>>>,
    tick_axis: OnceLock<SeriesResult<Vec<f64>>>,
}

impl<'a> ChartManager<'a> {
    pub fn new(tree: &'a SeriesTree) -> Self {
        Self {
            tree,
            time_axis: OnceLock::new(),
            tick_axis: OnceLock::new(),
        }
    }

    pub fn tree(&self) -> &'a SeriesTree {
        self.tree
    }

    /// Decoded values of the root axis record
    pub fn axis_values(&self, kind: AxisKind) -> SeriesResult<&[f64]> {
        let cell = match kind {
            AxisKind::Time => &self.time_axis,
            AxisKind::Tick => &self.tick_axis,
        };

        cell.get_or_init(|| {
            debug!("decoding {} axis", kind);
            self.tree.axis(kind).and_then(decode_axis)
        })
        .as_deref()
        .map_err(|err| err.clone())
    }

    /// Resolve, decode and aggregate the metric at `path`
    pub fn prepare(&self, path: &MetricPath, options: &ChartOptions) -> Result<Series, ChartError> {
        let record = self.tree.resolve(path).for_metric(path)?;
        let xs = self.axis_values(options.axis).for_metric(path)?;
        check_length(record, xs.len()).for_metric(path)?;
        let ys = decode_values(record).for_metric(path)?;
        let series = zip_axis(xs, &ys).for_metric(path)?;

        let window_axis = options.window_axis();
        if window_axis == options.axis {
            return Ok(aggregate(&series, options.interval, options.mode));
        }

        match self.axis_values(window_axis) {
            Ok(window_x) => Ok(aggregate_on_axis(
                &series,
                options.interval,
                options.mode,
                window_x,
            )),
            Err(err) => {
                warn!(
                    "{}: {} axis unavailable ({}), windowing on {} axis",
                    path, window_axis, err, options.axis
                );
                Ok(aggregate(&series, options.interval, options.mode))
            }
        }
    }

    pub fn prepare_request(&self, request: &ChartRequest) -> ChartResult {
        let points = self.prepare(&request.path, &request.options)?;
        Ok(PreparedChart {
            path: request.path.clone(),
            options: request.options,
            points,
        })
    }

    /// Prepare every request, keeping failures per chart
    pub fn prepare_all(&self, requests: &[ChartRequest]) -> Vec<ChartResult> {
        requests
            .iter()
            .map(|request| {
                let result = self.prepare_request(request);
                if let Err(err) = &result {
                    warn!("chart skipped: {}", err);
                }
                result
            })
            .collect()
    }

    /// Expand `*` segments of `pattern` and prepare every concrete metric
    ///
    /// A pattern matching nothing is reported as a missing path.
    pub fn prepare_pattern(&self, pattern: &MetricPath, options: &ChartOptions) -> Vec<ChartResult> {
        let paths = self.tree.expand(pattern);
        if paths.is_empty() {
            let err = ChartError::new(
                pattern.clone(),
                SeriesError::PathNotFound {
                    path: pattern.to_string(),
                },
            );
            warn!("chart skipped: {}", err);
            return vec![Err(err)];
        }

        let requests: Vec<ChartRequest> = paths
            .into_iter()
            .map(|path| ChartRequest {
                path,
                options: *options,
            })
            .collect();
        self.prepare_all(&requests)
    }
}

/// Prepare a single chart without keeping a manager around
pub fn prepare_chart(
    tree: &SeriesTree,
    path: &MetricPath,
    options: &ChartOptions,
) -> Result<Series, ChartError> {
    ChartManager::new(tree).prepare(path, options)
}

/// Prepare many charts against one tree, one result per request
pub fn prepare_charts(tree: &SeriesTree, requests: &[ChartRequest]) -> Vec<ChartResult> {
    ChartManager::new(tree).prepare_all(requests)
}

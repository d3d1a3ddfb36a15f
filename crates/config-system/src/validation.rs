//! Configuration validation utilities

use crate::{ChartSpec, ConfigError, DashboardConfig, Result};
use stats_charts_shared::ChartOptions;
use std::collections::HashSet;

/// Dashboard configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration
    pub fn validate(config: &DashboardConfig) -> Result<()> {
        if config.charts.is_empty() {
            return Err(ConfigError::Validation(
                "Dashboard must define at least one chart".to_string(),
            ));
        }

        Self::validate_interval("defaults", config.defaults.interval)?;

        let mut labels = HashSet::new();
        for chart in &config.charts {
            Self::validate_chart(chart)?;
            Self::validate_options(&chart.label, &config.options_for(chart))?;

            if !labels.insert(chart.label.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "Duplicate chart label: {}",
                    chart.label
                )));
            }
        }

        Ok(())
    }

    /// Validate label and path of one chart
    fn validate_chart(chart: &ChartSpec) -> Result<()> {
        if chart.label.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "Chart for {} has an empty label",
                chart.path
            )));
        }

        if chart.path.is_empty() {
            return Err(ConfigError::Validation(format!(
                "Chart {} has an empty path",
                chart.label
            )));
        }

        if chart.path.segments().iter().any(|segment| segment.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "Chart {} has an empty segment in path {}",
                chart.label, chart.path
            )));
        }

        Ok(())
    }

    fn validate_options(label: &str, options: &ChartOptions) -> Result<()> {
        Self::validate_interval(label, options.interval)
    }

    fn validate_interval(owner: &str, interval: Option<f64>) -> Result<()> {
        match interval {
            Some(interval) if !interval.is_finite() || interval < 0.0 => {
                Err(ConfigError::Validation(format!(
                    "Invalid intervalForAggregation for {}: {}. Must be a finite number >= 0",
                    owner, interval
                )))
            }
            _ => Ok(()),
        }
    }
}

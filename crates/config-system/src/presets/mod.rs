//! Preset dashboards for common chart groups

pub mod global_presets;
pub mod room_presets;

pub use global_presets::*;
pub use room_presets::*;

use crate::{ChartSpec, DashboardConfig};
use serde::{Deserialize, Serialize};
use stats_charts_shared::ChartOptions;

/// Named group of charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPreset {
    pub name: String,
    pub description: String,
    pub charts: Vec<ChartSpec>,
}

impl ChartPreset {
    /// Dashboard built from this preset's charts
    pub fn to_config(&self, defaults: ChartOptions) -> DashboardConfig {
        DashboardConfig {
            defaults,
            charts: self.charts.clone(),
        }
    }
}

/// Get all preset groups
pub fn get_all_presets() -> Vec<ChartPreset> {
    vec![global_presets::create_global_preset(), room_presets::create_room_preset()]
}

/// Preset manager for the built-in dashboards
pub struct PresetManager {
    presets: Vec<ChartPreset>,
}

impl Default for PresetManager {
    fn default() -> Self {
        Self {
            presets: get_all_presets(),
        }
    }
}

impl PresetManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_presets_by_name(&self) -> Vec<&str> {
        self.presets.iter().map(|p| p.name.as_str()).collect()
    }

    /// Get all presets
    pub fn get_all_presets(&self) -> &[ChartPreset] {
        &self.presets
    }

    pub fn find_preset(&self, name: &str) -> Option<&ChartPreset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Labels of the charts in a preset; empty for unknown names
    pub fn get_metrics_for_preset(&self, name: &str) -> Vec<&str> {
        self.find_preset(name)
            .map(|preset| preset.charts.iter().map(|c| c.label.as_str()).collect())
            .unwrap_or_default()
    }
}

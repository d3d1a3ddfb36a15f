//! User-level metric presets
//!
//! Account-wide counters that are sampled once per snapshot.

use crate::presets::ChartPreset;
use crate::ChartSpec;
use stats_charts_shared::AggregationMode;

/// Create the global preset
pub fn create_global_preset() -> ChartPreset {
    ChartPreset {
        name: "Global".to_string(),
        description: "Account-wide credits, pixels, control progress, bucket and CPU".to_string(),
        charts: vec![
            ChartSpec::new("Credits", "userData.credits"),
            ChartSpec::new("Pixels", "userData.pixels"),
            ChartSpec::new("GCL progress", "userData.gclProgress"),
            ChartSpec::new("GPL progress", "userData.gplProgress"),
            ChartSpec::new("Bucket", "userData.bucket"),
            // CPU spikes are easier to read smoothed
            ChartSpec::new("CPU", "userData.cpu").with_mode(AggregationMode::Average),
        ],
    }
}

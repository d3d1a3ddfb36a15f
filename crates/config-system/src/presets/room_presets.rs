//! Per-room metric presets
//!
//! Room names and source ids are only known once a snapshot arrives, so the
//! paths use `*` segments that expand against the tree.

use crate::presets::ChartPreset;
use crate::ChartSpec;
use stats_charts_shared::AggregationMode;

/// Create the room preset
pub fn create_room_preset() -> ChartPreset {
    ChartPreset {
        name: "Room".to_string(),
        description: "Controller progress, stored energy and outward source energy per room"
            .to_string(),
        charts: vec![
            ChartSpec::new("Controller progress", "roomData.*.controllerProgress"),
            ChartSpec::new("Storage energy", "roomData.*.storageData.energy"),
            // Harvested energy is a per-tick amount, so windows add up
            ChartSpec::new("Outward source energy", "roomData.*.outwardsSourceEnergy.*")
                .with_mode(AggregationMode::Sum),
        ],
    }
}

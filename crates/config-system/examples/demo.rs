//! Dashboard preparation demonstration
//!
//! Builds a small snapshot tree, loads the built-in presets and prints the
//! prepared series for every chart.

use stats_charts_config::{ConfigParser, ConfigFormat, PresetManager};
use stats_charts_data::ChartManager;
use stats_charts_shared::{AggregationMode, AxisKind, ChartOptions, SeriesTree};

const SNAPSHOT: &str = r#"{
    "timeStamp": {"data": [0, 3000, 6000, 9000, 12000, 15000], "type": "time", "depth": 0},
    "gameTime": {"data": [1, 2, 3, 5, 6, 7], "type": "tick", "depth": 0},
    "userData": {
        "credits": {"data": [120, 121, 125], "type": "number", "depth": 1, "exp": 1, "mutations": [[0, 3], [2, 2]]},
        "cpu": {"data": [40, 55, null, 61, 38, 45], "type": "number", "depth": 1},
        "bucket": {"data": [10000, 9990, 9985, 9990, 10000, 10000], "type": "number", "depth": 1}
    },
    "roomData": {
        "W1N1": {
            "controllerProgress": {"data": [10, 20, 30, 40, 50, 60], "type": "number", "depth": 2},
            "outwardsSourceEnergy": {
                "5bbcab": {"data": [10, 10, 10, 10, 10, 10], "type": "number", "depth": 3}
            }
        }
    }
}"#;

const DASHBOARD: &str = r#"
defaults:
  axis: time
  intervalForAggregation: 6000
  mode: average
charts:
  - label: CPU
    path: userData.cpu
  - label: Energy per 2 ticks
    path: roomData.*.outwardsSourceEnergy.*
    options:
      mode: sum
      intervalForAggregation: 2
      aggregateAxis: tick
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let tree: SeriesTree = serde_json::from_str(SNAPSHOT)?;
    tree.validate()?;
    let manager = ChartManager::new(&tree);

    println!("Stats Charts Demo ({} samples)\n", tree.sample_count()?);

    let presets = PresetManager::new();
    let defaults = ChartOptions::new(AxisKind::Tick, Some(2.0), AggregationMode::Average);
    for preset in presets.get_all_presets() {
        println!("Preset: {}", preset.name);
        for labeled in preset.to_config(defaults).requests(&tree) {
            match manager.prepare_request(&labeled.request) {
                Ok(chart) => println!("  {:<32} {:?}", labeled.label, chart.points),
                Err(err) => println!("  {:<32} unavailable: {}", labeled.label, err),
            }
        }
        println!();
    }

    let dashboard = ConfigParser::parse_string(DASHBOARD, ConfigFormat::Yaml)?;
    println!("Configured dashboard:");
    for labeled in dashboard.requests(&tree) {
        let chart = manager.prepare_request(&labeled.request)?;
        println!("  {}: {}", labeled.label, serde_json::to_string(&chart.points)?);
    }

    Ok(())
}

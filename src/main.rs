mod app;
mod ui;
mod view;

use anyhow::Context as _;
use app::TreasureMapApp;
use std::path::PathBuf;
use treasure_map::config::{MapConfig, DEFAULT_CONFIG_PATH};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = MapConfig::load(&config_path)
        .with_context(|| format!("reading {}", config_path.display()))?;
    let treasure_map = config.build()?;

    let size = treasure_map.size();
    let player_position = config.initial_player_position(size);
    let output_dir = config.output_dir.clone();

    let native_options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(
            size.width as f32 * 1.3 + 40.0,
            size.height as f32 * 1.1,
        )),
        min_window_size: Some(egui::vec2(800.0, 600.0)),
        ..Default::default()
    };

    eframe::run_native(
        "Treasure Map",
        native_options,
        Box::new(move |cc| {
            Box::new(TreasureMapApp::new(
                cc,
                treasure_map,
                player_position,
                output_dir,
            ))
        }),
    )
    .map_err(|err| anyhow::anyhow!("{err}"))
}

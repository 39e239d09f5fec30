use std::path::PathBuf;
use treasure_map::Pixel;

pub struct UiState {
    // Player
    pub player_position: Pixel,
    pub show_player_icon: bool,

    // Export
    pub output_dir: PathBuf,

    // Last message shown under the buttons
    pub status: Option<String>,

    // Frame on screen is out of date
    pub needs_render: bool,
}

impl UiState {
    pub fn new(player_position: Pixel, output_dir: PathBuf) -> Self {
        Self {
            player_position,
            show_player_icon: true,
            output_dir,
            status: None,
            needs_render: true,
        }
    }
}

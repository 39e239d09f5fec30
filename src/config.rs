//! Map description read from a TOML file.

use crate::coordinate::{MapSize, Pixel, Position};
use crate::error::{Error, Result};
use crate::icon::{icon_side, Icon, PositionDependentIcon, DEFAULT_ICON_SCALE};
use crate::map::TreasureMap;
use crate::placement::{AngleFormula, PolarFormula, RadiusFormula};
use image::imageops::FilterType;
use image::GenericImageView;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file looked up when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "treasure_map.toml";

/// Root of the map description.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MapConfig {
    /// Background image.
    pub background: PathBuf,
    /// Factor applied to the background's own size to get the map size.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Directory exported frames are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Where the player has to stand for every icon to show its true position.
    #[serde(default = "default_treasure_position")]
    pub treasure_position: [f64; 2],
    #[serde(default = "default_initial_player_position")]
    pub initial_player_position: [f64; 2],
    /// Icon side as a fraction of the map height.
    #[serde(default = "default_icon_scale")]
    pub icon_scale: f64,
    pub player_icon: PlayerIconConfig,
    /// Paint order, back to front.
    #[serde(default)]
    pub icons: Vec<IconConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerIconConfig {
    pub image: PathBuf,
    #[serde(default = "default_offset")]
    pub offset: [f64; 2],
}

/// One position dependent icon.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IconConfig {
    pub name: String,
    pub true_position: [f64; 2],
    pub image: PathBuf,
    #[serde(default = "default_offset")]
    pub offset: [f64; 2],
    #[serde(default)]
    pub show_true_position: bool,
    pub radius: RadiusFormula,
    pub angle: AngleFormula,
}

fn default_scale() -> f64 {
    1.0
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_treasure_position() -> [f64; 2] {
    [0.6558, 0.5755]
}

fn default_initial_player_position() -> [f64; 2] {
    [0.5, 0.5]
}

fn default_icon_scale() -> f64 {
    DEFAULT_ICON_SCALE
}

fn default_offset() -> [f64; 2] {
    [-0.02, -0.02]
}

fn normalized([x, y]: [f64; 2]) -> Position {
    Position::normalized(x, y)
}

impl MapConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads a configuration file. Relative paths inside it are taken
    /// relative to the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&contents)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        resolve(&mut self.background);
        resolve(&mut self.output_dir);
        resolve(&mut self.player_icon.image);
        for icon in &mut self.icons {
            resolve(&mut icon.image);
        }
    }

    pub fn treasure_position(&self) -> Position {
        normalized(self.treasure_position)
    }

    pub fn initial_player_position(&self, size: MapSize) -> Pixel {
        size.clamp(normalized(self.initial_player_position).to_absolute(size))
    }

    /// Rejects scale factors that cannot produce a usable map.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [("scale", self.scale), ("icon_scale", self.icon_scale)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{key} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Decodes every image and assembles the map.
    pub fn build(&self) -> Result<TreasureMap> {
        self.validate()?;

        let background = image::open(&self.background).map_err(|source| Error::LoadImage {
            path: self.background.clone(),
            source,
        })?;

        let size = MapSize::scaled(background.dimensions(), self.scale);
        if size.width == 0 || size.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "scale {} shrinks the {:?} background to {}x{}",
                self.scale,
                background.dimensions(),
                size.width,
                size.height
            )));
        }
        let background = background
            .resize_exact(size.width, size.height, FilterType::Triangle)
            .to_rgb8();

        let side = icon_side(size, self.icon_scale);
        let treasure = self.treasure_position();

        let icons = self
            .icons
            .iter()
            .map(|config| -> Result<PositionDependentIcon> {
                let icon = Icon::open(
                    config.name.clone(),
                    &config.image,
                    side,
                    normalized(config.offset).to_absolute(size),
                )?;
                let formula = PolarFormula {
                    radius: config.radius,
                    angle: config.angle,
                };
                let icon = PositionDependentIcon::new(
                    icon,
                    normalized(config.true_position),
                    formula,
                    treasure,
                    size,
                )?
                .with_true_position_shown(config.show_true_position);
                warn_if_off_canvas(&icon, size);
                Ok(icon)
            })
            .collect::<Result<Vec<_>>>()?;

        let player_icon = Icon::open(
            "player",
            &self.player_icon.image,
            side,
            normalized(self.player_icon.offset).to_absolute(size),
        )?;

        TreasureMap::new(size, background, icons, player_icon)
    }
}

fn warn_if_off_canvas(icon: &PositionDependentIcon, size: MapSize) {
    let anchor = icon.true_position();
    if !anchor.is_in_bbox(0, size.width as i64, 0, size.height as i64) {
        log::warn!(
            "True position of {:?} at {:?} lies outside the {}x{} map.",
            icon.name(),
            anchor,
            size.width,
            size.height
        );
    }
}

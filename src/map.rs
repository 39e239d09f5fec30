//! The treasure map: a background plus every icon, rendered per player position.

use crate::compositor::draw_icon;
use crate::coordinate::{MapSize, Pixel};
use crate::error::{Error, Result};
use crate::icon::{Icon, PositionDependentIcon};
use image::RgbImage;

/// Renders frames of the treasure map.
///
/// Icons are painted back to front in the order they were given: first
/// the true position markers that are switched on, then every position
/// dependent icon, then the player marker on top.
pub struct TreasureMap {
    size: MapSize,
    background: RgbImage,
    icons: Vec<PositionDependentIcon>,
    player_icon: Icon,
}

impl TreasureMap {
    /// A background larger than `size` is cropped to it. Every icon must
    /// have been placed for a map of exactly `size`.
    pub fn new(
        size: MapSize,
        background: RgbImage,
        icons: Vec<PositionDependentIcon>,
        player_icon: Icon,
    ) -> Result<Self> {
        if let Some(icon) = icons.iter().find(|icon| icon.map_size() != size) {
            return Err(Error::IconMapMismatch {
                name: icon.name().to_owned(),
                icon: (icon.map_size().width, icon.map_size().height),
                map: (size.width, size.height),
            });
        }

        if background.width() < size.width || background.height() < size.height {
            return Err(Error::BackgroundTooSmall {
                actual: background.dimensions(),
                expected: (size.width, size.height),
            });
        }

        let background = if background.dimensions() == (size.width, size.height) {
            background
        } else {
            image::imageops::crop_imm(&background, 0, 0, size.width, size.height).to_image()
        };

        log::info!(
            "Treasure map is {}x{} with {} icons.",
            size.width,
            size.height,
            icons.len()
        );

        Ok(Self {
            size,
            background,
            icons,
            player_icon,
        })
    }

    pub fn size(&self) -> MapSize {
        self.size
    }

    pub fn background(&self) -> &RgbImage {
        &self.background
    }

    pub fn icons(&self) -> &[PositionDependentIcon] {
        &self.icons
    }

    pub fn player_icon(&self) -> &Icon {
        &self.player_icon
    }

    /// Renders one frame for a player standing at `player`.
    pub fn render(&self, player: Pixel, show_player_icon: bool) -> Result<RgbImage> {
        let mut frame = self.background.clone();

        for icon in self.icons.iter().filter(|icon| icon.show_true_position()) {
            draw_icon(&mut frame, icon.true_position_icon(), icon.true_position_on_map());
        }

        for icon in &self.icons {
            draw_icon(&mut frame, icon.icon(), icon.position_on_map(player)?);
        }

        if show_player_icon {
            draw_icon(
                &mut frame,
                &self.player_icon,
                self.player_icon.position_on_map(player),
            );
        }

        log::debug!("Rendered frame for player at {:?}.", player);
        Ok(frame)
    }

    /// Top-left corners of all position dependent icons, in paint order.
    pub fn icon_positions(&self, player: Pixel) -> Result<Vec<Pixel>> {
        self.icons
            .iter()
            .map(|icon| icon.position_on_map(player))
            .collect()
    }

    pub fn set_show_true_position(&mut self, index: usize, show: bool) -> Result<()> {
        let icon = self.icons.get_mut(index).ok_or(Error::UnknownIcon(index))?;
        log::debug!("Show true position of {:?}: {}.", icon.name(), show);
        icon.set_show_true_position(show);
        Ok(())
    }

    /// Toggles every icon with the given name, since several icons may share one.
    pub fn set_show_true_position_by_name(&mut self, name: &str, show: bool) -> Result<()> {
        let mut found = false;
        for icon in self.icons.iter_mut().filter(|icon| icon.name() == name) {
            icon.set_show_true_position(show);
            found = true;
        }

        if found {
            log::debug!("Show true position of {:?}: {}.", name, show);
            Ok(())
        } else {
            Err(Error::UnknownIconName(name.to_owned()))
        }
    }
}

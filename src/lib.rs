//! Renders a treasure map whose icons drift around the player.
//!
//! Every [`icon::PositionDependentIcon`] orbits a hidden center. When the
//! player stands on the treasure, all icons sit on their true positions.

pub mod compositor;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod export;
pub mod icon;
pub mod map;
pub mod placement;

pub use coordinate::{MapSize, Pixel, Position};
pub use error::{Error, Result};
pub use icon::{Icon, PositionDependentIcon};
pub use map::TreasureMap;

//! Where a position dependent icon lands for a given player position.
//!
//! Every icon orbits a fixed center. The radius and angle of the orbit are
//! functions of the player position. Keeping the radius constant is a good
//! idea in practice, otherwise the map becomes too hard to solve.

use crate::coordinate::{MapSize, Pixel};
use serde::{Deserialize, Serialize};

/// Polar offset from an icon's center, angle in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    pub radius: f64,
    pub angle: f64,
}

impl Polar {
    /// Cartesian offset `(radius·cos(angle), radius·sin(angle))`.
    pub fn offset(&self) -> (f64, f64) {
        (
            self.radius * self.angle.cos(),
            self.radius * self.angle.sin(),
        )
    }
}

/// Maps a player position to a polar offset.
pub trait PlacementStrategy {
    fn evaluate(&self, player: Pixel, map: MapSize) -> Polar;
}

impl<F> PlacementStrategy for F
where
    F: Fn(Pixel, MapSize) -> Polar,
{
    fn evaluate(&self, player: Pixel, map: MapSize) -> Polar {
        self(player, map)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RadiusFormula {
    /// `fraction × map width`
    Constant { fraction: f64 },
    /// `map width × (base + amplitude × cos(frequency × player.x))`
    Oscillating {
        base: f64,
        amplitude: f64,
        frequency: f64,
    },
}

impl RadiusFormula {
    pub fn radius(&self, player: Pixel, map: MapSize) -> f64 {
        let width = map.width as f64;
        match *self {
            RadiusFormula::Constant { fraction } => fraction * width,
            RadiusFormula::Oscillating {
                base,
                amplitude,
                frequency,
            } => width * (base + amplitude * (frequency * player.x as f64).cos()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AngleFormula {
    /// `(x × player.x + y × player.y) / map width + offset`
    Linear {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
        #[serde(default)]
        offset: f64,
    },
}

impl AngleFormula {
    pub fn angle(&self, player: Pixel, map: MapSize) -> f64 {
        match *self {
            AngleFormula::Linear { x, y, offset } => {
                (x * player.x as f64 + y * player.y as f64) / map.width as f64 + offset
            }
        }
    }
}

/// Data driven strategy, as read from the map configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarFormula {
    pub radius: RadiusFormula,
    pub angle: AngleFormula,
}

impl PlacementStrategy for PolarFormula {
    fn evaluate(&self, player: Pixel, map: MapSize) -> Polar {
        Polar {
            radius: self.radius.radius(player, map),
            angle: self.angle.angle(player, map),
        }
    }
}

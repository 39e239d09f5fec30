//! Positions on the map, either resolution independent or in pixels.

use std::ops::{Add, Sub};

/// Pixel dimensions of the canvas every frame is rendered onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapSize {
    pub width: u32,
    pub height: u32,
}

impl MapSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size of `original` scaled by `scale`, truncated to whole pixels.
    pub fn scaled(original: (u32, u32), scale: f64) -> Self {
        Self {
            width: (original.0 as f64 * scale) as u32,
            height: (original.1 as f64 * scale) as u32,
        }
    }

    /// Clamps a pixel into `[0, width] × [0, height]`.
    pub fn clamp(&self, pixel: Pixel) -> Pixel {
        Pixel::new(
            pixel.x.clamp(0, self.width as i64),
            pixel.y.clamp(0, self.height as i64),
        )
    }
}

/// Absolute position on the canvas, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    pub x: i64,
    pub y: i64,
}

impl Pixel {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Inclusive bounding box test.
    pub fn is_in_bbox(&self, left: i64, right: i64, top: i64, bottom: i64) -> bool {
        self.x >= left && self.x <= right && self.y >= top && self.y <= bottom
    }
}

impl Add for Pixel {
    type Output = Pixel;

    fn add(self, other: Pixel) -> Pixel {
        Pixel::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Pixel {
    type Output = Pixel;

    fn sub(self, other: Pixel) -> Pixel {
        Pixel::new(self.x - other.x, self.y - other.y)
    }
}

/// A position tagged with its unit. The tag is fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Fractions of the map width and height, authored once for any resolution.
    Normalized(f64, f64),
    Absolute(Pixel),
}

impl Position {
    pub fn normalized(x: f64, y: f64) -> Self {
        Position::Normalized(x, y)
    }

    pub fn absolute(x: i64, y: i64) -> Self {
        Position::Absolute(Pixel::new(x, y))
    }

    /// Resolves the position against a canvas. Normalized components are
    /// scaled and rounded half away from zero; absolute ones pass through.
    pub fn to_absolute(self, size: MapSize) -> Pixel {
        match self {
            Position::Normalized(x, y) => Pixel::new(
                (x * size.width as f64).round() as i64,
                (y * size.height as f64).round() as i64,
            ),
            Position::Absolute(pixel) => pixel,
        }
    }

    /// Component-wise sum, always in pixel space.
    pub fn add(self, other: Position, size: MapSize) -> Pixel {
        self.to_absolute(size) + other.to_absolute(size)
    }

    /// Component-wise difference, always in pixel space.
    pub fn subtract(self, other: Position, size: MapSize) -> Pixel {
        self.to_absolute(size) - other.to_absolute(size)
    }
}

impl From<Pixel> for Position {
    fn from(pixel: Pixel) -> Self {
        Position::Absolute(pixel)
    }
}

//! Icons drawn on the treasure map.

use crate::coordinate::{MapSize, Pixel, Position};
use crate::error::{Error, Result};
use crate::placement::{PlacementStrategy, Polar};
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, RgbImage, RgbaImage};
use std::path::{Path, PathBuf};

/// Per-pixel opacity of an icon, in `[0, 1]`.
pub type AlphaMask = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Icon side as a fraction of the map height.
pub const DEFAULT_ICON_SCALE: f64 = 0.04;

/// Luminance at or below which a pixel of an alpha-less icon is opaque.
const LUMINANCE_THRESHOLD: u8 = 128;

/// Number of 3×3 dilations applied to a luminance mask.
const DILATE_ITERATIONS: usize = 2;

/// Side length in pixels of a square icon on a map of the given size.
pub fn icon_side(map: MapSize, icon_scale: f64) -> u32 {
    ((icon_scale * map.height as f64).round() as u32).max(1)
}

/// Opaque exactly where the alpha channel is saturated.
pub fn mask_from_alpha(rgba: &RgbaImage) -> AlphaMask {
    ImageBuffer::from_fn(rgba.width(), rgba.height(), |x, y| {
        Luma([(rgba.get_pixel(x, y)[3] / u8::MAX) as f32])
    })
}

/// Stencil for icons without an alpha channel: dark strokes are opaque,
/// thickened so anti-aliased edges do not leave seams.
pub fn mask_from_luminance(luma: &GrayImage) -> AlphaMask {
    let mut mask: AlphaMask = ImageBuffer::from_fn(luma.width(), luma.height(), |x, y| {
        if luma.get_pixel(x, y)[0] <= LUMINANCE_THRESHOLD {
            Luma([1.0])
        } else {
            Luma([0.0])
        }
    });
    for _ in 0..DILATE_ITERATIONS {
        mask = dilate(&mask);
    }
    mask
}

fn dilate(mask: &AlphaMask) -> AlphaMask {
    let (width, height) = mask.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| {
        let mut value: f32 = 0.0;
        for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                value = value.max(mask.get_pixel(nx, ny)[0]);
            }
        }
        Luma([value])
    })
}

/// A glyph with its opacity mask and the offset that centers it on an anchor.
#[derive(Clone)]
pub struct Icon {
    name: String,
    image_path: Option<PathBuf>,
    image: RgbImage,
    alpha: AlphaMask,
    offset: Pixel,
}

impl Icon {
    pub fn new(name: impl Into<String>, image: RgbImage, alpha: AlphaMask, offset: Pixel) -> Result<Self> {
        let name = name.into();
        if image.dimensions() != alpha.dimensions() {
            return Err(Error::MaskMismatch {
                name,
                image: image.dimensions(),
                mask: alpha.dimensions(),
            });
        }

        Ok(Self {
            name,
            image_path: None,
            image,
            alpha,
            offset,
        })
    }

    /// Builds a `side × side` icon from an already decoded image.
    pub fn decode(name: impl Into<String>, decoded: &DynamicImage, side: u32, offset: Pixel) -> Result<Self> {
        let resized = decoded.resize_exact(side, side, FilterType::Triangle);
        let alpha = if resized.color().has_alpha() {
            mask_from_alpha(&resized.to_rgba8())
        } else {
            mask_from_luminance(&resized.to_luma8())
        };
        Self::new(name, resized.to_rgb8(), alpha, offset)
    }

    pub fn open(name: impl Into<String>, path: &Path, side: u32, offset: Pixel) -> Result<Self> {
        let decoded = image::open(path).map_err(|source| Error::LoadImage {
            path: path.to_path_buf(),
            source,
        })?;
        let mut icon = Self::decode(name, &decoded, side, offset)?;
        icon.image_path = Some(path.to_path_buf());
        Ok(icon)
    }

    /// Same icon with inverted colors, used to mark true positions.
    pub fn negative(&self, name: impl Into<String>) -> Self {
        let mut image = self.image.clone();
        image::imageops::invert(&mut image);
        Self {
            name: name.into(),
            image_path: self.image_path.clone(),
            image,
            alpha: self.alpha.clone(),
            offset: self.offset,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image_path(&self) -> Option<&Path> {
        self.image_path.as_deref()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn alpha(&self) -> &AlphaMask {
        &self.alpha
    }

    /// `(height, width)`, in the row/column order of the pixel buffer.
    pub fn size(&self) -> (u32, u32) {
        (self.image.height(), self.image.width())
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn offset(&self) -> Pixel {
        self.offset
    }

    /// Top-left corner that draws the icon centered on `anchor`.
    pub fn position_on_map(&self, anchor: Pixel) -> Pixel {
        anchor + self.offset
    }
}

/// An icon orbiting a fixed center, driven by the player position.
///
/// The center is solved once so that the icon sits exactly on its true
/// position when the player stands on the treasure.
pub struct PositionDependentIcon {
    icon: Icon,
    true_position_icon: Icon,
    true_position: Pixel,
    center: (f64, f64),
    strategy: Box<dyn PlacementStrategy>,
    map: MapSize,
    show_true_position: bool,
}

impl PositionDependentIcon {
    pub fn new(
        icon: Icon,
        true_position: Position,
        strategy: impl PlacementStrategy + 'static,
        treasure_position: Position,
        map: MapSize,
    ) -> Result<Self> {
        let true_position = true_position.to_absolute(map);
        let treasure = treasure_position.to_absolute(map);

        let polar = checked_polar(icon.name(), &strategy, treasure, map)?;
        let (dx, dy) = polar.offset();
        let center = (true_position.x as f64 - dx, true_position.y as f64 - dy);

        let true_position_icon = icon.negative(format!("{} (true position)", icon.name()));

        Ok(Self {
            icon,
            true_position_icon,
            true_position,
            center,
            strategy: Box::new(strategy),
            map,
            show_true_position: false,
        })
    }

    pub fn with_true_position_shown(mut self, show: bool) -> Self {
        self.show_true_position = show;
        self
    }

    /// Anchor of the icon for `player`, before the centering offset.
    pub fn location(&self, player: Pixel) -> Result<Pixel> {
        let polar = checked_polar(self.icon.name(), self.strategy.as_ref(), player, self.map)?;
        let (dx, dy) = polar.offset();
        Ok(Pixel::new(
            (dx + self.center.0).round() as i64,
            (dy + self.center.1).round() as i64,
        ))
    }

    /// Top-left corner of the icon for `player`.
    pub fn position_on_map(&self, player: Pixel) -> Result<Pixel> {
        Ok(self.icon.position_on_map(self.location(player)?))
    }

    pub fn true_position(&self) -> Pixel {
        self.true_position
    }

    /// Top-left corner of the true position marker.
    pub fn true_position_on_map(&self) -> Pixel {
        self.true_position_icon.position_on_map(self.true_position)
    }

    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    /// Map size the placement formulas are evaluated against.
    pub fn map_size(&self) -> MapSize {
        self.map
    }

    pub fn show_true_position(&self) -> bool {
        self.show_true_position
    }

    /// Only call between renders; the next render picks up the change.
    pub fn set_show_true_position(&mut self, show: bool) {
        self.show_true_position = show;
    }

    pub fn name(&self) -> &str {
        self.icon.name()
    }

    pub fn icon(&self) -> &Icon {
        &self.icon
    }

    pub fn true_position_icon(&self) -> &Icon {
        &self.true_position_icon
    }
}

fn checked_polar<S>(name: &str, strategy: &S, player: Pixel, map: MapSize) -> Result<Polar>
where
    S: PlacementStrategy + ?Sized,
{
    let polar = strategy.evaluate(player, map);
    for (quantity, value) in [("radius", polar.radius), ("angle", polar.angle)] {
        if !value.is_finite() {
            return Err(Error::NonFinitePlacement {
                name: name.to_owned(),
                quantity,
                value,
            });
        }
    }
    Ok(polar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{AngleFormula, PolarFormula, RadiusFormula};
    use image::{Rgb, Rgba};

    const MAP: MapSize = MapSize {
        width: 800,
        height: 1000,
    };

    fn solid_icon(side: u32, color: [u8; 3]) -> Icon {
        Icon::new(
            "solid",
            RgbImage::from_pixel(side, side, Rgb(color)),
            AlphaMask::from_pixel(side, side, Luma([1.0])),
            Pixel::new(-2, -2),
        )
        .unwrap()
    }

    #[test]
    fn alpha_mask_is_binary() {
        let mut rgba = RgbaImage::from_pixel(3, 1, Rgba([10, 20, 30, 255]));
        rgba.put_pixel(1, 0, Rgba([10, 20, 30, 254]));
        rgba.put_pixel(2, 0, Rgba([10, 20, 30, 0]));

        let mask = mask_from_alpha(&rgba);
        assert_eq!(1.0, mask.get_pixel(0, 0)[0]);
        assert_eq!(0.0, mask.get_pixel(1, 0)[0]);
        assert_eq!(0.0, mask.get_pixel(2, 0)[0]);
    }

    #[test]
    fn luminance_mask_is_dilated_twice() {
        let mut luma = GrayImage::from_pixel(9, 9, Luma([255]));
        luma.put_pixel(4, 4, Luma([LUMINANCE_THRESHOLD]));

        let mask = mask_from_luminance(&luma);
        for (x, y, value) in mask.enumerate_pixels() {
            let inside = (2..=6).contains(&x) && (2..=6).contains(&y);
            assert_eq!(if inside { 1.0 } else { 0.0 }, value[0], "at ({x}, {y})");
        }
    }

    #[test]
    fn mismatched_mask_is_rejected() {
        let result = Icon::new(
            "broken",
            RgbImage::new(4, 4),
            AlphaMask::new(4, 3),
            Pixel::default(),
        );
        assert!(matches!(result, Err(Error::MaskMismatch { .. })));
    }

    #[test]
    fn decoding_resizes_to_square() {
        let decoded = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 32, Rgba([1, 2, 3, 255])));
        let icon = Icon::decode("brass", &decoded, 40, Pixel::default()).unwrap();

        assert_eq!((40, 40), icon.size());
        assert_eq!((40, 40), icon.alpha().dimensions());
        assert!(icon.alpha().pixels().all(|alpha| alpha[0] == 1.0));
    }

    #[test]
    fn decoding_without_alpha_uses_luminance() {
        let decoded = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([250, 250, 250])));
        let icon = Icon::decode("pale", &decoded, 8, Pixel::default()).unwrap();
        assert!(icon.alpha().pixels().all(|alpha| alpha[0] == 0.0));
    }

    #[test]
    fn negative_inverts_colors_only() {
        let icon = solid_icon(2, [0, 100, 255]);
        let negative = icon.negative("solid (true position)");

        assert_eq!(&Rgb([255, 155, 0]), negative.image().get_pixel(1, 1));
        assert_eq!(icon.alpha(), negative.alpha());
        assert_eq!(icon.offset(), negative.offset());
    }

    #[test]
    fn icon_side_follows_map_height() {
        assert_eq!(40, icon_side(MAP, DEFAULT_ICON_SCALE));
        assert_eq!(1, icon_side(MapSize::new(5, 5), DEFAULT_ICON_SCALE));
    }

    #[test]
    fn plain_icon_is_offset_from_anchor() {
        let icon = solid_icon(4, [0, 0, 0]);
        assert_eq!(Pixel::new(8, 18), icon.position_on_map(Pixel::new(10, 20)));
    }

    #[test]
    fn icon_lands_on_true_position_at_treasure() {
        let treasure = Position::normalized(0.6558, 0.5755);
        let formula = PolarFormula {
            radius: RadiusFormula::Constant { fraction: 0.17 },
            angle: AngleFormula::Linear {
                x: 0.0,
                y: -5.0,
                offset: 3.5,
            },
        };
        let icon = PositionDependentIcon::new(
            solid_icon(4, [0, 0, 0]),
            Position::normalized(0.5555, 0.54925),
            formula,
            treasure,
            MAP,
        )
        .unwrap();

        let expected = Position::normalized(0.5555, 0.54925).to_absolute(MAP);
        assert_eq!(expected, icon.true_position());
        assert_eq!(expected, icon.location(treasure.to_absolute(MAP)).unwrap());
        assert_eq!(
            expected + Pixel::new(-2, -2),
            icon.position_on_map(treasure.to_absolute(MAP)).unwrap()
        );
    }

    #[test]
    fn icon_moves_with_player() {
        let icon = PositionDependentIcon::new(
            solid_icon(4, [0, 0, 0]),
            Position::absolute(100, 100),
            |player: Pixel, _: MapSize| Polar {
                radius: 10.0,
                angle: if player.x == 0 { 0.0 } else { std::f64::consts::PI },
            },
            Position::absolute(0, 0),
            MAP,
        )
        .unwrap();

        assert_eq!((90.0, 100.0), icon.center());
        assert_eq!(Pixel::new(80, 100), icon.location(Pixel::new(5, 0)).unwrap());
    }

    #[test]
    fn non_finite_placement_is_an_error() {
        let icon = PositionDependentIcon::new(
            solid_icon(4, [0, 0, 0]),
            Position::absolute(100, 100),
            |player: Pixel, _: MapSize| Polar {
                radius: 1.0 / player.x as f64,
                angle: 0.0,
            },
            Position::absolute(1, 0),
            MAP,
        )
        .unwrap();

        let err = icon.location(Pixel::new(0, 0)).unwrap_err();
        assert!(matches!(
            err,
            Error::NonFinitePlacement {
                quantity: "radius",
                ..
            }
        ));
    }

    #[test]
    fn true_position_flag() {
        let icon = PositionDependentIcon::new(
            solid_icon(4, [0, 0, 0]),
            Position::absolute(100, 100),
            |_: Pixel, _: MapSize| Polar {
                radius: 0.0,
                angle: 0.0,
            },
            Position::absolute(0, 0),
            MAP,
        )
        .unwrap();
        assert!(!icon.show_true_position());

        let mut icon = icon.with_true_position_shown(true);
        assert!(icon.show_true_position());
        icon.set_show_true_position(false);
        assert!(!icon.show_true_position());
        assert_eq!(Pixel::new(98, 98), icon.true_position_on_map());
    }
}

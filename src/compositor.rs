//! Back-to-front alpha compositing of icons onto a frame.

use crate::coordinate::Pixel;
use crate::icon::Icon;
use image::RgbImage;

/// Blends `icon` onto `canvas` with its top-left corner at `top_left`.
///
/// Whatever falls outside the canvas is clipped; an icon that misses the
/// canvas entirely leaves it untouched. Each channel becomes
/// `(1 - alpha) * canvas + alpha * icon`.
pub fn draw_icon(canvas: &mut RgbImage, icon: &Icon, top_left: Pixel) {
    let canvas_width = canvas.width() as i64;
    let canvas_height = canvas.height() as i64;
    let icon_width = icon.width() as i64;
    let icon_height = icon.height() as i64;

    if !top_left.is_in_bbox(-icon_width, canvas_width - 1, -icon_height, canvas_height - 1) {
        return;
    }

    let left = top_left.x.max(0);
    let right = (top_left.x + icon_width).min(canvas_width);
    let top = top_left.y.max(0);
    let bottom = (top_left.y + icon_height).min(canvas_height);

    // Where the visible part starts inside the icon.
    let icon_left = left - top_left.x;
    let icon_top = top - top_left.y;

    for y in top..bottom {
        let icon_y = (icon_top + y - top) as u32;
        for x in left..right {
            let icon_x = (icon_left + x - left) as u32;

            let alpha = icon.alpha().get_pixel(icon_x, icon_y)[0];
            if alpha <= 0.0 {
                continue;
            }
            let foreground = icon.image().get_pixel(icon_x, icon_y);
            let background = canvas.get_pixel_mut(x as u32, y as u32);
            for (dst, src) in background.0.iter_mut().zip(foreground.0) {
                *dst = blend_channel(*dst, src, alpha);
            }
        }
    }
}

#[inline]
fn blend_channel(dst: u8, src: u8, alpha: f32) -> u8 {
    let alpha = alpha.clamp(0.0, 1.0);
    ((1.0 - alpha) * dst as f32 + alpha * src as f32)
        .round()
        .clamp(0.0, 255.0) as u8
}

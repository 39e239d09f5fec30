use egui::{Pos2, Rect, Vec2};
use treasure_map::{MapSize, Pixel};

/// How the rendered map is laid out on screen.
pub struct MapView {
    size: MapSize,
    zoom: f32,
}

impl MapView {
    pub fn new(size: MapSize) -> Self {
        Self { size, zoom: 1.0 }
    }

    /// Shrinks the map to fit `available`, never enlarging past 100%.
    pub fn fit(&mut self, available: Vec2) {
        let zoom_x = available.x / self.size.width as f32;
        let zoom_y = available.y / self.size.height as f32;
        self.zoom = zoom_x.min(zoom_y).clamp(0.1, 1.0);
    }

    pub fn get_zoom(&self) -> f32 {
        self.zoom
    }

    pub fn display_size(&self) -> Vec2 {
        Vec2::new(self.size.width as f32, self.size.height as f32) * self.zoom
    }

    /// Map pixel under `screen_pos`, clamped to the canvas.
    pub fn screen_to_map(&self, screen_pos: Pos2, image_rect: Rect) -> Pixel {
        let map_pos = (screen_pos - image_rect.min) / self.zoom;
        self.size
            .clamp(Pixel::new(map_pos.x.round() as i64, map_pos.y.round() as i64))
    }
}

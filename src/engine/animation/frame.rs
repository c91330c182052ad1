// Frame rectangles within a sprite sheet

use glam::Vec2;

/// A rectangle of a sprite sheet showing one animation pose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Position in the sheet (pixels)
    pub x: u32,
    pub y: u32,

    /// Size of the frame (pixels)
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Calculate normalized UV coordinates against a sheet of the given size
    ///
    /// Returns `(uv_min, uv_max)`, both clamped to `[0, 1]`.
    pub fn uvs(&self, sheet_width: u32, sheet_height: u32) -> (Vec2, Vec2) {
        if sheet_width == 0 || sheet_height == 0 {
            return (Vec2::ZERO, Vec2::ZERO);
        }

        let size = Vec2::new(sheet_width as f32, sheet_height as f32);
        let uv_min = Vec2::new(self.x as f32, self.y as f32) / size;
        let uv_max = Vec2::new(
            self.x.saturating_add(self.width) as f32,
            self.y.saturating_add(self.height) as f32,
        ) / size;

        (
            uv_min.clamp(Vec2::ZERO, Vec2::ONE),
            uv_max.clamp(Vec2::ZERO, Vec2::ONE),
        )
    }
}

impl From<(u32, u32, u32, u32)> for Frame {
    fn from((x, y, width, height): (u32, u32, u32, u32)) -> Self {
        Self::new(x, y, width, height)
    }
}

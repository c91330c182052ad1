// Decoded sprite sheet images

use super::AssetError;
use image::RgbaImage;
use std::path::Path;

/// A sprite sheet decoded into RGBA pixels
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    label: String,
    image: RgbaImage,
}

impl SpriteSheet {
    /// Load and decode a sprite sheet from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let label = path.to_string_lossy().to_string();

        if !path.is_file() {
            return Err(AssetError::NotFound(label));
        }

        let bytes = std::fs::read(path)?;
        let image = image::load_from_memory(&bytes)
            .map_err(|source| AssetError::Decode {
                path: label.clone(),
                source,
            })?
            .to_rgba8();

        log::debug!(
            "Loaded sprite sheet {} ({}x{})",
            label,
            image.width(),
            image.height()
        );

        Ok(Self::from_image(label, image))
    }

    /// Wrap an already decoded image
    pub fn from_image(label: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            label: label.into(),
            image,
        }
    }

    /// Copy a rectangle out of the sheet, clipped to the sheet bounds
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> RgbaImage {
        image::imageops::crop_imm(&self.image, x, y, width, height).to_image()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

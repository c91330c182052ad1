// Asset path resolution and loading

use super::{AssetError, SpriteSheet};
use std::path::{Path, PathBuf};

/// Supported asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    SpriteSheet,
}

impl AssetType {
    /// Get the directory for this asset type, relative to the base path
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetType::SpriteSheet => "sprites",
        }
    }
}

/// Asset loader responsible for finding and loading asset files
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.base_path
            .join(asset_type.default_directory())
            .join(name)
    }

    /// Load and decode a sprite sheet by file name
    pub fn load_spritesheet(&self, name: &str) -> Result<SpriteSheet, AssetError> {
        SpriteSheet::load(self.resolve_path(AssetType::SpriteSheet, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn test_asset_type_directories() {
        assert_eq!(AssetType::SpriteSheet.default_directory(), "sprites");
    }

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game/assets");
        let path = loader.resolve_path(AssetType::SpriteSheet, "Mario2.png");

        assert_eq!(path, PathBuf::from("/game/assets/sprites/Mario2.png"));
    }

    #[test]
    fn test_load_through_sprite_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sprites = dir.path().join("sprites");
        std::fs::create_dir_all(&sprites).unwrap();
        RgbaImage::new(4, 4).save(sprites.join("a.png")).unwrap();

        let loader = AssetLoader::new(dir.path());
        let sheet = loader.load_spritesheet("a.png").unwrap();
        assert_eq!((sheet.width(), sheet.height()), (4, 4));
        assert!(matches!(
            loader.load_spritesheet("missing.png"),
            Err(AssetError::NotFound(_))
        ));
    }
}

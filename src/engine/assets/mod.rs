// Asset loading
//
// Resolves sprite sheet names against an asset directory and decodes them.

mod loader;
mod spritesheet;

pub use loader::{AssetLoader, AssetType};
pub use spritesheet::SpriteSheet;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

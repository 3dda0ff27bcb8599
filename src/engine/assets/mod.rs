// Asset management system
//
// Provides centralized loading and caching of game textures.

mod handle;
mod loader;
mod manager;

pub use handle::{AssetHandle, AssetId, TextureHandle};
pub use loader::{AssetLoader, BACKGROUND_PATH};
pub use manager::AssetManager;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Asset file layout and loading

use super::AssetError;
use std::path::{Path, PathBuf};

/// Path of the background image under the asset root
pub const BACKGROUND_PATH: &str = "BG/Background.png";

/// Extension of animation frame files
pub const FRAME_EXTENSION: &str = "png";

/// Finds and reads asset files under a root directory.
///
/// Layout:
/// - `{character}/{action}/{index}.png` for animation frames
/// - `BG/Background.png` for the arena background
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

    /// Relative path of one animation frame
    pub fn frame_path(character_dir: &str, action_dir: &str, index: usize) -> String {
        format!("{character_dir}/{action_dir}/{index}.{FRAME_EXTENSION}")
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    /// Load asset bytes from disk
    pub fn load_bytes(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve_path(name);

        if !path.is_file() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        Ok(std::fs::read(&path)?)
    }

    /// Check if an asset exists
    pub fn exists(&self, name: &str) -> bool {
        self.resolve_path(name).is_file()
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

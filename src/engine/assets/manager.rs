// Central asset management system

use super::{AssetError, AssetHandle, AssetId, AssetLoader, TextureHandle};
use crate::engine::renderer::Texture;
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

/// Central asset manager for the game
///
/// Loads textures once and hands out handles; the renderer resolves handles
/// back to GPU textures at draw time.
pub struct AssetManager {
    /// Asset loader
    loader: AssetLoader,

    /// Loaded textures
    textures: HashMap<AssetId, Texture>,

    /// Path to ID mapping for textures
    texture_paths: HashMap<String, AssetId>,
}

impl AssetManager {
    /// Create a new asset manager
    pub fn new<P: AsRef<Path>>(asset_path: P) -> Self {
        Self {
            loader: AssetLoader::new(asset_path),
            textures: HashMap::new(),
            texture_paths: HashMap::new(),
        }
    }

    /// Load a texture from disk, or return the handle of an already loaded one
    pub fn load_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        name: &str,
    ) -> Result<TextureHandle> {
        // Check if already loaded
        if let Some(&id) = self.texture_paths.get(name) {
            return Ok(AssetHandle::new(id));
        }

        let bytes = self.loader.load_bytes(name)?;
        let texture = Texture::from_bytes(device, queue, &bytes, name)
            .map_err(|e| AssetError::LoadError(format!("{}: {}", name, e)))?;

        let id = AssetId::from_path(name);
        self.textures.insert(id, texture);
        self.texture_paths.insert(name.to_string(), id);

        Ok(AssetHandle::new(id))
    }

    /// Get a texture by handle
    pub fn get_texture(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(&handle.id())
    }

    /// Pixel size of a loaded texture
    pub fn texture_size(&self, handle: TextureHandle) -> Option<(u32, u32)> {
        self.get_texture(handle).map(|t| (t.width, t.height))
    }

    /// Get statistics about loaded assets
    pub fn stats(&self) -> AssetStats {
        AssetStats {
            texture_count: self.textures.len(),
        }
    }

    /// Get the asset loader
    pub fn loader(&self) -> &AssetLoader {
        &self.loader
    }
}

/// Statistics about loaded assets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetStats {
    pub texture_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Loading needs a GPU device; these tests cover the bookkeeping around it.

    #[test]
    fn test_new_manager_is_empty() {
        let manager = AssetManager::new("assets");
        assert_eq!(manager.stats(), AssetStats { texture_count: 0 });
        assert_eq!(manager.loader().base_path(), Path::new("assets"));
    }

    #[test]
    fn test_unknown_handle_resolves_to_nothing() {
        let manager = AssetManager::new("assets");
        let handle: TextureHandle = AssetHandle::new(AssetId::from_path("Player/Idle/0.png"));
        assert!(manager.get_texture(handle).is_none());
        assert!(manager.texture_size(handle).is_none());
    }
}

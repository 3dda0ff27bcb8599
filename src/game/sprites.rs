// Character sprite sheets: frame textures per action and where to draw them

use glam::Vec2;
use log::info;

use crate::core::Rect;
use crate::engine::assets::{AssetLoader, AssetManager, TextureHandle};
use crate::engine::renderer::Sprite;

use super::characters::{
    ActionSet, AnimationError, AnimationTable, CharacterStats, FrameCounts, SpriteFrame,
};

/// Loaded frame textures for one character
pub struct CharacterSprites<A: ActionSet> {
    stats: CharacterStats,
    table: AnimationTable<A, TextureHandle>,
    body: (i32, i32),
}

impl<A: ActionSet> CharacterSprites<A> {
    /// Load `{asset_dir}/{action}/{index}.png` for every action.
    ///
    /// Missing frames are skipped; an action with none left fails the load.
    pub fn load(
        stats: CharacterStats,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        assets: &mut AssetManager,
    ) -> Result<Self, AnimationError> {
        let table = AnimationTable::load(stats.name, |action: A, index| {
            let path = AssetLoader::frame_path(stats.asset_dir, action.asset_dir(), index);
            assets.load_texture(device, queue, &path)
        })?;

        let first_idle = table.frame(A::ALL[0], 0);
        let body = body_size(&stats, assets.texture_size(*first_idle));
        info!(
            "Loaded {} sprites, body {}x{}",
            stats.name, body.0, body.1
        );

        Ok(Self { stats, table, body })
    }

    /// Body size measured from the first idle frame
    pub fn body(&self) -> (i32, i32) {
        self.body
    }

    /// Frames actually available per action
    pub fn frame_counts(&self) -> FrameCounts<A> {
        self.table.frame_counts()
    }

    pub fn texture(&self, frame: &SpriteFrame<A>) -> TextureHandle {
        *self.table.frame(frame.action, frame.frame_index)
    }

    /// Sprite for the current frame, scaled and aligned to the body
    pub fn sprite(&self, frame: &SpriteFrame<A>, assets: &AssetManager) -> Sprite {
        let texture = self.texture(frame);
        let (center, size) =
            frame_placement(frame.bounds, assets.texture_size(texture), self.stats.scale);
        Sprite::with_texture(center, size, texture).flipped(frame.flip_horizontal)
    }
}

/// Scaled size of the first idle frame, or the fallback body size
fn body_size(stats: &CharacterStats, texture_size: Option<(u32, u32)>) -> (i32, i32) {
    texture_size
        .map(|(w, h)| ((w * stats.scale) as i32, (h * stats.scale) as i32))
        .unwrap_or(stats.default_body)
}

/// Center and size of a frame drawn over `bounds`.
///
/// Frames are scaled, centered horizontally on the body and stand on its
/// bottom edge, so frames larger than the idle one grow upward and sideways.
fn frame_placement(bounds: Rect, texture_size: Option<(u32, u32)>, scale: u32) -> (Vec2, Vec2) {
    let size = match texture_size {
        Some((w, h)) => Vec2::new((w * scale) as f32, (h * scale) as f32),
        None => bounds.size(),
    };
    let center = Vec2::new(
        bounds.center().x,
        bounds.bottom() as f32 - size.y / 2.0,
    );
    (center, size)
}

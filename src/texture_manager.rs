use std::collections::{HashMap, HashSet};

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

use crate::element::ShapeId;
use crate::error::ImageError;

/// Uploads image shapes to the GPU once and keeps the most recently drawn ones.
pub struct TextureManager {
    texture_cache: HashMap<ShapeId, TextureHandle>,
    /// Tracks when each texture was last used
    last_used: HashMap<ShapeId, u64>,
    /// Shapes whose pixels could not be decoded; not retried every frame
    failed: HashSet<ShapeId>,
    /// Current frame counter for LRU tracking
    current_frame: u64,
    max_cache_size: usize,
}

impl TextureManager {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            texture_cache: HashMap::new(),
            last_used: HashMap::new(),
            failed: HashSet::new(),
            current_frame: 0,
            max_cache_size: max_cache_size.max(1),
        }
    }

    /// Increments the frame counter, should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Texture for an image shape, creating it with `generator` on a miss.
    ///
    /// Returns `None` when the pixels could not be decoded; the caller draws a placeholder.
    pub fn get_or_create_texture<F>(&mut self, id: ShapeId, generator: F, ctx: &Context) -> Option<TextureId>
    where
        F: FnOnce() -> Result<ColorImage, ImageError>,
    {
        if let Some(handle) = self.texture_cache.get(&id) {
            self.last_used.insert(id, self.current_frame);
            return Some(handle.id());
        }
        if self.failed.contains(&id) {
            return None;
        }

        let image = match generator() {
            Ok(image) => image,
            Err(err) => {
                log::warn!("Cannot show image {}: {}", id, err);
                self.failed.insert(id);
                return None;
            }
        };

        self.prune_cache_if_needed();
        let handle = ctx.load_texture(format!("image_{id}"), image, TextureOptions::LINEAR);
        let texture_id = handle.id();
        self.texture_cache.insert(id, handle);
        self.last_used.insert(id, self.current_frame);
        Some(texture_id)
    }

    /// Drop textures of shapes that are no longer in the document.
    pub fn retain(&mut self, live: impl Fn(ShapeId) -> bool) {
        self.texture_cache.retain(|id, _| live(*id));
        self.last_used.retain(|id, _| live(*id));
        self.failed.retain(|id| live(*id));
    }

    /// Evict least recently used textures so one more fits.
    fn prune_cache_if_needed(&mut self) {
        if self.texture_cache.len() < self.max_cache_size {
            return;
        }

        let mut entries: Vec<(ShapeId, u64)> = self.last_used.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = self.texture_cache.len() + 1 - self.max_cache_size;
        for (id, _) in entries.into_iter().take(to_remove) {
            self.texture_cache.remove(&id);
            self.last_used.remove(&id);
        }
    }

    /// Returns the number of textures currently in the cache
    pub fn cache_size(&self) -> usize {
        self.texture_cache.len()
    }

    #[cfg(test)]
    fn contains(&self, id: ShapeId) -> bool {
        self.texture_cache.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_texture_generator() -> Result<ColorImage, ImageError> {
        Ok(ColorImage::new([10, 10], egui::Color32::WHITE))
    }

    #[test]
    fn test_cache_hit() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);
        let id = ShapeId::new();

        let first = manager.get_or_create_texture(id, mock_texture_generator, &ctx);
        let second = manager.get_or_create_texture(id, || panic!("should be cached"), &ctx);

        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(manager.cache_size(), 1);
    }

    #[test]
    fn test_lru_eviction() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(2);
        let ids = [ShapeId::new(), ShapeId::new(), ShapeId::new()];

        for id in ids {
            manager.get_or_create_texture(id, mock_texture_generator, &ctx);
            manager.begin_frame();
        }

        assert_eq!(manager.cache_size(), 2);
        assert!(!manager.contains(ids[0]));
        assert!(manager.contains(ids[1]));
        assert!(manager.contains(ids[2]));
    }

    #[test]
    fn failed_decode_is_not_retried() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(2);
        let id = ShapeId::new();

        let broken = manager.get_or_create_texture(
            id,
            || Err(ImageError::MalformedDataUrl("empty".to_owned())),
            &ctx,
        );
        assert!(broken.is_none());
        assert!(manager.get_or_create_texture(id, || panic!("retried"), &ctx).is_none());

        manager.retain(|_| false);
        assert!(manager.get_or_create_texture(id, mock_texture_generator, &ctx).is_some());
    }
}

use egui::Pos2;
use serde::{Deserialize, Serialize};

/// Tunables for the editor. Missing fields fall back to their defaults when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Key of the single slot the document is persisted under
    pub storage_key: String,
    /// Content of a freshly inserted text
    pub text_placeholder: String,
    pub text_font_size: f32,
    /// Where inserted images land, in document coordinates
    pub image_position: Pos2,
    pub image_scale: f32,
    pub min_stroke_width: u32,
    pub max_stroke_width: u32,
    /// Extra distance in pixels that still counts as a hit
    pub hit_tolerance: f32,
    /// Pen points closer than this to the previous one are dropped
    pub freehand_min_distance: f32,
    /// Maximum number of image textures kept on the GPU
    pub texture_cache_size: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_key: "infiniteCanvas".to_owned(),
            text_placeholder: "Double click to edit".to_owned(),
            text_font_size: 20.0,
            image_position: Pos2::new(100.0, 100.0),
            image_scale: 0.5,
            min_stroke_width: 1,
            max_stroke_width: 20,
            hit_tolerance: 4.0,
            freehand_min_distance: 1.0,
            texture_cache_size: 64,
        }
    }
}

impl EditorConfig {
    pub fn clamp_stroke_width(&self, width: u32) -> u32 {
        width.clamp(self.min_stroke_width, self.max_stroke_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{"storage_key":"other"}"#).unwrap();
        assert_eq!(config.storage_key, "other");
        assert_eq!(config.image_scale, 0.5);
        assert_eq!(config.clamp_stroke_width(0), 1);
        assert_eq!(config.clamp_stroke_width(99), 20);
    }
}

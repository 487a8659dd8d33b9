use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use egui::{Color32, ColorImage, Painter, Pos2, Rect, Stroke, Vec2};
use serde::{Deserialize, Serialize};

use super::{Geometry, Style};
use crate::error::ImageError;

/// Bitmap placed on the canvas. The pixels travel inside the document as a `data:` URL,
/// so a persisted document never refers to files outside of it.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub origin: Pos2,
    /// Pixel dimensions of the decoded bitmap.
    pub natural_size: Vec2,
    pub scale: f32,
    pub src: String,
}

// The data URL can be megabytes long; keep it out of debug output.
impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("origin", &self.origin)
            .field("natural_size", &self.natural_size)
            .field("scale", &self.scale)
            .field("src_len", &self.src.len())
            .finish()
    }
}

impl Image {
    pub fn new(origin: Pos2, natural_size: Vec2, scale: f32, src: String) -> Self {
        Self {
            origin,
            natural_size,
            scale,
            src,
        }
    }

    /// Size on the canvas after scaling.
    pub fn display_size(&self) -> Vec2 {
        self.natural_size * self.scale
    }

    /// Decode the embedded bitmap into RGBA pixels for upload as a texture.
    pub fn decode(&self) -> Result<ColorImage, ImageError> {
        let bytes = decode_data_url(&self.src)?;
        let rgba = image::load_from_memory(&bytes)?.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice()))
    }
}

impl Geometry for Image {
    fn kind_name(&self) -> &'static str {
        "image"
    }

    fn origin(&self) -> Pos2 {
        self.origin
    }

    fn bounds(&self) -> Rect {
        Rect::from_min_size(self.origin, self.display_size())
    }

    fn hit_test(&self, pos: Pos2, tolerance: f32) -> bool {
        self.bounds().expand(tolerance).contains(pos)
    }

    fn translate(&mut self, delta: Vec2) {
        self.origin += delta;
    }

    /// Placeholder used until the renderer has a texture for the bitmap.
    fn draw(&self, painter: &Painter, offset: Vec2, style: &Style) {
        let rect = self.bounds().translate(offset);
        painter.rect_filled(rect, 0.0, Color32::from_gray(200).gamma_multiply(style.opacity));
        painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::from_gray(100)));
    }
}

/// Encode raw file bytes as `data:<mime>;base64,<payload>`.
pub fn to_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Extract the raw bytes from a base64 `data:` URL.
pub fn decode_data_url(src: &str) -> Result<Vec<u8>, ImageError> {
    let rest = src
        .strip_prefix("data:")
        .ok_or_else(|| ImageError::MalformedDataUrl("missing data: scheme".to_owned()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ImageError::MalformedDataUrl("missing payload separator".to_owned()))?;
    if !header.ends_with(";base64") {
        return Err(ImageError::MalformedDataUrl(format!(
            "unsupported encoding in header {header:?}"
        )));
    }
    Ok(STANDARD.decode(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_roundtrip() {
        let bytes = [0x89, b'P', b'N', b'G', 0, 1, 2, 3];
        let url = to_data_url(&bytes, "image/png");
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(decode_data_url(&url).unwrap(), bytes);
    }

    #[test]
    fn rejects_non_data_urls() {
        assert!(matches!(
            decode_data_url("https://example.com/cat.png"),
            Err(ImageError::MalformedDataUrl(_))
        ));
        assert!(matches!(
            decode_data_url("data:image/png,rawbytes"),
            Err(ImageError::MalformedDataUrl(_))
        ));
    }

    #[test]
    fn display_size_applies_scale() {
        let image = Image::new(Pos2::new(100.0, 100.0), Vec2::new(200.0, 80.0), 0.5, String::new());
        assert_eq!(image.bounds(), Rect::from_min_size(Pos2::new(100.0, 100.0), Vec2::new(100.0, 40.0)));
    }
}

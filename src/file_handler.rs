use egui::Vec2;
use futures::channel::oneshot;

use crate::element::to_data_url;
use crate::error::ImageError;

/// File extensions offered by the picker and accepted on drop.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// A decoded image ready to be placed on the canvas.
#[derive(Clone, PartialEq)]
pub struct ImagePayload {
    pub name: String,
    pub natural_size: Vec2,
    /// The original file bytes as a `data:` URL
    pub src: String,
}

impl std::fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePayload")
            .field("name", &self.name)
            .field("natural_size", &self.natural_size)
            .field("src_len", &self.src.len())
            .finish()
    }
}

impl ImagePayload {
    /// Decode the file once to learn its size and check that it really is an image.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self, ImageError> {
        let format = image::guess_format(bytes)?;
        let decoded = image::load_from_memory_with_format(bytes, format)?;
        log::debug!("Decoded image: {}x{}", decoded.width(), decoded.height());
        Ok(Self {
            name: name.into(),
            natural_size: Vec2::new(decoded.width() as f32, decoded.height() as f32),
            src: to_data_url(bytes, format.to_mime_type()),
        })
    }
}

type LoadResult = Result<ImagePayload, ImageError>;

/// Runs the file picker off the frame loop and hands the result back through a
/// one-shot channel. At most one load is in flight.
#[derive(Debug, Default)]
pub struct ImageLoader {
    pending: Option<oneshot::Receiver<LoadResult>>,
}

impl ImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Open the picker. The context is repainted once the file is decoded.
    pub fn pick(&mut self, ctx: &egui::Context) -> Result<(), ImageError> {
        if self.is_busy() {
            return Err(ImageError::Busy);
        }
        let (sender, receiver) = oneshot::channel();
        let ctx = ctx.clone();
        spawn_pick(move |result| {
            // The receiver is gone if the app shut down meanwhile.
            let _ = sender.send(result);
            ctx.request_repaint();
        });
        self.pending = Some(receiver);
        Ok(())
    }

    /// Result of the load in flight, once it is available.
    pub fn poll(&mut self) -> Option<LoadResult> {
        let receiver = self.pending.as_mut()?;
        let result = match receiver.try_recv() {
            Ok(None) => return None,
            Ok(Some(result)) => result,
            Err(oneshot::Canceled) => Err(ImageError::Read {
                name: "picker".to_owned(),
                reason: "the loader stopped before returning a file".to_owned(),
            }),
        };
        self.pending = None;
        Some(result)
    }

    /// Check if an image file was dropped onto the window this frame.
    pub fn take_dropped(&self, ctx: &egui::Context) -> Option<LoadResult> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let file = dropped.iter().find(|file| is_image_file(file))?;
        let name = if let Some(path) = &file.path {
            path.display().to_string()
        } else if !file.name.is_empty() {
            file.name.clone()
        } else {
            "unknown".to_owned()
        };

        if let Some(bytes) = &file.bytes {
            log::info!("Processing dropped image from memory: {} ({} bytes)", name, bytes.len());
            return Some(ImagePayload::from_bytes(name, bytes));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(path) = &file.path {
            log::info!("Processing dropped image from path: {}", path.display());
            return Some(match std::fs::read(path) {
                Ok(bytes) => ImagePayload::from_bytes(name, &bytes),
                Err(err) => Err(ImageError::Read {
                    name,
                    reason: err.to_string(),
                }),
            });
        }

        log::warn!("Dropped file has no accessible data: {}", name);
        None
    }
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let name = match &file.path {
        Some(path) => path.to_string_lossy().into_owned(),
        None => file.name.clone(),
    };
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
    })
}

async fn pick_image() -> LoadResult {
    let file = rfd::AsyncFileDialog::new()
        .set_title("Insert image")
        .add_filter("Images", &IMAGE_EXTENSIONS)
        .pick_file()
        .await
        .ok_or(ImageError::Cancelled)?;
    let name = file.file_name();
    let bytes = file.read().await;
    log::info!("Picked image {} ({} bytes)", name, bytes.len());
    ImagePayload::from_bytes(name, &bytes)
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_pick(done: impl FnOnce(LoadResult) + Send + 'static) {
    std::thread::spawn(move || done(futures::executor::block_on(pick_image())));
}

#[cfg(target_arch = "wasm32")]
fn spawn_pick(done: impl FnOnce(LoadResult) + 'static) {
    wasm_bindgen_futures::spawn_local(async move { done(pick_image().await) });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        image::RgbaImage::new(width, height)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn payload_records_size_and_mime() {
        let payload = ImagePayload::from_bytes("dot.png", &png_bytes(3, 2)).unwrap();
        assert_eq!(payload.natural_size, Vec2::new(3.0, 2.0));
        assert!(payload.src.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let result = ImagePayload::from_bytes("notes.png", b"definitely not pixels");
        assert!(matches!(result, Err(ImageError::Decode(_))));
    }

    #[test]
    fn idle_loader_polls_nothing() {
        let mut loader = ImageLoader::new();
        assert!(!loader.is_busy());
        assert!(loader.poll().is_none());
    }

    #[test]
    fn dropped_file_type_detection() {
        let by_mime = egui::DroppedFile {
            mime: "image/webp".to_owned(),
            ..Default::default()
        };
        let by_name = egui::DroppedFile {
            name: "Holiday.JPG".to_owned(),
            ..Default::default()
        };
        let text = egui::DroppedFile {
            name: "notes.txt".to_owned(),
            ..Default::default()
        };
        assert!(is_image_file(&by_mime));
        assert!(is_image_file(&by_name));
        assert!(!is_image_file(&text));
    }
}

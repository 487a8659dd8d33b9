use thiserror::Error;

/// Errors that can occur while bringing an image onto the canvas
#[derive(Debug, Error)]
pub enum ImageError {
    /// The user closed the file picker without choosing a file
    #[error("No image was selected")]
    Cancelled,

    #[error("Failed to read image file {name}: {reason}")]
    Read { name: String, reason: String },

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Malformed data URL: {0}")]
    MalformedDataUrl(String),

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// A load was requested while another one is still in flight
    #[error("An image is already being loaded")]
    Busy,
}

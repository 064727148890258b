//! Upload decoding and JPEG normalization
//!
//! Whatever format the client uploads, the model receives a baseline RGB JPEG.
//! Decoding failures here are not recoverable with a fallback body; the
//! request fails with a server error.

use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Uploaded image is empty")]
    Empty,

    #[error("Cannot decode uploaded image: {0}")]
    Decode(image::ImageError),

    #[error("Cannot encode image as JPEG: {0}")]
    Encode(image::ImageError),
}

/// Re-encoded upload ready for the model
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub jpeg: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Decode any supported image format and re-encode it as JPEG
pub fn prepare_image(bytes: &[u8]) -> Result<PreparedImage, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::Empty);
    }

    let decoded = image::load_from_memory(bytes).map_err(ImageError::Decode)?;
    let (width, height) = (decoded.width(), decoded.height());

    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());

    let mut jpeg = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
        .map_err(ImageError::Encode)?;

    Ok(PreparedImage {
        jpeg,
        width,
        height,
    })
}

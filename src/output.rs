//! Download naming, image reference parsing, and PNG normalization.

use std::path::{Path, PathBuf};

use base64::Engine;

use crate::error::ImageError;

/// Fixed name every download is saved under.
pub const DOWNLOAD_FILENAME: &str = "generated-image.png";

const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Where an image reference points.
#[derive(Debug, PartialEq, Eq)]
pub enum ImageSource<'a> {
    /// An `http(s)` URL that still has to be fetched.
    Remote(&'a str),
    /// Bytes embedded in a `data:` URI.
    Inline {
        /// Declared MIME type, e.g. `image/png`.
        mime_type: String,
        /// Decoded payload.
        data: Vec<u8>,
    },
}

/// Path a download into `dir` is written to.
#[must_use]
pub fn download_path(dir: &Path) -> PathBuf {
    dir.join(DOWNLOAD_FILENAME)
}

/// Classify an image reference returned by the generation service.
///
/// # Errors
///
/// Returns an error for unsupported schemes, non-base64 data URIs, and
/// payloads that fail to decode.
pub fn classify(image_ref: &str) -> Result<ImageSource<'_>, ImageError> {
    if let Some(rest) = image_ref.strip_prefix("data:") {
        let (header, payload) = rest.split_once(',').ok_or_else(|| {
            ImageError::InvalidArgument("data URI is missing its ',' separator".into())
        })?;
        let mime_type = header.strip_suffix(";base64").ok_or_else(|| {
            ImageError::InvalidArgument("only base64 data URIs are supported".into())
        })?;
        let data = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| ImageError::ImageConversion(format!("Failed to decode base64: {e}")))?;
        return Ok(ImageSource::Inline { mime_type: mime_type.to_string(), data });
    }

    if image_ref.starts_with("https://") || image_ref.starts_with("http://") {
        return Ok(ImageSource::Remote(image_ref));
    }

    Err(ImageError::InvalidArgument(format!("Unsupported image reference '{image_ref}'")))
}

/// Save image bytes as PNG, converting when they are in another format.
///
/// # Errors
///
/// Returns an error if the file cannot be written or conversion fails.
pub fn save_png(data: &[u8], output_path: &Path) -> Result<(), ImageError> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    if data.starts_with(&PNG_MAGIC) {
        std::fs::write(output_path, data).map_err(ImageError::Io)
    } else {
        convert_and_save(data, output_path)
    }
}

fn convert_and_save(data: &[u8], output_path: &Path) -> Result<(), ImageError> {
    let img = image::load_from_memory(data)
        .map_err(|e| ImageError::ImageConversion(format!("Failed to decode image: {e}")))?;

    img.save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| ImageError::ImageConversion(format!("Failed to save as png: {e}")))
}

//! Live download adapter: resolves an image reference and writes a PNG.

use std::path::Path;

use reqwest::Client;

use crate::error::ImageError;
use crate::output::{classify, save_png, ImageSource};
use crate::ports::image_saver::{ImageSaver, SaveFuture};

/// Saves remote or inline images to the local filesystem.
pub struct FileSaver {
    client: Client,
}

impl FileSaver {
    /// Create a saver with a fresh HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for FileSaver {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageSaver for FileSaver {
    fn save(&self, image_ref: &str, path: &Path) -> SaveFuture<'_> {
        let image_ref = image_ref.to_string();
        let path = path.to_path_buf();
        Box::pin(async move {
            let data = match classify(&image_ref)? {
                ImageSource::Inline { mime_type, data } => {
                    log::debug!("saving inline {mime_type} image ({} bytes)", data.len());
                    data
                }
                ImageSource::Remote(url) => {
                    log::debug!("fetching {url}");
                    let response = self.client.get(url).send().await?;
                    let status = response.status();
                    if !status.is_success() {
                        return Err(ImageError::Api {
                            status: status.as_u16(),
                            message: format!("Failed to download image from {url}"),
                        });
                    }
                    response.bytes().await?.to_vec()
                }
            };

            save_png(&data, &path)?;
            Ok(path)
        })
    }
}

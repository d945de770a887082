//! Download boundary: writes a referenced image to disk.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use crate::error::ImageError;

/// Boxed future type returned by [`ImageSaver::save`].
pub type SaveFuture<'a> = Pin<Box<dyn Future<Output = Result<PathBuf, ImageError>> + Send + 'a>>;

/// Materializes an image reference as a file.
pub trait ImageSaver: Send + Sync {
    /// Save the image behind `image_ref` to `path`, returning the written path.
    fn save(&self, image_ref: &str, path: &Path) -> SaveFuture<'_>;
}

//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the view and an external
//! system. Implementations live in `src/adapters/`.

pub mod image_generator;
pub mod image_saver;
pub mod notifier;

pub use image_generator::{GenerationRequest, GenerationResponse, ImageGenerator};
pub use image_saver::ImageSaver;
pub use notifier::{Notification, Notifier};

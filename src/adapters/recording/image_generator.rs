//! Recording adapter for the generation service port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::{GENERATE_METHOD, GENERATION_PORT};
use crate::error::ImageError;
use crate::ports::image_generator::{GenerateFuture, GenerationRequest, ImageGenerator};

/// Delegates to an inner generator and records every outcome.
pub struct RecordingImageGenerator {
    inner: Box<dyn ImageGenerator>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingImageGenerator {
    /// Wrap `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn ImageGenerator>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ImageGenerator for RecordingImageGenerator {
    fn generate(&self, request: &GenerationRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.generate(&request).await;
            // Errors are stored as their notification text so a replay shows the same message.
            let recorded = result.as_ref().map_err(ImageError::user_message);
            record_result(&recorder, GENERATION_PORT, GENERATE_METHOD, &request, &recorded);
            result
        })
    }
}

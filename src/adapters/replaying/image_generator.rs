//! Replaying adapter for the generation service port.

use std::sync::{Arc, Mutex};

use super::{next_replayed, Replayed};
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::{GENERATE_METHOD, GENERATION_PORT};
use crate::error::ImageError;
use crate::ports::image_generator::{
    GenerateFuture, GenerationRequest, GenerationResponse, ImageGenerator,
};

/// Serves recorded generation outcomes from a cassette.
pub struct ReplayingImageGenerator {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingImageGenerator {
    /// Create a replaying generator backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl ImageGenerator for ReplayingImageGenerator {
    fn generate(&self, request: &GenerationRequest) -> GenerateFuture<'_> {
        log::debug!("replaying generation for prompt {:?}", request.prompt);
        let outcome =
            next_replayed::<GenerationResponse>(&self.replayer, GENERATION_PORT, GENERATE_METHOD);
        Box::pin(async move {
            match outcome? {
                Replayed::Ok(response) => Ok(response),
                // Status 0 marks a failure that came from a cassette rather than the wire.
                Replayed::Err(message) => Err(ImageError::Api { status: 0, message }),
            }
        })
    }
}

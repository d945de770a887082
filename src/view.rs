//! The image generator view: prompt, result, and request lifecycle.
//!
//! The view owns three pieces of state and mutates them only in response to
//! its own operations. Overlapping requests follow a latest-request-wins
//! policy: every started request gets a ticket, and a settlement carrying a
//! ticket older than the newest one is discarded.

use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::error::ImageError;
use crate::output::download_path;
use crate::ports::{GenerationRequest, GenerationResponse, ImageGenerator, ImageSaver};
use crate::ports::{Notification, Notifier};

/// Canned prompts offered as shortcuts.
pub const EXAMPLE_PROMPTS: [&str; 4] = [
    "A serene mountain landscape at sunset with vibrant colors",
    "A futuristic city with flying cars and neon lights",
    "A magical forest with glowing mushrooms and fireflies",
    "An abstract artwork with flowing colors and geometric shapes",
];

/// Shown when `generate` is triggered with a blank prompt.
pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter a prompt";
/// Shown when an image reference has been stored.
pub const GENERATED_MESSAGE: &str = "Image generated successfully!";
/// Shown after a successful download.
pub const DOWNLOADED_MESSAGE: &str = "Image downloaded!";

/// Whether a generation request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    /// Nothing pending.
    #[default]
    Idle,
    /// A request has started and not yet settled.
    InFlight,
}

/// A started request that has not been applied to the view yet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending generation must be settled"]
pub struct PendingGeneration {
    ticket: u64,
    /// Payload to send to the generation service.
    pub request: GenerationRequest,
}

impl PendingGeneration {
    /// Sequence number of this request within the view.
    #[must_use]
    pub fn ticket(&self) -> u64 {
        self.ticket
    }
}

/// Orchestrates one prompt-to-image cycle at a time.
pub struct ImageGeneratorView {
    generator: Box<dyn ImageGenerator>,
    saver: Box<dyn ImageSaver>,
    notifier: Box<dyn Notifier>,
    prompt: String,
    image: Option<String>,
    state: RequestState,
    latest_ticket: u64,
}

impl ImageGeneratorView {
    /// Create an idle view with an empty prompt.
    pub fn new(
        generator: Box<dyn ImageGenerator>,
        saver: Box<dyn ImageSaver>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            generator,
            saver,
            notifier,
            prompt: String::new(),
            image: None,
            state: RequestState::Idle,
            latest_ticket: 0,
        }
    }

    /// Create a view over the ports of a service context.
    pub fn from_context(ctx: ServiceContext, notifier: Box<dyn Notifier>) -> Self {
        Self::new(ctx.generator, ctx.saver, notifier)
    }

    /// Current prompt text.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Reference to the last generated image, if any.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Current request state.
    #[must_use]
    pub fn request_state(&self) -> RequestState {
        self.state
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.state == RequestState::InFlight
    }

    /// Replace the prompt.
    pub fn set_prompt(&mut self, text: impl Into<String>) {
        self.prompt = text.into();
    }

    /// Use one of [`EXAMPLE_PROMPTS`] as the prompt.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidArgument`] for an index past the end of
    /// the list; the prompt is left untouched.
    pub fn select_example(&mut self, index: usize) -> Result<&'static str, ImageError> {
        let example = EXAMPLE_PROMPTS.get(index).copied().ok_or_else(|| {
            ImageError::InvalidArgument(format!(
                "No example #{index}; there are {} examples",
                EXAMPLE_PROMPTS.len()
            ))
        })?;
        self.prompt = example.to_string();
        Ok(example)
    }

    /// Validate the prompt and move to the in-flight state.
    ///
    /// The returned ticket carries the prompt exactly as entered.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::Validation`] for a blank prompt, after notifying.
    pub fn begin_generate(&mut self) -> Result<PendingGeneration, ImageError> {
        if self.prompt.trim().is_empty() {
            log::warn!("generation requested with an empty prompt");
            self.notifier.notify(Notification::Error(EMPTY_PROMPT_MESSAGE.to_string()));
            return Err(ImageError::Validation(EMPTY_PROMPT_MESSAGE.to_string()));
        }

        self.latest_ticket += 1;
        self.state = RequestState::InFlight;
        self.image = None;
        log::debug!("starting generation #{}", self.latest_ticket);

        Ok(PendingGeneration {
            ticket: self.latest_ticket,
            request: GenerationRequest { prompt: self.prompt.clone() },
        })
    }

    /// Apply the outcome of a started request.
    ///
    /// Returns the stored image reference on success.
    ///
    /// # Errors
    ///
    /// Returns the request's own error after notifying, or
    /// [`ImageError::Superseded`] without touching the view when a newer
    /// request has started since.
    pub fn settle(
        &mut self,
        pending: PendingGeneration,
        outcome: Result<GenerationResponse, ImageError>,
    ) -> Result<&str, ImageError> {
        if pending.ticket() != self.latest_ticket {
            log::debug!(
                "discarding generation #{} superseded by #{}",
                pending.ticket(),
                self.latest_ticket
            );
            return Err(ImageError::Superseded);
        }

        self.state = RequestState::Idle;
        let outcome = outcome.and_then(|response| {
            if response.image_url.trim().is_empty() {
                Err(ImageError::MalformedResponse("response carried an empty imageUrl".into()))
            } else {
                Ok(response)
            }
        });
        match outcome {
            Ok(response) => {
                log::info!("generation #{} produced an image", pending.ticket);
                self.notifier.notify(Notification::Success(GENERATED_MESSAGE.to_string()));
                Ok(self.image.insert(response.image_url).as_str())
            }
            Err(e) => {
                log::error!("generation #{} failed: {e}", pending.ticket);
                self.notifier.notify(Notification::Error(e.user_message()));
                Err(e)
            }
        }
    }

    /// Run one full generation cycle against the generation service.
    ///
    /// # Errors
    ///
    /// Returns the validation or request error that was notified.
    pub async fn generate(&mut self) -> Result<&str, ImageError> {
        let pending = self.begin_generate()?;
        let outcome = self.generator.generate(&pending.request).await;
        self.settle(pending, outcome)
    }

    /// Save the current image as `dir/generated-image.png`.
    ///
    /// Without an image this does nothing and returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns the save error after notifying.
    pub async fn download(&self, dir: &Path) -> Result<Option<PathBuf>, ImageError> {
        let Some(image) = self.image.as_deref() else {
            return Ok(None);
        };

        match self.saver.save(image, &download_path(dir)).await {
            Ok(path) => {
                log::info!("saved image to {}", path.display());
                self.notifier.notify(Notification::Success(DOWNLOADED_MESSAGE.to_string()));
                Ok(Some(path))
            }
            Err(e) => {
                log::error!("download failed: {e}");
                self.notifier.notify(Notification::Error(e.user_message()));
                Err(e)
            }
        }
    }
}

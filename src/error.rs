//! Unified error type for imagegen.

use thiserror::Error;

/// Message shown when the generation service gives no usable error text.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to generate image";

/// Errors that can occur while generating or downloading an image.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The prompt failed local validation; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// The generation service returned a non-success response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code (0 for replayed failures).
        status: u16,
        /// Error message from the service, or the generic fallback.
        message: String,
    },

    /// The service answered successfully but the body was unusable.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Image decoding or PNG conversion failed during download.
    #[error("Image conversion error: {0}")]
    ImageConversion(String),

    /// A required service setting is not configured.
    #[error("Missing {field}. Set {env_var} or add it to the [service] table of the config file.")]
    MissingConfig {
        /// The config field name.
        field: String,
        /// The environment variable that can supply it.
        env_var: String,
    },

    /// The request settled after a newer request had already started.
    #[error("Request superseded by a newer generation")]
    Superseded,
}

impl ImageError {
    /// Text suitable for a user-facing notification.
    ///
    /// Service failures report the service's own message; everything else
    /// reports its display text.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Api { .. } => FALLBACK_ERROR_MESSAGE.to_string(),
            Self::MalformedResponse(detail) => format!("{FALLBACK_ERROR_MESSAGE}: {detail}"),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_message_is_passed_through() {
        let err = ImageError::Api { status: 429, message: "rate limited".into() };
        assert_eq!(err.user_message(), "rate limited");
        assert_eq!(err.to_string(), "API error (429): rate limited");
    }

    #[test]
    fn blank_api_message_falls_back() {
        let err = ImageError::Api { status: 500, message: "  ".into() };
        assert_eq!(err.user_message(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn validation_message_is_bare() {
        let err = ImageError::Validation("Please enter a prompt".into());
        assert_eq!(err.user_message(), "Please enter a prompt");
    }

    #[test]
    fn malformed_response_mentions_fallback() {
        let err = ImageError::MalformedResponse("missing imageUrl".into());
        assert_eq!(err.user_message(), "Failed to generate image: missing imageUrl");
    }
}

//! Generation service port: turns a prompt into an image reference.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::ImageError;

/// Payload sent to the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The prompt exactly as the user left it.
    pub prompt: String,
}

/// Successful answer from the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Location of the produced image: an `http(s)` URL or a `data:` URI.
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// Boxed future type returned by [`ImageGenerator::generate`].
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<GenerationResponse, ImageError>> + Send + 'a>>;

/// Generates an image from a text prompt via an external service.
pub trait ImageGenerator: Send + Sync {
    /// Issue one generation call for the given request.
    fn generate(&self, request: &GenerationRequest) -> GenerateFuture<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wire_shape() {
        let request = GenerationRequest { prompt: "  a cat ".into() };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"prompt": "  a cat "}));
    }

    #[test]
    fn response_uses_camel_case_field() {
        let parsed: GenerationResponse =
            serde_json::from_str(r#"{"imageUrl": "https://example.com/a.png"}"#).unwrap();
        assert_eq!(parsed.image_url, "https://example.com/a.png");
        assert!(serde_json::from_str::<GenerationResponse>(r#"{"image_url": "x"}"#).is_err());
    }
}

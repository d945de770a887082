//! Live adapter for the hosted `generate-image` function.

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::ServiceConfig;
use crate::error::{ImageError, FALLBACK_ERROR_MESSAGE};
use crate::ports::image_generator::{
    GenerateFuture, GenerationRequest, GenerationResponse, ImageGenerator,
};

const FUNCTION_PATH: &str = "functions/v1/generate-image";

/// Calls `{base_url}/functions/v1/generate-image` with a bearer credential.
pub struct EdgeFunctionGenerator {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl EdgeFunctionGenerator {
    /// Create a generator for the given service settings.
    #[must_use]
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: function_url(&config.base_url),
            api_key: config.api_key.clone(),
        }
    }
}

/// Join the base location and the function path.
#[must_use]
pub fn function_url(base_url: &str) -> String {
    format!("{}/{FUNCTION_PATH}", base_url.trim_end_matches('/'))
}

impl ImageGenerator for EdgeFunctionGenerator {
    fn generate(&self, request: &GenerationRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            log::debug!("POST {}", self.endpoint);

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;
            interpret_response(status, &body)
        })
    }
}

/// Turn a raw status and body into the port's result.
///
/// # Errors
///
/// Non-success statuses become [`ImageError::Api`] carrying the body's
/// `error` field or the generic fallback. Success bodies without a string
/// `imageUrl` become [`ImageError::MalformedResponse`].
pub fn interpret_response(status: StatusCode, body: &str) -> Result<GenerationResponse, ImageError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
        return Err(ImageError::Api { status: status.as_u16(), message });
    }

    let parsed = serde_json::from_str::<GenerationResponse>(body).map_err(|e| {
        let truncated = if body.len() > 200 {
            format!("{}...", body.chars().take(200).collect::<String>())
        } else {
            body.to_string()
        };
        ImageError::MalformedResponse(format!("{e}. Body: {truncated}"))
    })?;

    if parsed.image_url.trim().is_empty() {
        return Err(ImageError::MalformedResponse("response carried an empty imageUrl".into()));
    }
    Ok(parsed)
}

// --- service error body ---

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        assert_eq!(
            function_url("https://demo.supabase.co/"),
            "https://demo.supabase.co/functions/v1/generate-image"
        );
        assert_eq!(
            function_url("https://demo.supabase.co"),
            "https://demo.supabase.co/functions/v1/generate-image"
        );
    }

    #[test]
    fn success_extracts_image_url() {
        let parsed =
            interpret_response(StatusCode::OK, r#"{"imageUrl":"https://example.com/a.png"}"#)
                .unwrap();
        assert_eq!(parsed.image_url, "https://example.com/a.png");
    }

    #[test]
    fn failure_uses_error_field() {
        let err =
            interpret_response(StatusCode::TOO_MANY_REQUESTS, r#"{"error":"rate limited"}"#)
                .unwrap_err();
        match err {
            ImageError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "rate limited");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn failure_without_error_field_falls_back() {
        let err = interpret_response(StatusCode::INTERNAL_SERVER_ERROR, "{}").unwrap_err();
        assert_eq!(err.user_message(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn failure_with_non_json_body_falls_back() {
        let err = interpret_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>")
            .unwrap_err();
        assert_eq!(err.user_message(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn empty_image_url_is_malformed() {
        for body in [r#"{"imageUrl":""}"#, r#"{"imageUrl":"   "}"#] {
            let err = interpret_response(StatusCode::OK, body).unwrap_err();
            assert!(matches!(err, ImageError::MalformedResponse(_)), "body {body} gave {err:?}");
        }
    }

    #[tokio::test]
    async fn unreachable_service_is_a_network_error() {
        let generator = EdgeFunctionGenerator::new(&ServiceConfig {
            base_url: "http://127.0.0.1:9".into(),
            api_key: "test-key".into(),
        });
        let err = generator
            .generate(&GenerationRequest { prompt: "a cat".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, ImageError::Network(_)), "got {err:?}");
    }

    #[test]
    fn success_without_image_url_is_malformed() {
        let err = interpret_response(StatusCode::OK, r#"{"status":"done"}"#).unwrap_err();
        assert!(matches!(err, ImageError::MalformedResponse(_)));
    }
}

//! HTTP client for the puzzle-validation service.
//!
//! Implements [`ValidationApiPort`] over reqwest. Every outcome branch -
//! transport failure, unreadable body, HTTP status, unparsable JSON - is
//! folded into an [`ApiResult`]; nothing escapes the port as an error. The
//! mapping itself lives in pure `interpret_*` functions over `(status,
//! body)` so each branch is testable without a server.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use url::Url;

use keyhunt_protocol::{AnswerSubmission, ApiResult, ErrorKind, GameStateSubmission};

use crate::ports::ValidationApiPort;

/// Default validation-service base URL.
pub const DEFAULT_API_BASE_URL: &str =
    "https://us-central1-keyhunt-events.cloudfunctions.net/keyhunt-api";

const SUBMIT_GUESS_ENDPOINT: &str = "submit-guess";
const VALIDATE_KEY_ENDPOINT: &str = "validate-key";
const SUBMIT_ANSWER_ENDPOINT: &str = "submit-answer";

/// Request timeout. Submissions are small JSON bodies; anything slower than
/// this reads as a connectivity problem to the player.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
enum RequestBuildError {
    #[error("invalid base URL: {0}")]
    InvalidBase(#[from] url::ParseError),
    #[error("base URL cannot carry path segments")]
    CannotBeABase,
}

/// Client for the validation service's JSON-over-HTTPS API
#[derive(Clone)]
pub struct EventApiClient {
    client: Client,
    base_url: String,
}

impl EventApiClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from the `KEYHUNT_API_BASE_URL` environment variable,
    /// falling back to the default if not set.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("KEYHUNT_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        Self::new(&base_url)
    }

    /// Build an endpoint URL, percent-encoding each segment.
    ///
    /// Event keys are user input and travel as a path segment, so they must
    /// go through the URL encoder rather than string concatenation.
    fn endpoint_url(&self, segments: &[&str]) -> Result<Url, RequestBuildError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| RequestBuildError::CannotBeABase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl Default for EventApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[async_trait::async_trait]
impl ValidationApiPort for EventApiClient {
    async fn submit_guess(&self, submission: GameStateSubmission) -> ApiResult {
        let url = match self.endpoint_url(&[SUBMIT_GUESS_ENDPOINT]) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Failed to create submit-guess request: {}", e);
                return ApiResult::error(format!("Request creation failed: {e}"));
            }
        };

        tracing::debug!(event_key = %submission.event_key, "Submitting game state");

        let response = match self.client.post(url).json(&submission).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Submission request failed: {}", e);
                return ApiResult::error(format!("Network error: {e}"));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Failed to read submission response body: {}", e);
                return ApiResult::error("Failed to read server response");
            }
        };

        tracing::debug!(status = %status, body = %body, "Submission response");
        interpret_submit_response(status, &body)
    }

    async fn validate_key(&self, event_key: &str) -> ApiResult {
        let url = match self.endpoint_url(&[VALIDATE_KEY_ENDPOINT, event_key]) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Failed to create key-validation request: {}", e);
                return ApiResult::error_with_kind(
                    ErrorKind::RequestError,
                    format!("Request creation failed: {e}"),
                );
            }
        };

        tracing::debug!(event_key, "Validating event key");

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Key-validation request failed: {}", e);
                return ApiResult::error_with_kind(
                    ErrorKind::NetworkError,
                    format!("Network error: {e}"),
                );
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Failed to read key-validation response body: {}", e);
                return ApiResult::error_with_kind(
                    ErrorKind::IoError,
                    "Failed to read server response",
                );
            }
        };

        tracing::debug!(status = %status, body = %body, "Key-validation response");
        interpret_validation_response(status, &body)
    }

    async fn submit_answer(&self, answer: AnswerSubmission) -> ApiResult {
        let url = match self.endpoint_url(&[SUBMIT_ANSWER_ENDPOINT]) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Failed to create submit-answer request: {}", e);
                return ApiResult::error(format!("Request creation failed: {e}"));
            }
        };

        tracing::debug!(event_key = %answer.event_key, "Submitting authored answer");

        let response = match self.client.post(url).json(&answer).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Answer submission request failed: {}", e);
                return ApiResult::error(format!("Network error: {e}"));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Failed to read answer submission response body: {}", e);
                return ApiResult::error("Failed to read server response");
            }
        };

        tracing::debug!(status = %status, body = %body, "Answer submission response");
        interpret_submit_response(status, &body)
    }
}

/// Map a `/submit-guess` (or `/submit-answer`) response to an [`ApiResult`].
///
/// 2xx with a parsable body passes the server's own result through; 2xx with
/// an unparsable body and every non-2xx status fold into a failure message.
fn interpret_submit_response(status: StatusCode, body: &str) -> ApiResult {
    if status.is_success() {
        match serde_json::from_str::<ApiResult>(body) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Failed to parse submission response JSON: {}", e);
                ApiResult::error("Invalid response format")
            }
        }
    } else {
        ApiResult::error(format!("Server error {}: {}", status.as_u16(), body))
    }
}

/// Map a `/validate-key` response to an [`ApiResult`].
///
/// 404 is the expected "key does not exist" signal - it resolves with
/// [`ErrorKind::KeyNotFound`] and is logged at debug, not as an error.
fn interpret_validation_response(status: StatusCode, body: &str) -> ApiResult {
    if status.is_success() {
        match serde_json::from_str::<ApiResult>(body) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Failed to parse key-validation response JSON: {}", e);
                ApiResult::error_with_kind(ErrorKind::ParseError, "Invalid response format")
            }
        }
    } else if status == StatusCode::NOT_FOUND {
        tracing::debug!("Event key not found (404)");
        ApiResult::error_with_kind(ErrorKind::KeyNotFound, "Event key not found")
    } else {
        tracing::error!("Server error response: {} - {}", status, body);
        ApiResult::error_with_kind(
            ErrorKind::ServerError,
            format!("Server error: {}", status.as_u16()),
        )
    }
}

//! Stateless HTTP request builder and response reporter for the Gemini API.
//!
//! # Design
//! `GeminiClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is a `build_*` method producing an `HttpRequest`;
//! every response goes through `report`, which never fails. The caller
//! executes the HTTP round-trip in between.

use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::report::{Outcome, Report};
use crate::types::{Credential, GenerateContentRequest, GenerateContentResponse, ModelList};

/// Public Generative Language API, v1beta surface.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

pub const DEFAULT_PROMPT: &str = "Write a Python function to check if a number is prime.";

/// Header carrying the credential on `generateContent` calls.
pub const API_KEY_HEADER: &str = "X-goog-api-key";

/// Synchronous, stateless client for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    base_url: String,
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl GeminiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/models?key=<credential>`. The key is not escaped.
    pub fn build_list_models(&self, credential: &Credential) -> HttpRequest {
        debug!(base_url = %self.base_url, %credential, "building list-models request");
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/models?key={}", self.base_url, credential.query_value()),
            headers: Vec::new(),
            body: None,
        }
    }

    /// `POST {base}/models/{model}:generateContent` with a one-part prompt.
    pub fn build_generate_content(
        &self,
        model: &str,
        credential: &Credential,
        prompt: &str,
    ) -> Result<HttpRequest, ApiError> {
        debug!(base_url = %self.base_url, model, %credential, "building generate-content request");
        let payload = GenerateContentRequest::from_prompt(prompt);
        let body = serde_json::to_string(&payload).map_err(|e| ApiError::Serialization(e.to_string()))?;

        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(key) = credential.header_value() {
            headers.push((API_KEY_HEADER.to_string(), key.to_string()));
        }

        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/models/{model}:generateContent", self.base_url),
            headers,
            body: Some(body),
        })
    }

    /// Decode the body as JSON, falling back to the raw text and the decode
    /// error. Never fails.
    pub fn report(&self, response: HttpResponse) -> Report {
        let outcome = match serde_json::from_str(&response.body) {
            Ok(value) => Outcome::Json(value),
            Err(e) => {
                debug!(status = response.status, error = %e, "response body is not JSON");
                Outcome::Raw {
                    body: response.body,
                    error: e.to_string(),
                }
            }
        };
        Report {
            status: response.status,
            outcome,
        }
    }

    pub fn parse_model_list(&self, report: &Report) -> Result<ModelList, ApiError> {
        typed(report)
    }

    pub fn parse_generate_content(&self, report: &Report) -> Result<GenerateContentResponse, ApiError> {
        typed(report)
    }
}

fn typed<T: serde::de::DeserializeOwned>(report: &Report) -> Result<T, ApiError> {
    let value = report
        .json()
        .ok_or_else(|| ApiError::Deserialization("response body is not JSON".to_string()))?;
    T::deserialize(value).map_err(|e| ApiError::Deserialization(e.to_string()))
}

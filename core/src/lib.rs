//! Synchronous API client core for the Gemini (Generative Language) API.
//!
//! # Overview
//! Builds `HttpRequest` values and reports on `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `GeminiClient` is stateless; it holds only `base_url`.
//! - Two operations: `build_list_models` and `build_generate_content`.
//! - Every response goes through `report`, which yields the decoded JSON or
//!   the raw text plus the decode error. It never fails.
//! - Typed views (`ModelList`, `GenerateContentResponse`) are layered on top
//!   of a `Report` for human-readable output.

pub mod client;
pub mod error;
pub mod http;
pub mod report;
pub mod types;

pub use client::{GeminiClient, API_KEY_HEADER, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_PROMPT};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use report::{Outcome, Report};
pub use types::{
    ApiErrorBody, ApiErrorDetail, Credential, GenerateContentRequest, GenerateContentResponse, ModelInfo,
    ModelList,
};

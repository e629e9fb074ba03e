//! Wire DTOs for the Generative Language API.
//!
//! # Design
//! Request types serialize to exactly the shape the endpoint expects, with no
//! optional fields emitted. Response types are lenient: every field the
//! service may omit is `#[serde(default)]`, since they only back the
//! human-readable output and the raw JSON report is always available.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The API key, read once at startup and never validated locally.
///
/// `None` means the variable was not set at all; `Some("")` is an empty key
/// that is still sent. Formatting never reveals the value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(Option<String>);

impl Credential {
    pub fn new(key: Option<String>) -> Self {
        Self(key)
    }

    pub fn absent() -> Self {
        Self(None)
    }

    /// True when a non-empty key is configured.
    pub fn is_present(&self) -> bool {
        self.0.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Value for the `key` query parameter; an absent key yields `""`.
    pub fn query_value(&self) -> &str {
        self.0.as_deref().unwrap_or("")
    }

    /// Value for the `X-goog-api-key` header; absent keys send no header.
    pub fn header_value(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl From<&str> for Credential {
    fn from(key: &str) -> Self {
        Self(Some(key.to_string()))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({self})")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_present() {
            f.write_str("*** (key exists)")
        } else {
            f.write_str("MISSING API KEY")
        }
    }
}

/// Body of a `:generateContent` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A single-turn request carrying one text part.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

/// Response of `GET /models`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModelList {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl ModelList {
    /// Numbered, human-readable listing of the models.
    pub fn summary(&self) -> String {
        if self.models.is_empty() {
            return "No models found.".to_string();
        }

        let mut out = String::from("Available models:\n");
        for (i, model) in self.models.iter().enumerate() {
            let methods = if model.supported_generation_methods.is_empty() {
                "N/A".to_string()
            } else {
                model.supported_generation_methods.join(", ")
            };
            out.push_str(&format!("\nModel {}:\n", i + 1));
            out.push_str(&format!("  Name: {}\n", model.name));
            out.push_str(&format!("  Display Name: {}\n", or_na(&model.display_name)));
            out.push_str(&format!("  Description: {}\n", or_na(&model.description)));
            out.push_str(&format!("  Supported Methods: {methods}\n"));
            out.push_str(&format!("  Version: {}\n", or_na(&model.version)));
        }
        out
    }
}

fn or_na(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => "N/A",
    }
}

/// Response of `POST /models/{model}:generateContent`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub model_version: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, if any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        if content.parts.is_empty() {
            return None;
        }
        Some(content.parts.iter().map(|p| p.text.as_str()).collect())
    }
}

/// Google's error envelope: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

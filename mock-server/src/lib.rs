use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{debug, info};

pub const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub version: String,
    pub supported_generation_methods: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelList {
    pub models: Vec<Model>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

#[derive(Deserialize)]
pub struct GenerateContent {
    pub contents: Vec<Content>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Content,
    pub finish_reason: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    pub candidates: Vec<Candidate>,
    pub model_version: String,
}

#[derive(Deserialize)]
struct KeyQuery {
    key: Option<String>,
}

/// The single key this server accepts.
pub type ApiKey = Arc<String>;

pub fn app(api_key: &str) -> Router {
    let key: ApiKey = Arc::new(api_key.to_string());
    Router::new()
        .route("/v1beta/models", get(list_models))
        .route("/v1beta/models/{target}", post(model_action))
        .with_state(key)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

pub fn fixture_models() -> Vec<Model> {
    vec![
        Model {
            name: "models/gemini-2.0-flash".to_string(),
            display_name: "Gemini 2.0 Flash".to_string(),
            description: "Fast and versatile multimodal model".to_string(),
            version: "2.0".to_string(),
            supported_generation_methods: vec![
                "generateContent".to_string(),
                "countTokens".to_string(),
            ],
        },
        Model {
            name: "models/text-embedding-004".to_string(),
            display_name: "Text Embedding 004".to_string(),
            description: "Obtain a distributed representation of a text.".to_string(),
            version: "004".to_string(),
            supported_generation_methods: vec!["embedContent".to_string()],
        },
    ]
}

/// Google-style error envelope.
fn api_error(status: StatusCode, message: &str, reason: &str) -> Response {
    let body = json!({
        "error": {
            "code": status.as_u16(),
            "message": message,
            "status": reason,
        }
    });
    (status, Json(body)).into_response()
}

fn check_key(expected: &str, provided: Option<&str>) -> Result<(), Response> {
    match provided {
        None | Some("") => Err(api_error(
            StatusCode::FORBIDDEN,
            "Method doesn't allow unregistered callers. Please use API Key or other form of API consumer identity to call this API.",
            "PERMISSION_DENIED",
        )),
        Some(k) if k == expected => Ok(()),
        Some(_) => Err(api_error(
            StatusCode::BAD_REQUEST,
            "API key not valid. Please pass a valid API key.",
            "INVALID_ARGUMENT",
        )),
    }
}

async fn list_models(State(key): State<ApiKey>, Query(query): Query<KeyQuery>) -> Response {
    if let Err(rejection) = check_key(&key, query.key.as_deref()) {
        return rejection;
    }
    debug!("listing models");
    Json(ModelList {
        models: fixture_models(),
    })
    .into_response()
}

async fn model_action(
    State(key): State<ApiKey>,
    Path(target): Path<String>,
    headers: HeaderMap,
    Json(input): Json<GenerateContent>,
) -> Response {
    let Some((model, "generateContent")) = target.split_once(':') else {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    };

    let provided = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
    if let Err(rejection) = check_key(&key, provided) {
        return rejection;
    }

    let prompt = input
        .contents
        .first()
        .and_then(|c| c.parts.first())
        .map(|p| p.text.as_str())
        .unwrap_or_default();
    info!(model, "generating content");

    Json(GenerateContentResponse {
        candidates: vec![Candidate {
            content: Content {
                role: Some("model".to_string()),
                parts: vec![Part {
                    text: format!("echo: {prompt}"),
                }],
            },
            finish_reason: "STOP".to_string(),
        }],
        model_version: model.to_string(),
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_serializes_camel_case() {
        let json = serde_json::to_value(&fixture_models()[0]).unwrap();
        assert_eq!(json["displayName"], "Gemini 2.0 Flash");
        assert_eq!(json["supportedGenerationMethods"][0], "generateContent");
    }

    #[test]
    fn generate_content_accepts_body_without_role() {
        let input: GenerateContent =
            serde_json::from_str(r#"{"contents":[{"parts":[{"text":"hi"}]}]}"#).unwrap();
        assert_eq!(input.contents[0].parts[0].text, "hi");
        assert!(input.contents[0].role.is_none());
    }

    #[test]
    fn generate_content_rejects_missing_contents() {
        let result: Result<GenerateContent, _> = serde_json::from_str(r#"{"prompt":"hi"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn check_key_distinguishes_missing_from_wrong() {
        assert!(check_key("k", Some("k")).is_ok());
        let missing = check_key("k", None).unwrap_err();
        assert_eq!(missing.status(), StatusCode::FORBIDDEN);
        let empty = check_key("k", Some("")).unwrap_err();
        assert_eq!(empty.status(), StatusCode::FORBIDDEN);
        let wrong = check_key("k", Some("nope")).unwrap_err();
        assert_eq!(wrong.status(), StatusCode::BAD_REQUEST);
    }
}

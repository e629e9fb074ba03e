use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, GenerateContentResponse, ModelList};
use tower::ServiceExt;

const KEY: &str = "test-key";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn generate_request(uri: &str, key: Option<&str>, body: &str) -> Request<String> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(key) = key {
        builder = builder.header("X-goog-api-key", key);
    }
    builder.body(body.to_string()).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

const PROMPT_BODY: &str = r#"{"contents":[{"parts":[{"text":"Say hello world"}]}]}"#;

// --- list models ---

#[tokio::test]
async fn list_models_with_valid_key() {
    let resp = app(KEY)
        .oneshot(get("/v1beta/models?key=test-key"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let list: ModelList = body_json(resp).await;
    assert_eq!(list.models.len(), 2);
    assert_eq!(list.models[0].name, "models/gemini-2.0-flash");
}

#[tokio::test]
async fn list_models_with_wrong_key_returns_400_envelope() {
    let resp = app(KEY)
        .oneshot(get("/v1beta/models?key=wrong"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"]["code"], 400);
    assert_eq!(body["error"]["status"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn list_models_without_key_returns_403() {
    let resp = app(KEY).oneshot(get("/v1beta/models")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"]["status"], "PERMISSION_DENIED");
}

// --- generate content ---

#[tokio::test]
async fn generate_content_echoes_prompt() {
    let resp = app(KEY)
        .oneshot(generate_request(
            "/v1beta/models/gemini-2.0-flash:generateContent",
            Some(KEY),
            PROMPT_BODY,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let out: GenerateContentResponse = body_json(resp).await;
    assert_eq!(out.model_version, "gemini-2.0-flash");
    assert_eq!(out.candidates[0].content.parts[0].text, "echo: Say hello world");
    assert_eq!(out.candidates[0].content.role.as_deref(), Some("model"));
}

#[tokio::test]
async fn generate_content_without_key_returns_403() {
    let resp = app(KEY)
        .oneshot(generate_request(
            "/v1beta/models/gemini-2.0-flash:generateContent",
            None,
            PROMPT_BODY,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn generate_content_with_wrong_key_returns_400() {
    let resp = app(KEY)
        .oneshot(generate_request(
            "/v1beta/models/gemini-2.0-flash:generateContent",
            Some("nope"),
            PROMPT_BODY,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_action_returns_plain_text_404() {
    let resp = app(KEY)
        .oneshot(generate_request(
            "/v1beta/models/gemini-2.0-flash:streamGenerateContent",
            Some(KEY),
            PROMPT_BODY,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let bytes = body_bytes(resp).await;
    assert_eq!(&bytes[..], b"Not Found");
    assert!(serde_json::from_slice::<serde_json::Value>(&bytes).is_err());
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let resp = app(KEY)
        .oneshot(generate_request(
            "/v1beta/models/gemini-2.0-flash:generateContent",
            Some(KEY),
            r#"{"prompt":"hi"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

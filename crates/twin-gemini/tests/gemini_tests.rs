//! GeminiClient against a local fake endpoint

use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use twin_core::{ModelClient, ModelConfig, ModelError};
use twin_gemini::GeminiClient;
use warp::http::StatusCode;
use warp::Filter;

/// What the fake endpoint saw
#[derive(Debug, Default)]
struct Seen {
    path: Option<String>,
    api_key: Option<String>,
    body: Option<Value>,
}

fn config(addr: SocketAddr) -> ModelConfig {
    ModelConfig {
        base_url: format!("http://{addr}/"),
        ..ModelConfig::default()
    }
}

/// Serve `reply` for every generateContent call, recording the request
fn serve(status: StatusCode, reply: Value) -> (SocketAddr, Arc<Mutex<Seen>>) {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let record = Arc::clone(&seen);
    let route = warp::post()
        .and(warp::path!("v1beta" / "models" / String))
        .and(warp::header::<String>("x-goog-api-key"))
        .and(warp::body::json())
        .map(move |path: String, key: String, body: Value| {
            let mut seen = record.lock();
            seen.path = Some(path);
            seen.api_key = Some(key);
            seen.body = Some(body);
            warp::reply::with_status(warp::reply::json(&reply), status)
        });
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    (addr, seen)
}

#[tokio::test]
async fn test_generate_returns_candidate_text() {
    let (addr, seen) = serve(
        StatusCode::OK,
        json!({"candidates": [{"content": {"role": "model", "parts": [{"text": "{\"status\":\"ok\"}"}]}}]}),
    );
    let client = GeminiClient::with_api_key(config(addr), "test-key").unwrap();

    let text = client.generate("Act as a game theory engine").await.unwrap();
    assert_eq!(text, "{\"status\":\"ok\"}");

    let seen = seen.lock();
    assert_eq!(seen.path.as_deref(), Some("gemini-2.5-flash:generateContent"));
    assert_eq!(seen.api_key.as_deref(), Some("test-key"));
    let body = seen.body.as_ref().unwrap();
    assert_eq!(body["contents"][0]["parts"][0]["text"], json!("Act as a game theory engine"));
    assert_eq!(
        body["generationConfig"]["responseMimeType"],
        json!("application/json")
    );
    let temperature = body["generationConfig"]["temperature"].as_f64().unwrap();
    assert!((temperature - 0.8).abs() < 1e-6);
}

#[tokio::test]
async fn test_non_success_status() {
    let (addr, _) = serve(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": {"message": "quota exceeded"}}),
    );
    let client = GeminiClient::with_api_key(config(addr), "test-key").unwrap();

    match client.generate("prompt").await {
        Err(ModelError::Status { code, body }) => {
            assert_eq!(code, 429);
            assert!(body.contains("quota exceeded"));
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_candidates() {
    let (addr, _) = serve(StatusCode::OK, json!({"candidates": []}));
    let client = GeminiClient::with_api_key(config(addr), "test-key").unwrap();

    assert_eq!(
        client.generate("prompt").await.unwrap_err(),
        ModelError::EmptyResponse
    );
}

#[tokio::test]
async fn test_missing_credentials() {
    let model = ModelConfig {
        api_key_env: "TWIN_GEMINI_TEST_KEY_NEVER_SET".to_string(),
        ..ModelConfig::default()
    };
    let client = GeminiClient::from_env(model).unwrap();

    assert_eq!(
        client.generate("prompt").await.unwrap_err(),
        ModelError::MissingCredentials {
            env: "TWIN_GEMINI_TEST_KEY_NEVER_SET".to_string()
        }
    );
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = GeminiClient::with_api_key(config(addr), "test-key").unwrap();

    assert!(matches!(
        client.generate("prompt").await,
        Err(ModelError::Transport(_))
    ));
}

#[test]
fn test_endpoint_trims_trailing_slash() {
    let model = ModelConfig {
        base_url: "https://example.test/".to_string(),
        model_name: "gemini-pro".to_string(),
        ..ModelConfig::default()
    };
    let client = GeminiClient::with_api_key(model, "k").unwrap();
    assert_eq!(
        client.endpoint(),
        "https://example.test/v1beta/models/gemini-pro:generateContent"
    );
}

//! Tests for ChatCompletionsProvider against a local stand-in endpoint

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use pomotask_domain::traits::LlmProvider;
use pomotask_domain::{ChatMessage, CompletionOptions, RawCompletion};
use pomotask_llm::{ChatCompletionsProvider, LlmError};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Seen {
    body: Arc<Mutex<Option<Value>>>,
    auth: Arc<Mutex<Option<String>>>,
}

/// Serve `reply` with `status` on an ephemeral port, returning the endpoint URL
async fn spawn_endpoint(status: StatusCode, reply: Value, seen: Seen) -> String {
    let app = Router::new()
        .route(
            "/v1/chat/completions",
            post(
                move |State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| {
                    let reply = reply.clone();
                    async move {
                        *seen.body.lock().unwrap() = Some(body);
                        *seen.auth.lock().unwrap() = headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        (status, Json(reply)).into_response()
                    }
                },
            ),
        )
        .with_state(seen);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/v1/chat/completions", addr)
}

fn messages() -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("Return ONLY a JSON object."),
        ChatMessage::user("Generate metadata JSON for: \"Gym\""),
    ]
}

#[tokio::test]
async fn test_completion_text_and_request_shape() {
    let seen = Seen::default();
    let url = spawn_endpoint(
        StatusCode::OK,
        json!({"choices": [{"message": {"role": "assistant", "content": "```json\n{\"tm\":\"1h\"}\n```"}}]}),
        seen.clone(),
    )
    .await;

    let provider = ChatCompletionsProvider::new(url, "test-model").with_api_key("hf_test");
    let options = CompletionOptions {
        max_tokens: 64,
        temperature: 0.3,
    };
    let completion = provider.complete(&messages(), &options).await.unwrap();

    assert_eq!(completion.as_text(), Some("```json\n{\"tm\":\"1h\"}\n```"));

    let body = seen.body.lock().unwrap().clone().unwrap();
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["max_tokens"], 64);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(seen.auth.lock().unwrap().as_deref(), Some("Bearer hf_test"));
}

#[tokio::test]
async fn test_empty_choices_are_missing_not_error() {
    let url = spawn_endpoint(StatusCode::OK, json!({"choices": []}), Seen::default()).await;

    let provider = ChatCompletionsProvider::new(url, "test-model");
    let completion = provider
        .complete(&messages(), &CompletionOptions::default())
        .await
        .unwrap();

    assert_eq!(completion, RawCompletion::Missing);
}

#[tokio::test]
async fn test_server_error_is_communication_error() {
    let url = spawn_endpoint(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": "boom"}),
        Seen::default(),
    )
    .await;

    let provider = ChatCompletionsProvider::new(url, "test-model");
    let result = provider
        .complete(&messages(), &CompletionOptions::default())
        .await;

    match result {
        Err(LlmError::Communication(msg)) => assert!(msg.contains("500")),
        other => panic!("Expected Communication error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_and_rate_limit() {
    let url = spawn_endpoint(StatusCode::NOT_FOUND, json!({}), Seen::default()).await;
    let provider = ChatCompletionsProvider::new(url, "ghost-model");
    let result = provider
        .complete(&messages(), &CompletionOptions::default())
        .await;
    assert!(matches!(result, Err(LlmError::ModelNotAvailable(m)) if m == "ghost-model"));

    let url = spawn_endpoint(StatusCode::TOO_MANY_REQUESTS, json!({}), Seen::default()).await;
    let provider = ChatCompletionsProvider::new(url, "busy-model");
    let result = provider
        .complete(&messages(), &CompletionOptions::default())
        .await;
    assert!(matches!(result, Err(LlmError::RateLimitExceeded)));
}

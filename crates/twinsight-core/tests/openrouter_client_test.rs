//! OpenRouterClient against a local chat-completions stub (no external network).
//!
//! Run with: `cargo test -p twinsight_core --test openrouter_client_test`

use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use twinsight_core::{
    AnalysisConfig, AnalysisRequest, AnalysisSource, CompletionClient, JournalAnalyzer, LlmConfig,
    LlmError, OpenRouterClient,
};

type Captured = Arc<Mutex<Vec<(Option<String>, Value)>>>;

async fn spawn_stub(status: StatusCode, reply: Value) -> (String, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&captured);
    let app = Router::new().route(
        "/v1/chat/completions",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let sink = Arc::clone(&sink);
            let reply = reply.clone();
            async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                sink.lock().unwrap().push((auth, body));
                (status, Json(reply))
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}/v1", addr), captured)
}

fn config(api_url: &str) -> LlmConfig {
    LlmConfig::new("test-key")
        .with_api_url(api_url)
        .with_model("test/model")
        .with_timeout(Duration::from_secs(5))
}

fn completion(content: &str) -> Value {
    json!({ "choices": [ { "message": { "role": "assistant", "content": content } } ] })
}

#[tokio::test]
async fn sends_bearer_model_and_budget() {
    let (url, captured) = spawn_stub(StatusCode::OK, completion("merhaba")).await;
    let client = OpenRouterClient::new(config(&url));
    let text = client.complete("istem").await.unwrap();
    assert_eq!(text, "merhaba");

    let calls = captured.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (auth, body) = &calls[0];
    assert_eq!(auth.as_deref(), Some("Bearer test-key"));
    assert_eq!(body["model"], "test/model");
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], "istem");
    assert_eq!(body["max_tokens"], 600);
    let t = body["temperature"].as_f64().unwrap();
    assert!((0.6..=0.7).contains(&t));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let (url, _) = spawn_stub(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "boom"})).await;
    let client = OpenRouterClient::new(config(&url));
    match client.complete("istem").await {
        Err(LlmError::Status { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_completion_is_an_error() {
    let (url, _) = spawn_stub(StatusCode::OK, json!({ "choices": [] })).await;
    let client = OpenRouterClient::new(config(&url));
    assert!(matches!(
        client.complete("istem").await,
        Err(LlmError::EmptyCompletion)
    ));
}

#[tokio::test]
async fn end_to_end_llm_path() {
    let reply = completion(
        "```json\n{\"sentiment\": \"positive\", \"sentimentScore\": 88, \"themes\": [\"Gelecek\"], \
         \"meRatio\": 0.8, \"summary\": \"Hedef odaklı.\", \"feedback\": \"Hedeflerin net.\", \
         \"insights\": [\"Planlı\", \"Kararlı\"]}\n```",
    );
    let (url, _) = spawn_stub(StatusCode::OK, reply).await;
    let analyzer = JournalAnalyzer::new(&AnalysisConfig::with_llm(config(&url)));
    let result = analyzer
        .analyze_entry(&AnalysisRequest::new("Gelecek için hedeflerimi yazdım, çok heyecanlıyım."))
        .await;
    assert_eq!(result.source, AnalysisSource::Llm);
    assert_eq!(result.sentiment_score, 88);
    assert_eq!(result.insights, vec!["Planlı", "Kararlı"]);
}

#[tokio::test]
async fn end_to_end_fallback_on_server_error() {
    let (url, _) = spawn_stub(StatusCode::BAD_GATEWAY, json!({})).await;
    let analyzer = JournalAnalyzer::new(&AnalysisConfig::with_llm(config(&url)));
    let result = analyzer
        .analyze_entry(&AnalysisRequest::new("Gelecek için hedeflerimi yazdım, çok heyecanlıyım."))
        .await;
    assert_eq!(result.source, AnalysisSource::RuleBased);
    assert_eq!(result.themes, vec!["Gelecek"]);
    assert!(!result.feedback.is_empty());
}

#[tokio::test]
async fn unreachable_endpoint_falls_back() {
    // Bind then drop so the port is closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let analyzer = JournalAnalyzer::new(&AnalysisConfig::with_llm(config(&format!(
        "http://{}/v1",
        addr
    ))));
    let result = analyzer
        .analyze_entry(&AnalysisRequest::new("Bugün hava açıktı ve otobüs biraz geç geldi."))
        .await;
    assert_eq!(result.source, AnalysisSource::RuleBased);
    assert_eq!(result.sentiment_score, 50);
}

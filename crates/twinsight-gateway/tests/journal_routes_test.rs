//! Gateway routes exercised in-process with `tower::ServiceExt::oneshot`.
//!
//! Run with: `cargo test -p twinsight-gateway --test journal_routes_test`

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use twinsight_core::{CompletionClient, JournalAnalyzer, LlmError};
use twinsight_gateway::{router, AppState};

struct DownClient;

#[async_trait]
impl CompletionClient for DownClient {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        Err(LlmError::Other("provider unreachable".to_string()))
    }
}

fn app() -> Router {
    router(AppState::new(JournalAnalyzer::rule_based()))
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_ok() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn short_or_missing_content_is_rejected() {
    let (status, body) = post_json(app(), "/api/journal/analyze", json!({"content": "kısa"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Entry too short");

    let (status, _) = post_json(app(), "/api/journal/analyze", json!({"mood": "Mutlu"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analyze_returns_wire_shape() {
    let (status, body) = post_json(
        app(),
        "/api/journal/analyze",
        json!({
            "content": "Ben kendim karar verdim, çok mutlu ve gururluyum.",
            "mood": "Mutlu",
            "moodIcon": "😊",
            "guidedQuestion": "Bugün hangi kararı verdin?",
            "week": 3
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["sentiment"], "Pozitif 😊");
    assert_eq!(body["sentimentScore"], 70);
    assert_eq!(body["themes"], json!(["Karar Alma"]));
    assert_eq!(body["analyzedBy"], "rule_based");
    let me = body["me_ratio"].as_f64().unwrap();
    let we = body["we_ratio"].as_f64().unwrap();
    assert!((me - 2.0 / 3.0).abs() < 1e-9);
    assert!((me + we - 1.0).abs() < 1e-9);
    assert!(!body["feedback"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn provider_outage_is_invisible_to_caller() {
    let app = router(AppState::new(JournalAnalyzer::with_client(
        Arc::new(DownClient),
        Duration::from_secs(2),
    )));
    let (status, body) = post_json(
        app,
        "/api/journal/analyze",
        json!({"content": "Biz ikizimle birlikte ders çalıştık ama sınav zordu.", "week": 2}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analyzedBy"], "rule_based");
    assert_eq!(body["themes"], json!(["Akademik", "İkizlik"]));
}

#[tokio::test]
async fn insights_and_history_over_supplied_records() {
    let now = chrono::Utc::now();
    let entries = json!([
        {
            "text": "Ailemle güzel bir akşam geçirdik, çok mutluyum.",
            "moodIcon": "😊",
            "sentimentScore": 80,
            "meRatio": 0.5,
            "weRatio": 0.5,
            "themes": ["Aile"],
            "timestamp": (now - chrono::Duration::days(1)).to_rfc3339()
        },
        {
            "text": "Sınavdan önce çok kaygılıydım.",
            "moodIcon": "😟",
            "sentimentScore": 40,
            "meRatio": 0.5,
            "weRatio": 0.5,
            "themes": ["Akademik", "Aile"],
            "timestamp": (now - chrono::Duration::days(2)).to_rfc3339()
        }
    ]);

    let (status, body) =
        post_json(app(), "/api/journal/insights", json!({ "entries": entries.clone() })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalEntries"], 2);
    assert_eq!(body["avgSentiment"], 60);
    assert_eq!(body["avgMeRatio"], 50);
    assert_eq!(body["topThemes"], json!(["Aile", "Akademik"]));
    assert!(body["summary"]
        .as_str()
        .unwrap()
        .ends_with("Bu hafta 2 günlük yazısı yazdın!"));

    let (status, body) = post_json(app(), "/api/journal/history", json!({ "entries": entries })).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["entries"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["mood"], "😊");
    assert_eq!(rows[0]["sentiment"], "Pozitif");
    assert_eq!(rows[1]["sentiment"], "Negatif");
}

#[tokio::test]
async fn empty_insights_message() {
    let (status, body) = post_json(app(), "/api/journal/insights", json!({ "entries": [] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"totalEntries": 0, "message": "Henüz yeterli veri yok"}));
}

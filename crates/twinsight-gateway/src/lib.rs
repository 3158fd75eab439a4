//! Twinsight Gateway — HTTP surface for journal analysis.
//! Input validation lives here; the core assumes well-formed requests and never fails.
//! Authentication and persistence are handled by the surrounding platform.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use twinsight_core::{
    history, insights::HISTORY_LIMIT, weekly_insights, AnalysisRequest, AnalysisResult,
    JournalAnalyzer, JournalRecord, MIN_ENTRY_CHARS,
};

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<JournalAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: JournalAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}

/// Journal form payload. `content` is optional here so a missing field is a 400, not a 422.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeBody {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    mood: Option<String>,
    #[serde(default)]
    mood_icon: Option<String>,
    #[serde(default)]
    guided_question: Option<String>,
    #[serde(default)]
    week: Option<i64>,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    success: bool,
    #[serde(flatten)]
    analysis: AnalysisResult,
}

#[derive(Debug, Deserialize)]
struct EntriesBody {
    #[serde(default)]
    entries: Vec<JournalRecord>,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/journal/analyze", post(analyze_handler))
        .route("/api/journal/insights", post(insights_handler))
        .route("/api/journal/history", post(history_handler))
        .with_state(state)
        .layer(axum::middleware::from_fn(log_request))
}

async fn log_request(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();
    let response = next.run(request).await;
    tracing::info!(
        target: "twinsight::gateway",
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request served"
    );
    response
}

async fn health() -> &'static str {
    "OK"
}

/// POST /api/journal/analyze: validate, analyze (LLM or rule-based), return the analysis.
async fn analyze_handler(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let content = body.content.unwrap_or_default();
    if content.trim().chars().count() < MIN_ENTRY_CHARS {
        return Err(bad_request("Entry too short"));
    }

    let request = AnalysisRequest {
        text: content,
        mood: body.mood,
        mood_icon: body.mood_icon,
        guided_question: body.guided_question,
        week: body.week,
    };
    let analysis = state.analyzer.analyze_entry(&request).await;
    Ok(Json(AnalyzeResponse {
        success: true,
        analysis,
    }))
}

/// POST /api/journal/insights: weekly digest over records supplied by the persistence layer.
async fn insights_handler(Json(body): Json<EntriesBody>) -> Json<twinsight_core::WeeklyInsights> {
    Json(weekly_insights(&body.entries, chrono::Utc::now()))
}

/// POST /api/journal/history: newest-first previews, capped at 30.
async fn history_handler(Json(body): Json<EntriesBody>) -> Json<serde_json::Value> {
    let entries = history(&body.entries, HISTORY_LIMIT);
    Json(serde_json::json!({ "entries": entries }))
}

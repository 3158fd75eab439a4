//! Twinsight Gateway — journal analysis at 127.0.0.1:8000 (override with TWINSIGHT_BIND).
//! LLM credentials come from `.env` / environment, or a TOML file named by TWINSIGHT_CONFIG.

use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use twinsight_core::{AnalysisConfig, JournalAnalyzer};
use twinsight_gateway::{router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::var("TWINSIGHT_CONFIG") {
        Ok(path) if !path.trim().is_empty() => {
            AnalysisConfig::load_from_path(&PathBuf::from(path.trim()))?
        }
        _ => AnalysisConfig::from_env(),
    };

    let analyzer = JournalAnalyzer::new(&config);
    tracing::info!(
        target: "twinsight::gateway",
        version = twinsight_core::version(),
        llm_enabled = analyzer.llm_enabled(),
        model = config.llm.as_ref().map(|l| l.model.as_str()).unwrap_or("-"),
        "journal analysis ready"
    );

    let bind = std::env::var("TWINSIGHT_BIND").unwrap_or_else(|_| "127.0.0.1:8000".into());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(target: "twinsight::gateway", addr = %bind, "listening");

    axum::serve(listener, router(AppState::new(analyzer))).await?;
    Ok(())
}

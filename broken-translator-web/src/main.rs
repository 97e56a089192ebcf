use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use clap::{Arg, Command};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use broken_translator::logging;
use broken_translator::{
    ChainError, ChainRun, ChainRunner, Comparison, LanguageStep, TranslatorConfig,
};

#[derive(Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct TranslateResponse {
    pub run: ChainRun,
    pub comparison: Comparison,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainResponse {
    pub steps: Vec<LanguageStep>,
    pub uses_mock: bool,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<ChainRunner>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/chain", get(get_chain))
        .route("/api/translate", post(translate_text))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("broken-translator-web")
        .version(env!("CARGO_PKG_VERSION"))
        .about("JSON API for the broken translator")
        .arg(
            Arg::new("addr")
                .long("addr")
                .short('a')
                .help("Address to listen on")
                .default_value("127.0.0.1:3000"),
        )
        .get_matches();

    dotenvy::dotenv().ok();
    let config = TranslatorConfig::load()?;
    logging::init(&config.log_level, config.log_format);

    let runner = ChainRunner::from_config(&config)
        .map_err(|e| format!("Failed to initialize translation chain: {}", e))?;
    if runner.uses_mock() {
        warn!("No Google Translate API key configured, serving mock translations");
    }

    let state = AppState {
        runner: Arc::new(runner),
    };

    let addr = matches
        .get_one::<String>("addr")
        .map(String::as_str)
        .unwrap_or("127.0.0.1:3000");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 Server running at http://{}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}

/// Client-facing failure text; backend details stay in the server log
fn public_error_message(err: &ChainError) -> String {
    match err {
        ChainError::Backend {
            step,
            source_code,
            target_code,
            ..
        } => format!(
            "Translation service error at step {} ({} → {})",
            step, source_code, target_code
        ),
        _ => "Translation service error".to_string(),
    }
}

async fn get_chain(State(state): State<AppState>) -> Json<ChainResponse> {
    Json(ChainResponse {
        steps: state.runner.chain().steps().to_vec(),
        uses_mock: state.runner.uses_mock(),
    })
}

async fn translate_text(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Text must not be empty"));
    }

    info!(chars = text.chars().count(), "Running translation chain");

    let run = state.runner.run(text).await.map_err(|e| {
        warn!(error = %e, "Translation chain failed");
        api_error(StatusCode::BAD_GATEWAY, public_error_message(&e))
    })?;

    let comparison = run.comparison();
    info!(
        brokenness = comparison.brokenness,
        used_mock = run.used_mock,
        "Translation chain finished"
    );

    Ok(Json(TranslateResponse { run, comparison }))
}

//! Route definitions for the SafeScan web service.
//!
//! One page, one state, four endpoints: submit text for analysis, read the
//! current slot, reset it, and a health check. All classification happens
//! server-side; the page only displays the views served here.

use crate::state::{AnalysisSlot, AnalysisState};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use safescan_analysis::{Analyzer, GaugeView, ReportView};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The only failure text a user ever sees. Detail goes to the logs.
pub const USER_ERROR_MESSAGE: &str =
    "Unable to analyze content. Please try again or check your connection.";

static INDEX_HTML: &str = include_str!("../assets/index.html");

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub slot: Arc<AnalysisSlot>,
    pub analyzer: Arc<dyn Analyzer>,
}

/// Analyze request body.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub service: String,
}

/// View of the analysis slot served to the page. On success it carries the
/// raw result plus the derived report and gauge, so the page never
/// re-implements any classification rule.
#[derive(Debug, Serialize)]
pub struct StateView {
    #[serde(flatten)]
    pub state: AnalysisState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gauge: Option<GaugeView>,
}

impl StateView {
    /// Derive the presentation views where the state carries a result.
    pub fn of(state: AnalysisState) -> Self {
        let (report, gauge) = match &state {
            AnalysisState::Success { result, .. } => (
                Some(ReportView::of(result)),
                Some(GaugeView::of(result.trust_score)),
            ),
            _ => (None, None),
        };

        Self {
            state,
            report,
            gauge,
        }
    }
}

/// Build the API routes.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/analyze", post(analyze_handler))
        .route("/api/v1/state", get(state_handler))
        .route("/api/v1/reset", post(reset_handler))
        .with_state(state)
}

/// Build the page route.
pub fn page_routes() -> Router {
    Router::new().route("/", get(index_handler))
}

/// Build health check routes.
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/health", get(health_handler))
}

// ─────────────────────────────────────────────────────────────────────────────
// Analysis Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Submit text for analysis.
///
/// Blank input is a no-op: nothing is sent to the model and the slot does
/// not change. A submission while another request is in flight is rejected;
/// nothing is queued. The analyzer call itself runs inside this handler, so
/// exactly one outbound call happens per accepted submission.
async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<StateView>, (StatusCode, Json<ErrorResponse>)> {
    if request.text.trim().is_empty() {
        return Ok(Json(StateView::of(state.slot.snapshot().await)));
    }

    if !state.slot.begin(request.text.clone()).await {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "An analysis is already in progress".into(),
                code: "ANALYSIS_IN_FLIGHT".into(),
            }),
        ));
    }

    match state.analyzer.analyze(&request.text).await {
        Ok(result) => {
            tracing::info!(
                trust_score = result.trust_score,
                risk_label = result.risk_label.as_str(),
                "Analysis complete"
            );
            state.slot.complete(result).await;
        }
        Err(e) => {
            tracing::error!(error = %e, "Analysis failed");
            state.slot.fail(USER_ERROR_MESSAGE).await;
        }
    }

    Ok(Json(StateView::of(state.slot.snapshot().await)))
}

/// Read the current slot.
async fn state_handler(State(state): State<AppState>) -> Json<StateView> {
    Json(StateView::of(state.slot.snapshot().await))
}

/// Discard the current input, result, and error.
async fn reset_handler(State(state): State<AppState>) -> Json<StateView> {
    state.slot.reset().await;
    Json(StateView::of(AnalysisState::Idle))
}

// ─────────────────────────────────────────────────────────────────────────────
// Page & Health Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Serve the embedded single-page UI.
async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check handler.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        service: "safescan-web".into(),
    })
}

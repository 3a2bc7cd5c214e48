//! SafeScan Web - the analysis form, API, and result page.
//!
//! This crate provides the single user-facing surface of SafeScan:
//! - `GET /` serves the embedded page (text box, submit, reset, about panel)
//! - `POST /api/v1/analyze` runs one model call and stores the outcome
//! - `GET /api/v1/state` / `POST /api/v1/reset` expose the single-slot state
//!
//! ## Architecture
//!
//! ```text
//! Browser → routes (blank-input guard → busy gate) → Analyzer → slot
//!                                                                ↓
//!                                              StateView (report + gauge)
//! ```

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod routes;
pub mod state;

pub use routes::{AppState, ErrorResponse, StateView, USER_ERROR_MESSAGE};
pub use state::{AnalysisSlot, AnalysisState};

use axum::Router;
use safescan_analysis::{Analyzer, GeminiAnalyzer};
use safescan_common::Config;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Build the web router with all routes and middleware.
pub fn build_router(analyzer: Arc<dyn Analyzer>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app_state = AppState {
        slot: Arc::new(AnalysisSlot::new()),
        analyzer,
    };

    Router::new()
        .merge(routes::page_routes())
        .merge(routes::api_routes(app_state))
        .merge(routes::health_routes())
        .layer(cors)
}

/// Start the web server.
///
/// Construction of the analyzer fails fast when no credential is
/// configured, before the listener is bound.
pub async fn start_server(config: &Config) -> anyhow::Result<()> {
    let analyzer = GeminiAnalyzer::from_config(config)?;

    let addr = SocketAddr::from((
        config.bind_address().parse::<std::net::IpAddr>()?,
        config.web_port(),
    ));

    let router = build_router(Arc::new(analyzer));

    tracing::info!("Starting SafeScan web service on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

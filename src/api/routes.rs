use axum::{
    routing::{get, post},
    Router,
    extract::{Json, Query, State},
    http::StatusCode,
};
use tower_http::cors::{CorsLayer, Any};
use std::time::Instant;
use tracing::{info, warn};

use crate::api::models::{HealthResponse, LookupQuery, SummarizeRequest, SummaryResponse};
use crate::api::response::{self, Reply};
use crate::error::AppError;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/summarize", post(summarize_handler))
        .route("/api/summaries", get(lookup_handler))
        .route("/api/health", get(health_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn summarize_handler(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> Reply<SummaryResponse> {
    info!(url = %req.url, "Processing summarize request");
    let start_time = Instant::now();

    let result = tokio::time::timeout(
        state.config.request_timeout,
        state.pipeline.summarize_url(&req.url),
    )
    .await;

    let elapsed = start_time.elapsed();
    info!(url = %req.url, ?elapsed, "Request processing finished");

    match result {
        Ok(Ok(outcome)) => {
            let message = outcome
                .is_cached()
                .then(|| "Served from stored summary".to_string());
            response::success(SummaryResponse::from(outcome), message)
        }
        Ok(Err(err)) => {
            warn!(url = %req.url, error = %err, "Summarize request failed");
            response::from_error(&err)
        }
        Err(_) => {
            warn!(url = %req.url, ?elapsed, "Request timed out");
            response::error(
                StatusCode::REQUEST_TIMEOUT,
                "Request processing timed out".to_string(),
            )
        }
    }
}

async fn lookup_handler(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Reply<SummaryResponse> {
    match state.pipeline.lookup(&query.url).await {
        Ok(Some(record)) => response::success(SummaryResponse::from_record(record, true), None),
        Ok(None) => response::from_error(&AppError::NotFound(format!(
            "No summary stored for {}",
            query.url
        ))),
        Err(err) => {
            warn!(url = %query.url, error = %err, "Lookup failed");
            response::from_error(&err)
        }
    }
}

async fn health_handler(State(state): State<AppState>) -> Reply<HealthResponse> {
    match state.pipeline.stored_count().await {
        Ok(stored_summaries) => response::success(
            HealthResponse {
                status: "ok".to_string(),
                stored_summaries,
            },
            None,
        ),
        Err(err) => response::from_error(&err),
    }
}

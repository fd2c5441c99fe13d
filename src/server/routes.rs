use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::context::AppContext;
use crate::domain::ticket::CreatedTicket;
use crate::error::AppError;
use crate::workflow::tickets::process_raw_text;

#[derive(Debug, Serialize, Deserialize)]
pub struct RawTextRequest {
    pub raw_text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// POST /process-tasks - turn raw text into Jira tickets
async fn process_tasks(
    State(ctx): State<AppContext>,
    Json(request): Json<RawTextRequest>,
) -> Result<Json<Vec<CreatedTicket>>, AppError> {
    info!(chars = request.raw_text.chars().count(), "processing raw text");

    match process_raw_text(&ctx, &request.raw_text).await {
        Ok(created) => Ok(Json(created)),
        Err(err) => {
            error!(status = %err.status_code(), "failed to process raw text: {err}");
            Err(err)
        }
    }
}

/// GET /health - liveness probe
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/process-tasks", post(process_tasks))
        .route("/process-tasks/", post(process_tasks))
        .route("/health", get(health))
        .with_state(ctx)
}

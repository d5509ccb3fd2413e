use axum::extract::{Path, State};
use axum::Json;
use sdlc_guide_core::catalog::{Stage, StageSummary};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/stages: one summary per stage in lifecycle order.
pub async fn list_stages(State(app): State<AppState>) -> Json<Vec<StageSummary>> {
    Json(app.catalog.summaries())
}

/// GET /api/stages/{key}: the full stage entry.
pub async fn get_stage(
    State(app): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Stage>, AppError> {
    let stage = app.catalog.lookup(&key)?;
    Ok(Json(stage.clone()))
}

/// GET /api/stages/{key}/prompts/{index}: a single prompt template.
pub async fn get_prompt(
    State(app): State<AppState>,
    Path((key, index)): Path<(String, usize)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let stage = app.catalog.lookup(&key)?;
    let prompt = stage.prompt(index)?;
    Ok(Json(serde_json::json!({
        "stage": stage.key,
        "index": index,
        "count": stage.prompts.len(),
        "prompt": prompt,
    })))
}

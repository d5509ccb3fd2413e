use axum::extract::State;
use axum::Json;
use sdlc_guide_core::config::Config;

use crate::state::AppState;

/// GET /api/config: the effective configuration the server was started with.
///
/// Read-only. Edit `.sdlc-guide/config.yaml` and restart to change it.
pub async fn get_config(State(app): State<AppState>) -> Json<Config> {
    Json(app.config.as_ref().clone())
}

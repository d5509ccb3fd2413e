use axum::extract::State;
use axum::response::Html;

use crate::state::AppState;

/// GET /: the prerendered guide page.
pub async fn index(State(app): State<AppState>) -> Html<String> {
    Html(app.page.to_string())
}

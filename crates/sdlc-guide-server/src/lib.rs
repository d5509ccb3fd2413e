pub mod embed;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all routes and middleware.
/// Used by `serve_on()` and available for integration testing.
pub fn build_router(app_state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::page::index))
        // Stages
        .route("/api/stages", get(routes::stages::list_stages))
        .route("/api/stages/{key}", get(routes::stages::get_stage))
        .route(
            "/api/stages/{key}/prompts/{index}",
            get(routes::stages::get_prompt),
        )
        // Config
        .route("/api/config", get(routes::config::get_config))
        .fallback(embed::static_handler)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the guide server for the project at `root` on a listener the caller
/// has already bound, so the caller can report the port (or let the OS pick
/// one with port 0) before the server starts.
pub async fn serve_on(
    root: PathBuf,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app_state = state::AppState::load(&root)?;
    tracing::info!(stages = app_state.catalog.len(), "stage table loaded");
    let app = build_router(app_state);

    let url = format!("http://localhost:{actual_port}");
    tracing::info!("guide server listening on {url}");

    if open_browser {
        if let Err(e) = open::that(&url) {
            tracing::warn!(error = %e, "failed to open browser");
        }
    }

    axum::serve(listener, app).await?;
    Ok(())
}

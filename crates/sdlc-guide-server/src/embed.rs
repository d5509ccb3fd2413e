use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;

/// URL prefix the embedded assets are served under.
pub const ASSET_PREFIX: &str = "assets/";

#[derive(Embed)]
#[folder = "assets/"]
struct GuideAssets;

/// Serve embedded assets under `/assets/`. Anything else is a 404.
pub async fn static_handler(uri: axum::http::Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    let asset = path
        .strip_prefix(ASSET_PREFIX)
        .and_then(|name| <GuideAssets as Embed>::get(name).map(|content| (name, content)));

    match asset {
        Some((name, content)) => {
            let mime = mime_guess::from_path(name).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.to_vec(),
            )
                .into_response()
        }
        None => {
            tracing::debug!(path, "no such asset");
            (StatusCode::NOT_FOUND, "not found").into_response()
        }
    }
}

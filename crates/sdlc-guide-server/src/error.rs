use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sdlc_guide_core::GuideError;

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.0.downcast_ref::<GuideError>() {
            Some(GuideError::UnknownStage(_) | GuideError::PromptOutOfRange { .. }) => {
                StatusCode::NOT_FOUND
            }
            Some(
                GuideError::EmptyPrompts(_)
                | GuideError::DataNotFound(_)
                | GuideError::Io(_)
                | GuideError::Yaml(_),
            )
            | None => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %format!("{:#}", self.0), "request failed");
        }

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

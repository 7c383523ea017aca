use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Todo {0} not found")]
    NotFound(u64),
    #[error("no todo id left after {0}")]
    IdsExhausted(u64),
    #[error("data file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("data file is not a valid todo list: {0}")]
    Data(#[from] serde_json::Error),
    #[error("form misuse: {0}")]
    Form(#[from] shared::FormError),
    #[error("page rendering failed: {0}")]
    Render(#[from] frontend::RenderError),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::IdsExhausted(_)
            | AppError::Io(_)
            | AppError::Data(_)
            | AppError::Form(_)
            | AppError::Render(_) => {
                error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Html(format!(
            "<!DOCTYPE html><html><body><h1>{}</h1><p>{}</p><a href=\"/\">Back to list</a></body></html>",
            status, message
        ));
        (status, body).into_response()
    }
}

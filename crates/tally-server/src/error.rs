//! Error types for the Tally HTTP layer.
//!
//! [`ServerError`] translates core rejections and request decoding failures
//! into HTTP responses via its [`IntoResponse`] implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tally_core::MenuError;

/// Errors returned by request handlers.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The menu store rejected the update.
    #[error(transparent)]
    Menu(#[from] MenuError),

    /// The request body could not be decoded.
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl ServerError {
    /// HTTP status the error is reported with.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Menu(MenuError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Menu(
                MenuError::InvalidPayload(_)
                | MenuError::AlreadyExists(_)
                | MenuError::UnknownAction(_),
            )
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

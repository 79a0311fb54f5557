use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application error, tagged by recovery semantics.
///
/// Every variant maps to a stable status code; the response body carries the
/// message, an optional list of field-level details, and (for internal errors
/// in debug builds) the underlying error chain.
#[derive(Debug)]
pub enum AppError {
    /// Bad input shape. The caller can recover by correcting the request.
    Validation { message: String, details: Vec<String> },
    /// Missing, invalid, or expired credential. The caller must re-present
    /// a credential or log in again.
    Unauthorized(String),
    /// Session fully expired. Stronger than `Unauthorized`: the caller must
    /// log in again, and any session cookies are cleared alongside.
    Forbidden(String),
    /// Referenced entity is absent.
    NotFound(String),
    /// A unique field (username, email) is already taken.
    Conflict(String),
    /// Unexpected or downstream failure.
    Internal(Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>, details: Vec<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::Internal(err.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::Unauthorized(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Conflict(message) => message.clone(),
            Self::Internal(_) => "Internal Server Error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let details = match &self {
            Self::Validation { details, .. } => details.clone(),
            _ => Vec::new(),
        };

        let mut body = json!({
            "success": false,
            "message": self.message(),
            "errors": details,
            "data": null,
        });

        // Error chains are only exposed in debug builds.
        if cfg!(debug_assertions) {
            if let Self::Internal(err) = &self {
                body["stack"] = json!(format!("{:?}", err));
            }
        }

        (self.status_code(), Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

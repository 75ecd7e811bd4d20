use crate::repositories::RepositoryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Type alias for Result with our AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// JSON body returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub details: String,
}

impl ErrorMessage {
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            details: details.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid request body")]
    InvalidBody,

    #[error("invalid uri, expecting id")]
    InvalidPath,

    #[error("no user with id {0:?} exists")]
    UserNotFound(String),

    /// Any repository failure other than a missing row. `action` is the
    /// client-facing message; `source` is only logged.
    #[error("{action}")]
    Store {
        action: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl AppError {
    pub fn store(action: &'static str, source: RepositoryError) -> Self {
        AppError::Store { action, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidBody | AppError::InvalidPath => StatusCode::BAD_REQUEST,
            AppError::UserNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Store { action, source } = &self {
            tracing::error!("{}: {}", action, source);
        }

        let status = self.status();
        (status, Json(ErrorMessage::new(self.to_string()))).into_response()
    }
}

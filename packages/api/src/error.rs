use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use osaka_kenpo_corpus::CorpusError;
use serde::Serialize;
use thiserror::Error;

/// Failure of a [`LawStore`](crate::store::LawStore) read or of the import.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error("law not found: {0}")]
    LawNotFound(String),
}

impl StoreError {
    /// Whether the error means the store could not be reached or queried,
    /// as opposed to bad content or bad input.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Failure of a `kenpo` command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("{failed} of {checked} documents failed validation")]
    ValidationFailed { failed: usize, checked: usize },
}

/// Request-level error, rendered as `{"error": message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message.clone()),
            Self::Internal(_) => {
                tracing::error!(error = %self, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Corpus(CorpusError::InvalidIdentifier(id)) => {
                Self::BadRequest(format!("Invalid parameter: {id}"))
            }
            StoreError::LawNotFound(law) => Self::NotFound(format!("Law {law} not found")),
            other => Self::Internal(other.to_string()),
        }
    }
}

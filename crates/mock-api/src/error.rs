use fandraft_sdk::api::ErrorBody;
use poem::{error::ResponseError, http::StatusCode, web::Json, IntoResponse, Response};

/// Storage error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A writer panicked while holding the storage lock.
    #[error("storage lock poisoned")]
    Poisoned,
    /// IO error.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by the handlers, rendered as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400.
    #[error("{0}")]
    BadRequest(&'static str),
    /// 404.
    #[error("{0}")]
    NotFound(&'static str),
    /// 500.
    #[error("{0}")]
    Internal(&'static str),
}

impl ResponseError for ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn as_response(&self) -> Response {
        Json(ErrorBody {
            error: self.to_string(),
        })
        .with_status(self.status())
        .into_response()
    }
}

/// Handler result.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

pub(crate) trait StorageResultExt<T> {
    /// Log a storage failure and turn it into a 500 with `message`.
    fn or_internal(self, message: &'static str) -> ApiResult<T>;
}

impl<T> StorageResultExt<T> for crate::Result<T> {
    fn or_internal(self, message: &'static str) -> ApiResult<T> {
        self.map_err(|err| {
            tracing::error!(%err, "{message}");
            ApiError::Internal(message)
        })
    }
}

use axum::{http::StatusCode, response::IntoResponse};
use tracing::error;

use crate::codec::CodecError;

/// Failures crossing the API boundary are rendered as a status code plus a
/// plain human-readable message, never as a crash or a structured code.
pub enum ApiError {
    ClientError(String),
    ServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status_code, message) = match self {
            ApiError::ClientError(message) => {
                (StatusCode::BAD_REQUEST, message)
            }
            ApiError::ServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status_code, message).into_response()
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;

impl From<huggingface::error::Error> for ApiError {
    fn from(e: huggingface::error::Error) -> Self {
        use huggingface::error::Error;

        match &e {
            Error::InvalidInput => ApiError::ClientError(e.to_string()),
            Error::MissingCredential | Error::RequestFailed { .. } => {
                error!("{:?}", e);
                ApiError::ServerError(e.to_string())
            }
        }
    }
}

impl From<CodecError> for ApiError {
    fn from(e: CodecError) -> Self {
        match &e {
            CodecError::UnsupportedFormat(_) => {
                ApiError::ClientError(e.to_string())
            }
            CodecError::Decode(_) | CodecError::Encode(_) => {
                error!("{:?}", e);
                ApiError::ServerError(e.to_string())
            }
        }
    }
}

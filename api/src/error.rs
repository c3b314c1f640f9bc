use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

/// Domain errors that know which HTTP status they map to.
pub trait ApiRequestError: std::error::Error {
    fn status_code(&self) -> StatusCode;
}

#[derive(Debug)]
pub enum AppError {
    /// A classified request failure carrying the status of its response.
    /// The message is surfaced verbatim to the client.
    Api {
        message: String,
        status: StatusCode,
    },
    Database(diesel::result::Error),
    Pool(diesel_async::pooled_connection::deadpool::PoolError),
    Unhandled(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Api { message, status } => (status, message),
            AppError::Database(e) => {
                tracing::error!("database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
            AppError::Pool(e) => {
                tracing::error!("connection pool error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
            AppError::Unhandled(message) => {
                tracing::error!("unhandled error: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl AppError {
    /// Lifts a domain error into a response-ready failure.
    pub fn request<E: ApiRequestError>(e: E) -> Self {
        AppError::Api {
            message: e.to_string(),
            status: e.status_code(),
        }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(e: diesel::result::Error) -> Self {
        AppError::Database(e)
    }
}

impl From<diesel_async::pooled_connection::deadpool::PoolError> for AppError {
    fn from(e: diesel_async::pooled_connection::deadpool::PoolError) -> Self {
        AppError::Pool(e)
    }
}

impl From<(&'static str, StatusCode)> for AppError {
    fn from((message, status): (&'static str, StatusCode)) -> Self {
        AppError::Api {
            message: message.into(),
            status,
        }
    }
}

impl From<(String, StatusCode)> for AppError {
    fn from((message, status): (String, StatusCode)) -> Self {
        AppError::Api { message, status }
    }
}

impl From<&'static str> for AppError {
    fn from(e: &'static str) -> Self {
        AppError::Unhandled(e.into())
    }
}

impl From<String> for AppError {
    fn from(e: String) -> Self {
        AppError::Unhandled(e)
    }
}

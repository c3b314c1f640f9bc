use axum::http::StatusCode;

use crate::error::{ApiRequestError, AppError};

pub mod calc;
pub mod comment;
pub mod models;
pub mod routes;
pub mod store;
pub mod visibility;

/// Failures of the comment subsystem. Messages are surfaced verbatim to
/// the client, so they are phrased for end users.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ThreadError {
    #[error("Missing required fields: value, operation")]
    MissingRequiredFields,

    #[error("Comment ID is required")]
    CommentIdRequired,

    #[error("Invalid operation")]
    InvalidOperation,

    #[error("Operation resulted in an invalid value (Infinity or NaN)")]
    InvalidResult,

    #[error("Parent comment not found")]
    ParentNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    #[error("You are not the owner of this comment")]
    NotCommentOwner,

    #[error("Comment could not be deleted")]
    UpdateLost,
}

impl ApiRequestError for ThreadError {
    fn status_code(&self) -> StatusCode {
        match self {
            ThreadError::MissingRequiredFields
            | ThreadError::CommentIdRequired
            | ThreadError::InvalidOperation
            | ThreadError::InvalidResult => StatusCode::BAD_REQUEST,
            ThreadError::ParentNotFound | ThreadError::CommentNotFound => StatusCode::NOT_FOUND,
            ThreadError::NotCommentOwner => StatusCode::FORBIDDEN,
            ThreadError::UpdateLost => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ThreadError> for AppError {
    fn from(e: ThreadError) -> Self {
        AppError::request(e)
    }
}

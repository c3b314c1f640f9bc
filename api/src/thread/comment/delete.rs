use axum::{
    Json, debug_handler,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    App,
    error::AppError,
    identity::AuthUser,
    thread::{ThreadError, models::comment::Comment, store},
};

#[derive(Deserialize)]
pub struct DeleteParams {
    id: Option<String>,
}

#[debug_handler]
pub async fn delete_comment(
    State(ctx): State<App>,
    Query(params): Query<DeleteParams>,
    AuthUser(requester): AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = require_id(params.id.as_deref())?;

    let mut conn = ctx.diesel.get().await?;

    let comment = store::find_live_by_id(&mut conn, id).await?;
    authorize_delete(comment.as_ref(), &requester.id)?;

    // Conditional on the row still being live; the loser of a concurrent
    // delete observes no modification and must report it.
    if !store::soft_delete(&mut conn, id).await? {
        return Err(ThreadError::UpdateLost)?;
    }

    Ok(Json(serde_json::json!({ "message": "Comment deleted" })))
}

fn require_id(id: Option<&str>) -> Result<&str, ThreadError> {
    match id.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ThreadError::CommentIdRequired),
    }
}

/// Decides whether `requester_id` may delete the looked-up comment. The
/// live lookup excludes comments deleted earlier, so `None` covers both a
/// never-existing id and a repeated delete, and both report not-found
/// rather than succeeding twice.
fn authorize_delete(candidate: Option<&Comment>, requester_id: &str) -> Result<(), ThreadError> {
    let comment = candidate.ok_or(ThreadError::CommentNotFound)?;

    if comment.author_id != requester_id {
        return Err(ThreadError::NotCommentOwner);
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn comment(author_id: &str) -> Comment {
        let now = chrono::Utc::now().naive_utc();
        Comment {
            id: "c-1".into(),
            author_id: author_id.into(),
            author_username: "alice".into(),
            parent_id: None,
            path: String::new(),
            value: 10.0,
            operation: "add".into(),
            result: 10.0,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn blank_or_missing_ids_are_rejected() {
        assert_eq!(require_id(None).unwrap_err(), ThreadError::CommentIdRequired);
        assert_eq!(require_id(Some("")).unwrap_err(), ThreadError::CommentIdRequired);
        assert_eq!(
            require_id(Some("   ")).unwrap_err(),
            ThreadError::CommentIdRequired
        );

        assert_eq!(require_id(Some(" c-1 ")).unwrap(), "c-1");
    }

    #[test]
    fn missing_comment_reports_not_found() {
        // Also the repeated-delete case: the first delete removes the row
        // from the live lookup, so the second sees `None`.
        assert_eq!(
            authorize_delete(None, "user-1").unwrap_err(),
            ThreadError::CommentNotFound
        );
    }

    #[test]
    fn only_the_author_may_delete() {
        let c = comment("user-1");

        assert_eq!(
            authorize_delete(Some(&c), "user-2").unwrap_err(),
            ThreadError::NotCommentOwner
        );
        assert_eq!(authorize_delete(Some(&c), "user-1"), Ok(()));
    }
}

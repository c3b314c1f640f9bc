use axum::{Json, debug_handler, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::{
    App,
    error::AppError,
    identity::{AuthUser, models::user::User},
    thread::{
        ThreadError,
        calc::{Operation, derive_result},
        models::comment::{Comment, NewComment},
        store,
    },
};

#[derive(Deserialize)]
pub struct CommentSubmission {
    value: Option<f64>,
    operation: Option<String>,

    #[serde(rename = "parentId", alias = "parent_id")]
    parent_id: Option<String>,
}

#[debug_handler]
pub async fn create_comment(
    State(ctx): State<App>,
    AuthUser(author): AuthUser,
    crate::json::Json(submission): crate::json::Json<CommentSubmission>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let (value, operation) = match (submission.value, submission.operation.as_deref()) {
        (Some(value), Some(operation)) => (value, operation.parse::<Operation>()?),
        _ => return Err(ThreadError::MissingRequiredFields)?,
    };

    let mut conn = ctx.diesel.get().await?;

    let parent = match submission.parent_id.as_deref() {
        Some(parent_id) => Some(
            store::find_live_by_id(&mut conn, parent_id)
                .await?
                .ok_or(ThreadError::ParentNotFound)?,
        ),
        None => None,
    };

    // All validation happens in the builder; nothing is persisted unless
    // it succeeds.
    let new_comment = build_comment(&author, parent.as_ref(), value, operation)?;
    let comment = store::insert(&mut conn, &new_comment).await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Builds the record for a new comment: its position in the tree below the
/// parent and its result derived from the parent's. Creation only reads
/// the parent, and results are immutable once stored, so the parent
/// snapshot can never be stale.
fn build_comment(
    author: &User,
    parent: Option<&Comment>,
    value: f64,
    operation: Operation,
) -> Result<NewComment, ThreadError> {
    let (path, parent_result) = match parent {
        Some(parent) => (parent.full_path(), Some(parent.result)),
        None => (String::new(), None),
    };

    let result = derive_result(operation, parent_result, value)?;

    let now = chrono::Utc::now().naive_utc();

    Ok(NewComment {
        id: uuid::Uuid::new_v4().to_string(),
        author_id: author.id.clone(),
        author_username: author.username.clone(),
        parent_id: parent.map(|p| p.id.clone()),
        path,
        value,
        operation: operation.as_str().to_owned(),
        result,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn author() -> User {
        let now = chrono::Utc::now().naive_utc();
        User {
            id: "user-1".into(),
            username: "alice".into(),
            password_hash: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn stored(new: NewComment) -> Comment {
        Comment {
            id: new.id,
            author_id: new.author_id,
            author_username: new.author_username,
            parent_id: new.parent_id,
            path: new.path,
            value: new.value,
            operation: new.operation,
            result: new.result,
            is_deleted: new.is_deleted,
            created_at: new.created_at,
            updated_at: new.updated_at,
        }
    }

    #[test]
    fn root_comment_has_empty_path_and_its_own_value() {
        let c = build_comment(&author(), None, 10.0, Operation::Add).unwrap();

        assert_eq!(c.path, "");
        assert_eq!(c.result, 10.0);
        assert_eq!(c.parent_id, None);
        assert!(!c.is_deleted);
        assert_eq!(c.author_username, "alice");
    }

    #[test]
    fn reply_path_is_the_parents_full_path() {
        let root = stored(build_comment(&author(), None, 10.0, Operation::Add).unwrap());
        let child = stored(build_comment(&author(), Some(&root), 5.0, Operation::Subtract).unwrap());

        // root.path is empty, so the child's path is just the root's id
        assert_eq!(child.path, root.id);
        assert_eq!(child.result, 5.0);
        assert_eq!(child.parent_id.as_deref(), Some(root.id.as_str()));

        let grandchild =
            stored(build_comment(&author(), Some(&child), 4.0, Operation::Multiply).unwrap());

        assert_eq!(grandchild.path, format!("{}/{}", root.id, child.id));
        assert_eq!(grandchild.path, child.full_path());
        assert_eq!(grandchild.result, 20.0);
    }

    #[test]
    fn division_by_zero_aborts_before_any_record_is_built() {
        let root = stored(build_comment(&author(), None, 5.0, Operation::Add).unwrap());

        assert_eq!(
            build_comment(&author(), Some(&root), 0.0, Operation::Divide).unwrap_err(),
            ThreadError::InvalidResult
        );
    }

    #[test]
    fn every_comment_gets_a_fresh_id() {
        let a = build_comment(&author(), None, 1.0, Operation::Add).unwrap();
        let b = build_comment(&author(), None, 1.0, Operation::Add).unwrap();

        assert_ne!(a.id, b.id);
        assert!(!a.id.contains('/'));
    }
}

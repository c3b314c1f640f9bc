//! Persistence operations over the comments table. Every read excludes
//! soft-deleted rows; tombstones only exist to keep descendants' paths
//! valid.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::schema::comments;

use super::models::comment::{Comment, NewComment};

pub async fn insert(
    conn: &mut AsyncPgConnection,
    comment: &NewComment,
) -> QueryResult<Comment> {
    diesel::insert_into(comments::table)
        .values(comment)
        .get_result(conn)
        .await
}

pub async fn find_live_by_id(
    conn: &mut AsyncPgConnection,
    id: &str,
) -> QueryResult<Option<Comment>> {
    comments::table
        .filter(comments::id.eq(id))
        .filter(comments::is_deleted.eq(false))
        .select(Comment::as_select())
        .first(conn)
        .await
        .optional()
}

pub async fn find_all_live(conn: &mut AsyncPgConnection) -> QueryResult<Vec<Comment>> {
    comments::table
        .filter(comments::is_deleted.eq(false))
        .select(Comment::as_select())
        .load(conn)
        .await
}

/// Live comments inside the subtree whose root has `prefix` as its full
/// path: direct children carry exactly `prefix` as their path, deeper
/// descendants extend it past a `/` boundary. Uuid ids contain neither `/`
/// nor LIKE metacharacters, so the pattern needs no escaping.
pub async fn find_live_by_path_prefix(
    conn: &mut AsyncPgConnection,
    prefix: &str,
) -> QueryResult<Vec<Comment>> {
    comments::table
        .filter(comments::is_deleted.eq(false))
        .filter(
            comments::path
                .eq(prefix)
                .or(comments::path.like(format!("{prefix}/%"))),
        )
        .select(Comment::as_select())
        .load(conn)
        .await
}

/// Marks the comment deleted, conditional on it still being live. Returns
/// whether a row was actually modified, the losing side of a concurrent
/// delete observes `false`.
pub async fn soft_delete(conn: &mut AsyncPgConnection, id: &str) -> QueryResult<bool> {
    let modified = diesel::update(
        comments::table
            .filter(comments::id.eq(id))
            .filter(comments::is_deleted.eq(false)),
    )
    .set((
        comments::is_deleted.eq(true),
        comments::updated_at.eq(chrono::Utc::now().naive_utc()),
    ))
    .execute(conn)
    .await?;

    Ok(modified > 0)
}

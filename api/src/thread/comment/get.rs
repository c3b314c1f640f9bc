use std::collections::HashMap;

use axum::{
    Json, debug_handler,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    App,
    error::AppError,
    identity::MaybeAuthUser,
    thread::{
        ThreadError,
        models::comment::{Comment, in_subtree},
        store,
    },
};

use super::CommentNode;

#[derive(Deserialize)]
pub struct ListParams {
    #[serde(rename = "rootId", alias = "root_id")]
    root_id: Option<String>,
}

#[debug_handler]
pub async fn get_comments(
    State(ctx): State<App>,
    Query(params): Query<ListParams>,
    MaybeAuthUser(auth_user): MaybeAuthUser,
) -> Result<Json<Vec<CommentNode>>, AppError> {
    let mut conn = ctx.diesel.get().await?;

    let viewer_id = auth_user.ok().map(|u| u.id);

    let nodes = match params.root_id.as_deref() {
        None => {
            let rows = store::find_all_live(&mut conn).await?;
            materialize(rows, None, viewer_id.as_deref())
        }
        Some(root_id) => {
            let root = store::find_live_by_id(&mut conn, root_id)
                .await?
                .ok_or(ThreadError::CommentNotFound)?;

            let rows = store::find_live_by_path_prefix(&mut conn, &root.full_path()).await?;
            materialize(rows, Some(&root), viewer_id.as_deref())
        }
    };

    Ok(Json(nodes))
}

/// Turns flat stored rows into the traversal-ordered listing: each row
/// annotated with its depth, its full path and its live parent's result.
///
/// With a scope root, only the root's strict descendants are returned, the
/// root itself still participates as the parent of its direct children.
/// Sorting by full path groups every comment with its whole subtree, since
/// a descendant's full path extends its ancestor's; `created_at` is a
/// stable tiebreak only, full paths are unique.
fn materialize(
    rows: Vec<Comment>,
    scope_root: Option<&Comment>,
    viewer_id: Option<&str>,
) -> Vec<CommentNode> {
    let mut results_by_id: HashMap<String, f64> =
        rows.iter().map(|c| (c.id.clone(), c.result)).collect();

    if let Some(root) = scope_root {
        results_by_id.insert(root.id.clone(), root.result);
    }

    let mut nodes: Vec<CommentNode> = rows
        .into_iter()
        .filter(|c| match scope_root {
            // Re-check the segment boundary in-process; the root itself
            // can never appear since its own path cannot contain its id.
            Some(root) => in_subtree(&c.path, &root.full_path()),
            None => true,
        })
        .map(|c| {
            let depth = c.depth();
            let full_path = c.full_path();
            // A soft-deleted parent is absent from the live rows, so its
            // result is omitted rather than joined to a tombstone.
            let parent_result = c
                .parent_id
                .as_ref()
                .and_then(|parent_id| results_by_id.get(parent_id))
                .copied();
            let is_comment_owner = viewer_id == Some(c.author_id.as_str());

            CommentNode {
                id: c.id,
                author_id: c.author_id,
                author_username: c.author_username,
                parent_id: c.parent_id,
                path: c.path,
                value: c.value,
                operation: c.operation,
                result: c.result,
                parent_result,
                depth,
                full_path,
                is_comment_owner,
                created_at: c.created_at,
                updated_at: c.updated_at,
            }
        })
        .collect();

    nodes.sort_unstable_by(|a, b| {
        a.full_path
            .cmp(&b.full_path)
            .then(a.created_at.cmp(&b.created_at))
    });

    nodes
}

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

// The model that maps to the database table. `path` is the materialized
// ancestor chain: ancestor ids joined by `/`, oldest first, empty for a
// root comment. A child's path is always its parent's full path.
#[derive(Queryable, Selectable, Debug, Serialize, Clone)]
#[diesel(table_name = crate::schema::comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Comment {
    pub id: String,
    pub author_id: String,
    pub author_username: String,
    pub parent_id: Option<String>,
    pub path: String,
    pub value: f64,
    pub operation: String,
    pub result: f64,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment {
    pub id: String,
    pub author_id: String,
    pub author_username: String,
    pub parent_id: Option<String>,
    pub path: String,
    pub value: f64,
    pub operation: String,
    pub result: f64,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Comment {
    /// `path` with the comment's own id appended. This doubles as the path
    /// a direct reply inherits and as the prefix that delimits the
    /// comment's subtree.
    pub fn full_path(&self) -> String {
        if self.path.is_empty() {
            self.id.clone()
        } else {
            format!("{}/{}", self.path, self.id)
        }
    }

    /// Number of ancestors, i.e. `/`-separated segments in `path`.
    pub fn depth(&self) -> usize {
        if self.path.is_empty() {
            0
        } else {
            self.path.split('/').count()
        }
    }
}

/// Exact-segment prefix test: does `path` lie inside the subtree rooted at
/// the node whose full path is `root_full_path`? Matching must stop at a
/// segment boundary, a raw `starts_with` would also accept paths whose
/// first foreign segment merely begins with the root's id.
pub fn in_subtree(path: &str, root_full_path: &str) -> bool {
    match path.strip_prefix(root_full_path) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

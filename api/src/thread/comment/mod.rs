pub mod create;
pub mod delete;
pub mod get;

use serde::Serialize;

// The model that will be returned to the client: a stored comment
// annotated with the read-time fields the thread is rendered from.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CommentNode {
    pub id: String,
    pub author_id: String,
    pub author_username: String,
    pub parent_id: Option<String>,
    pub path: String,
    pub value: f64,
    pub operation: String,
    pub result: f64,

    /// The live parent's result; absent for roots and for comments whose
    /// parent has been soft-deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_result: Option<f64>,

    pub depth: usize,
    pub full_path: String,
    pub is_comment_owner: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

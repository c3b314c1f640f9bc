use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::App;

use super::comment::{create::create_comment, delete::delete_comment, get::get_comments};

pub fn route() -> Router<App> {
    // TODO rate limit these public endpoints
    Router::<App>::new()
        .route("/comments", get(get_comments))
        .route("/comments", post(create_comment))
        .route("/comments", delete(delete_comment))
}

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    App,
    error::AppError,
    identity::models::{session::NewSession, user::User},
    schema::{sessions, users},
};

use super::{COOKIE_NAME, MaybeAuthUser};

pub fn route() -> Router<App> {
    // TODO rate limit these public endpoints
    Router::<App>::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

#[derive(Deserialize)]
pub struct Credentials {
    username: String,
    password: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    id: String,
    username: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    token: String,
    user: UserResponse,
}

#[axum::debug_handler]
async fn register(
    State(ctx): State<App>,
    crate::json::Json(body): crate::json::Json<Credentials>,
) -> Result<impl IntoResponse, AppError> {
    let username = body.username.trim();
    if username.is_empty() || body.password.is_empty() {
        return Err(("Username and password are required", StatusCode::BAD_REQUEST))?;
    }

    let mut conn = ctx.diesel.get().await?;

    let existing = users::table
        .filter(users::username.eq(username))
        .select(users::id)
        .first::<String>(&mut conn)
        .await
        .optional()?;

    if existing.is_some() {
        return Err(("Username already exists", StatusCode::CONFLICT))?;
    }

    let new_user = User::new_with_credentials(username, &body.password).map_err(|e| {
        tracing::error!("password hashing failed: {e}");
        "Internal server error"
    })?;

    let user: User = diesel::insert_into(users::table)
        .values(&new_user)
        .get_result(&mut conn)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: user.id,
            username: user.username,
        }),
    ))
}

#[axum::debug_handler]
async fn login(
    State(ctx): State<App>,
    crate::json::Json(body): crate::json::Json<Credentials>,
) -> Result<impl IntoResponse, AppError> {
    let username = body.username.trim();
    if username.is_empty() || body.password.is_empty() {
        return Err(("Username and password are required", StatusCode::BAD_REQUEST))?;
    }

    let mut conn = ctx.diesel.get().await?;

    let user = users::table
        .filter(users::username.eq(username))
        .select(User::as_select())
        .first::<User>(&mut conn)
        .await
        .optional()?;

    // The same response for an unknown username and a wrong password, so
    // the endpoint doesn't leak which usernames exist.
    let user = match user {
        Some(user) if user.verify_password(&body.password) => user,
        _ => return Err(("Invalid credentials", StatusCode::UNAUTHORIZED))?,
    };

    let session = NewSession::new_with_user_id(&user.id);

    diesel::insert_into(sessions::table)
        .values(&session)
        .execute(&mut conn)
        .await?;

    let auth_cookie = axum_extra::extract::cookie::Cookie::build((COOKIE_NAME, session.token.clone()))
        .secure(ctx.config.secure_cookies())
        .http_only(true)
        .expires(
            time::OffsetDateTime::now_utc()
                + (session.expires_at - session.issued_at)
                    .to_std()
                    .unwrap_or_default(),
        )
        .path("/");

    Ok((
        CookieJar::new().add(auth_cookie),
        Json(LoginResponse {
            token: session.token,
            user: UserResponse {
                id: user.id,
                username: user.username,
            },
        }),
    ))
}

#[axum::debug_handler]
async fn logout(State(ctx): State<App>, jar: CookieJar) -> Result<impl IntoResponse, AppError> {
    // Deactivate the session server-side as well, clearing the cookie
    // alone would leave the token usable as a bearer credential.
    if let Some(cookie) = jar.get(COOKIE_NAME) {
        let mut conn = ctx.diesel.get().await?;

        diesel::update(sessions::table.filter(sessions::token.eq(cookie.value())))
            .set((
                sessions::active.eq(false),
                sessions::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(&mut conn)
            .await?;
    }

    let auth_cookie = axum_extra::extract::cookie::Cookie::build(COOKIE_NAME)
        .secure(ctx.config.secure_cookies())
        .http_only(true)
        .max_age(Duration::ZERO)
        .path("/");

    Ok(CookieJar::new().add(auth_cookie))
}

#[axum::debug_handler(state = App)]
async fn me(MaybeAuthUser(auth_user): MaybeAuthUser) -> Result<Json<UserResponse>, AppError> {
    let user = auth_user?;

    Ok(Json(UserResponse {
        id: user.id,
        username: user.username,
    }))
}

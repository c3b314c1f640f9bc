use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::{
    App,
    error::{ApiRequestError, AppError},
};

use self::models::user::User;

pub mod models;
pub mod routes;

pub const COOKIE_NAME: &str = "auth_token";

#[derive(thiserror::Error, Debug)]
pub enum AuthenticationError {
    #[error("Authentication required, but no bearer token or `{COOKIE_NAME}` cookie was sent.")]
    NoToken,

    #[error(
        "Unauthorized, please check if you're logged in by refreshing the \
         page. This could be due to an expired session or token has became invalid."
    )]
    Unauthorized,
}

impl ApiRequestError for AuthenticationError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthenticationError::NoToken => StatusCode::UNAUTHORIZED,
            AuthenticationError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<AuthenticationError> for AppError {
    fn from(e: AuthenticationError) -> Self {
        AppError::request(e)
    }
}

/// Extracts the requester's identity when a credential is present, leaving
/// the failure for the handler to decide on. Endpoints that merely
/// personalize their response (e.g. comment ownership flags) stay usable
/// without a session.
pub struct MaybeAuthUser(pub Result<User, AuthenticationError>);

impl FromRequestParts<App> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &App) -> Result<Self, Self::Rejection> {
        // The Authorization header takes precedence, the cookie is the
        // fallback for browser clients.
        let bearer = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::to_owned);

        let session_token = match bearer {
            Some(token) => token,
            None => {
                let jar = axum_extra::extract::cookie::CookieJar::from_headers(&parts.headers);
                match jar.get(COOKIE_NAME) {
                    Some(cookie) => cookie.value().to_owned(),
                    None => return Ok(MaybeAuthUser(Err(AuthenticationError::NoToken))),
                }
            }
        };

        let mut conn = state.diesel.get().await?;

        let user = {
            use crate::schema::{sessions, users};

            sessions::table
                .inner_join(users::table)
                .filter(sessions::token.eq(&session_token))
                .filter(sessions::active.eq(true))
                .filter(sessions::expires_at.gt(diesel::dsl::now))
                .filter(sessions::issued_at.le(diesel::dsl::now))
                .select(User::as_select())
                .first::<User>(&mut conn)
                .await
                .optional()?
        };

        Ok(MaybeAuthUser(
            user.ok_or(AuthenticationError::Unauthorized),
        ))
    }
}

pub struct AuthUser(pub User);

impl FromRequestParts<App> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &App) -> Result<Self, Self::Rejection> {
        let MaybeAuthUser(auth_user) = MaybeAuthUser::from_request_parts(parts, state).await?;

        Ok(AuthUser(auth_user?))
    }
}

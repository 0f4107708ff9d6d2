//! Authentication: password hashing, sessions and the extractors that
//! resolve the signed-in user.

pub mod password;
pub mod session;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use sea_orm::ConnectionTrait;

use crate::constants::ERROR_NOT_SIGNED_IN;
use crate::entities::user;
use crate::error::AppResult;
use crate::repositories::UserRepository;
use crate::web::{paths, AppState};

pub use session::{Flash, FlashLevel, Session, SessionStore};

/// Look up `username` and check `password` against the stored hash.
pub async fn authenticate<C>(conn: &C, username: &str, password: &str) -> AppResult<Option<user::Model>>
where
    C: ConnectionTrait,
{
    let user = UserRepository::get_by_username(conn, username).await?;
    Ok(user.filter(|user| password::verify_password(password, &user.password_hash)))
}

async fn load_user(session: &Session, state: &AppState) -> AppResult<Option<user::Model>> {
    match session.user_id().await {
        Some(id) => UserRepository::get_by_id(&state.storage.conn, id).await,
        None => Ok(None),
    }
}

/// The signed-in user. Requests without one are redirected to the login page.
pub struct AuthUser(pub user::Model);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match load_user(&session, state).await.map_err(IntoResponse::into_response)? {
            Some(user) => Ok(AuthUser(user)),
            None => {
                log::debug!("Anonymous request to {} redirected to login", parts.uri.path());
                session.error(ERROR_NOT_SIGNED_IN).await;
                Err(Redirect::to(paths::LOGIN).into_response())
            }
        }
    }
}

/// The signed-in user, if any. Used by public pages for the navigation bar.
pub struct CurrentUser(pub Option<user::Model>);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        let user = load_user(&session, state).await.map_err(IntoResponse::into_response)?;
        Ok(CurrentUser(user))
    }
}

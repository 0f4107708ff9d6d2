//! Registration and account management.

use axum::extract::{Form, Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use sea_orm::ConnectionTrait;

use super::{html, page_context, parse_id, paths, AppState};
use crate::auth::{AuthUser, CurrentUser, Session};
use crate::constants::{
    ERROR_USERNAME_TAKEN, ERROR_USER_FOREIGN, ERROR_USER_IN_USE, SUCCESS_USER_DELETED, SUCCESS_USER_REGISTERED,
    SUCCESS_USER_UPDATED,
};
use crate::entities::user;
use crate::error::{catch_unique_violation, AppError, AppResult};
use crate::forms::{FormData, UserForm};
use crate::repositories::UserRepository;
use crate::ui::pages;

/// Resolve the account in the path. Only the owner may act on it; anyone
/// else gets an error flash and `None`.
async fn own_account<C>(conn: &C, session: &Session, current: &user::Model, raw_id: &str) -> AppResult<Option<user::Model>>
where
    C: ConnectionTrait,
{
    let id = parse_id(raw_id)?;
    let account = UserRepository::get_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))?;

    if account.id != current.id {
        log::warn!("User '{}' tried to modify user {}", current.username, account.id);
        session.error(ERROR_USER_FOREIGN).await;
        return Ok(None);
    }
    Ok(Some(account))
}

fn to_users() -> Response {
    Redirect::to(paths::USERS).into_response()
}

/// GET /users/
pub(super) async fn list(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
) -> AppResult<Response> {
    let users = UserRepository::get_all(&state.storage.conn).await?;
    Ok(html(pages::users::list(&page_context(&session, user).await, &users)))
}

/// GET /users/create/
pub(super) async fn create_page(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
) -> Response {
    html(pages::users::create(
        &page_context(&session, user).await,
        &UserForm::default(),
        state.config.auth.min_password_length,
    ))
}

/// POST /users/create/
pub(super) async fn create(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let conn = &state.storage.conn;
    let min_password_length = state.config.auth.min_password_length;
    let mut form = UserForm::from_data(&FormData::from(pairs));

    if let Some(new_user) = form.validate(conn, None, min_password_length).await? {
        match catch_unique_violation(UserRepository::create(conn, new_user).await)? {
            Some(account) => {
                log::info!("Registered user '{}' ({})", account.username, account.id);
                session.success(SUCCESS_USER_REGISTERED).await;
                return Ok(Redirect::to(paths::LOGIN).into_response());
            }
            None => form.errors.add("username", ERROR_USERNAME_TAKEN),
        }
    }

    log::warn!("Rejected registration: {:?}", form.errors);
    Ok(html(pages::users::create(
        &page_context(&session, user).await,
        &form,
        min_password_length,
    )))
}

/// GET /users/{id}/update/
pub(super) async fn update_page(
    State(state): State<AppState>,
    session: Session,
    AuthUser(current): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Some(account) = own_account(&state.storage.conn, &session, &current, &id).await? else {
        return Ok(to_users());
    };
    Ok(html(pages::users::update(
        &page_context(&session, Some(current)).await,
        account.id,
        &UserForm::from_model(&account),
        state.config.auth.min_password_length,
    )))
}

/// POST /users/{id}/update/
pub(super) async fn update(
    State(state): State<AppState>,
    session: Session,
    AuthUser(current): AuthUser,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let conn = &state.storage.conn;
    let Some(account) = own_account(conn, &session, &current, &id).await? else {
        return Ok(to_users());
    };

    let account_id = account.id;
    let min_password_length = state.config.auth.min_password_length;
    let mut form = UserForm::from_data(&FormData::from(pairs));

    if let Some(changes) = form.validate(conn, Some(account_id), min_password_length).await? {
        match catch_unique_violation(UserRepository::update(conn, account, changes).await)? {
            Some(account) => {
                log::info!("Updated user '{}' ({})", account.username, account.id);
                session.success(SUCCESS_USER_UPDATED).await;
                return Ok(to_users());
            }
            None => form.errors.add("username", ERROR_USERNAME_TAKEN),
        }
    }

    log::warn!("Rejected update of user {}: {:?}", account_id, form.errors);
    Ok(html(pages::users::update(
        &page_context(&session, Some(current)).await,
        account_id,
        &form,
        min_password_length,
    )))
}

/// GET /users/{id}/delete/
pub(super) async fn delete_page(
    State(state): State<AppState>,
    session: Session,
    AuthUser(current): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Some(account) = own_account(&state.storage.conn, &session, &current, &id).await? else {
        return Ok(to_users());
    };
    Ok(html(pages::users::delete(
        &page_context(&session, Some(current)).await,
        &account,
    )))
}

/// POST /users/{id}/delete/
pub(super) async fn delete(
    State(state): State<AppState>,
    session: Session,
    AuthUser(current): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Some(account) = own_account(&state.storage.conn, &session, &current, &id).await? else {
        return Ok(to_users());
    };

    match UserRepository::delete(&state.storage.conn, account.id).await {
        Ok(()) => {
            log::info!("Deleted user '{}' ({})", account.username, account.id);
            session.logout().await;
            state.sessions.forget_user(account.id).await;
            session.success(SUCCESS_USER_DELETED).await;
        }
        Err(AppError::Protected(reason)) => {
            log::warn!("Refused to delete user {}: {}", account.id, reason);
            session.error(ERROR_USER_IN_USE).await;
        }
        Err(e) => return Err(e),
    }
    Ok(to_users())
}

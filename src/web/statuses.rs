//! Status management. All routes require a signed-in user.

use axum::extract::{Form, Path, State};
use axum::response::{IntoResponse, Redirect, Response};

use super::{html, page_context, parse_id, paths, AppState};
use crate::auth::{AuthUser, Session};
use crate::constants::{
    ERROR_STATUS_EXISTS, ERROR_STATUS_IN_USE, SUCCESS_STATUS_CREATED, SUCCESS_STATUS_DELETED,
    SUCCESS_STATUS_UPDATED,
};
use crate::entities::status;
use crate::error::{catch_unique_violation, AppError, AppResult};
use crate::forms::reference::validate_status;
use crate::forms::{FormData, NameForm};
use crate::repositories::StatusRepository;
use crate::ui::pages;

async fn load(state: &AppState, raw_id: &str) -> AppResult<status::Model> {
    let id = parse_id(raw_id)?;
    StatusRepository::get_by_id(&state.storage.conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Status", id))
}

fn to_list() -> Response {
    Redirect::to(paths::STATUSES).into_response()
}

/// GET /statuses/
pub(super) async fn list(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
) -> AppResult<Response> {
    let statuses = StatusRepository::get_all(&state.storage.conn).await?;
    Ok(html(pages::statuses::list(
        &page_context(&session, Some(user)).await,
        &statuses,
    )))
}

/// GET /statuses/create/
pub(super) async fn create_page(session: Session, AuthUser(user): AuthUser) -> Response {
    html(pages::statuses::create(
        &page_context(&session, Some(user)).await,
        &NameForm::default(),
    ))
}

/// POST /statuses/create/
pub(super) async fn create(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let conn = &state.storage.conn;
    let mut form = NameForm::from_data(&FormData::from(pairs));

    if validate_status(conn, &mut form, None).await? {
        match catch_unique_violation(StatusRepository::create(conn, &form.name).await)? {
            Some(status) => {
                log::info!("Created status '{}' ({})", status.name, status.id);
                session.success(SUCCESS_STATUS_CREATED).await;
                return Ok(to_list());
            }
            None => form.errors.add("name", ERROR_STATUS_EXISTS),
        }
    }

    log::warn!("Rejected new status: {:?}", form.errors);
    Ok(html(pages::statuses::create(
        &page_context(&session, Some(user)).await,
        &form,
    )))
}

/// GET /statuses/{id}/update/
pub(super) async fn update_page(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let status = load(&state, &id).await?;
    Ok(html(pages::statuses::update(
        &page_context(&session, Some(user)).await,
        status.id,
        &NameForm::with_name(&status.name),
    )))
}

/// POST /statuses/{id}/update/
pub(super) async fn update(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let status = load(&state, &id).await?;
    let status_id = status.id;
    let conn = &state.storage.conn;
    let mut form = NameForm::from_data(&FormData::from(pairs));

    if validate_status(conn, &mut form, Some(status_id)).await? {
        match catch_unique_violation(StatusRepository::rename(conn, status, &form.name).await)? {
            Some(status) => {
                log::info!("Renamed status {} to '{}'", status.id, status.name);
                session.success(SUCCESS_STATUS_UPDATED).await;
                return Ok(to_list());
            }
            None => form.errors.add("name", ERROR_STATUS_EXISTS),
        }
    }

    log::warn!("Rejected update of status {}: {:?}", status_id, form.errors);
    Ok(html(pages::statuses::update(
        &page_context(&session, Some(user)).await,
        status_id,
        &form,
    )))
}

/// GET /statuses/{id}/delete/
pub(super) async fn delete_page(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let status = load(&state, &id).await?;
    Ok(html(pages::statuses::delete(
        &page_context(&session, Some(user)).await,
        &status,
    )))
}

/// POST /statuses/{id}/delete/
pub(super) async fn delete(
    State(state): State<AppState>,
    session: Session,
    AuthUser(_user): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let status = load(&state, &id).await?;

    match StatusRepository::delete(&state.storage.conn, status.id).await {
        Ok(()) => {
            log::info!("Deleted status '{}' ({})", status.name, status.id);
            session.success(SUCCESS_STATUS_DELETED).await;
        }
        Err(AppError::Protected(reason)) => {
            log::warn!("Refused to delete status {}: {}", status.id, reason);
            session.error(ERROR_STATUS_IN_USE).await;
        }
        Err(e) => return Err(e),
    }
    Ok(to_list())
}

//! Label management. All routes require a signed-in user.

use axum::extract::{Form, Path, State};
use axum::response::{IntoResponse, Redirect, Response};

use super::{html, page_context, parse_id, paths, AppState};
use crate::auth::{AuthUser, Session};
use crate::constants::{
    ERROR_LABEL_EXISTS, ERROR_LABEL_IN_USE, SUCCESS_LABEL_CREATED, SUCCESS_LABEL_DELETED,
    SUCCESS_LABEL_UPDATED,
};
use crate::entities::label;
use crate::error::{catch_unique_violation, AppError, AppResult};
use crate::forms::reference::validate_label;
use crate::forms::{FormData, NameForm};
use crate::repositories::LabelRepository;
use crate::ui::pages;

async fn load(state: &AppState, raw_id: &str) -> AppResult<label::Model> {
    let id = parse_id(raw_id)?;
    LabelRepository::get_by_id(&state.storage.conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Label", id))
}

fn to_list() -> Response {
    Redirect::to(paths::LABELS).into_response()
}

/// GET /labels/
pub(super) async fn list(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
) -> AppResult<Response> {
    let labels = LabelRepository::get_all(&state.storage.conn).await?;
    Ok(html(pages::labels::list(
        &page_context(&session, Some(user)).await,
        &labels,
    )))
}

/// GET /labels/create/
pub(super) async fn create_page(session: Session, AuthUser(user): AuthUser) -> Response {
    html(pages::labels::create(
        &page_context(&session, Some(user)).await,
        &NameForm::default(),
    ))
}

/// POST /labels/create/
pub(super) async fn create(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let conn = &state.storage.conn;
    let mut form = NameForm::from_data(&FormData::from(pairs));

    if validate_label(conn, &mut form, None).await? {
        match catch_unique_violation(LabelRepository::create(conn, &form.name).await)? {
            Some(label) => {
                log::info!("Created label '{}' ({})", label.name, label.id);
                session.success(SUCCESS_LABEL_CREATED).await;
                return Ok(to_list());
            }
            None => form.errors.add("name", ERROR_LABEL_EXISTS),
        }
    }

    log::warn!("Rejected new label: {:?}", form.errors);
    Ok(html(pages::labels::create(
        &page_context(&session, Some(user)).await,
        &form,
    )))
}

/// GET /labels/{id}/update/
pub(super) async fn update_page(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let label = load(&state, &id).await?;
    Ok(html(pages::labels::update(
        &page_context(&session, Some(user)).await,
        label.id,
        &NameForm::with_name(&label.name),
    )))
}

/// POST /labels/{id}/update/
pub(super) async fn update(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let label = load(&state, &id).await?;
    let label_id = label.id;
    let conn = &state.storage.conn;
    let mut form = NameForm::from_data(&FormData::from(pairs));

    if validate_label(conn, &mut form, Some(label_id)).await? {
        match catch_unique_violation(LabelRepository::rename(conn, label, &form.name).await)? {
            Some(label) => {
                log::info!("Renamed label {} to '{}'", label.id, label.name);
                session.success(SUCCESS_LABEL_UPDATED).await;
                return Ok(to_list());
            }
            None => form.errors.add("name", ERROR_LABEL_EXISTS),
        }
    }

    log::warn!("Rejected update of label {}: {:?}", label_id, form.errors);
    Ok(html(pages::labels::update(
        &page_context(&session, Some(user)).await,
        label_id,
        &form,
    )))
}

/// GET /labels/{id}/delete/
pub(super) async fn delete_page(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let label = load(&state, &id).await?;
    Ok(html(pages::labels::delete(
        &page_context(&session, Some(user)).await,
        &label,
    )))
}

/// POST /labels/{id}/delete/
pub(super) async fn delete(
    State(state): State<AppState>,
    session: Session,
    AuthUser(_user): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let label = load(&state, &id).await?;

    match LabelRepository::delete(&state.storage.conn, label.id).await {
        Ok(()) => {
            log::info!("Deleted label '{}' ({})", label.name, label.id);
            session.success(SUCCESS_LABEL_DELETED).await;
        }
        Err(AppError::Protected(reason)) => {
            log::warn!("Refused to delete label {}: {}", label.id, reason);
            session.error(ERROR_LABEL_IN_USE).await;
        }
        Err(e) => return Err(e),
    }
    Ok(to_list())
}

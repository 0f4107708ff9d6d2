//! Task list, detail and editing. All routes require a signed-in user.

use axum::extract::{Form, Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use sea_orm::ConnectionTrait;

use super::{html, page_context, parse_id, paths, AppState};
use crate::auth::{AuthUser, Session};
use crate::constants::{
    ERROR_TASK_EXISTS, ERROR_TASK_NOT_AUTHOR, SUCCESS_TASK_CREATED, SUCCESS_TASK_DELETED, SUCCESS_TASK_UPDATED,
};
use crate::entities::{label, status, task, user};
use crate::error::{catch_unique_violation, AppError, AppResult};
use crate::filter::TaskFilter;
use crate::forms::{FormData, TaskForm};
use crate::repositories::{LabelRepository, StatusRepository, TaskRepository, UserRepository};
use crate::ui::pages;
use crate::ui::pages::tasks::Choices;

/// Every status, user and label, for the select inputs.
struct ChoiceRows {
    statuses: Vec<status::Model>,
    users: Vec<user::Model>,
    labels: Vec<label::Model>,
}

impl ChoiceRows {
    async fn load<C>(conn: &C) -> AppResult<Self>
    where
        C: ConnectionTrait,
    {
        Ok(Self {
            statuses: StatusRepository::get_all(conn).await?,
            users: UserRepository::get_all(conn).await?,
            labels: LabelRepository::get_all(conn).await?,
        })
    }

    fn choices(&self) -> Choices<'_> {
        Choices {
            statuses: &self.statuses,
            users: &self.users,
            labels: &self.labels,
        }
    }
}

async fn load(state: &AppState, raw_id: &str) -> AppResult<task::Model> {
    let id = parse_id(raw_id)?;
    TaskRepository::get_by_id(&state.storage.conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Task", id))
}

fn to_list() -> Response {
    Redirect::to(paths::TASKS).into_response()
}

/// Only the author may delete a task. Flashes an error for anyone else.
async fn check_author(session: &Session, task: &task::Model, user: &user::Model) -> bool {
    if task.author_id == user.id {
        return true;
    }
    log::warn!("User '{}' is not the author of task {}", user.username, task.id);
    session.error(ERROR_TASK_NOT_AUTHOR).await;
    false
}

/// GET /tasks/
pub(super) async fn list(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    let conn = &state.storage.conn;
    let filter = TaskFilter::from_pairs(&params);
    if filter.matches_nothing() {
        log::debug!("Task filter {:?} matches nothing", filter);
    }

    let tasks = TaskRepository::get_filtered(conn, &filter, user.id).await?;
    let tasks = TaskRepository::with_details(conn, tasks).await?;
    let rows = ChoiceRows::load(conn).await?;

    Ok(html(pages::tasks::list(
        &page_context(&session, Some(user)).await,
        &tasks,
        &rows.choices(),
        &filter,
    )))
}

/// GET /tasks/{id}/
pub(super) async fn detail(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    let details = TaskRepository::get_details(&state.storage.conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Task", id))?;
    Ok(html(pages::tasks::detail(
        &page_context(&session, Some(user)).await,
        &details,
    )))
}

/// GET /tasks/create/
pub(super) async fn create_page(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
) -> AppResult<Response> {
    let rows = ChoiceRows::load(&state.storage.conn).await?;
    Ok(html(pages::tasks::create(
        &page_context(&session, Some(user)).await,
        &TaskForm::default(),
        &rows.choices(),
    )))
}

/// POST /tasks/create/
pub(super) async fn create(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let conn = &state.storage.conn;
    let mut form = TaskForm::from_data(&FormData::from(pairs));

    if let Some(changes) = form.validate(conn, None).await? {
        match catch_unique_violation(TaskRepository::create(conn, user.id, changes).await)? {
            Some(task) => {
                log::info!("User '{}' created task '{}' ({})", user.username, task.name, task.id);
                session.success(SUCCESS_TASK_CREATED).await;
                return Ok(to_list());
            }
            None => form.errors.add("name", ERROR_TASK_EXISTS),
        }
    }

    log::warn!("Rejected new task: {:?}", form.errors);
    let rows = ChoiceRows::load(conn).await?;
    Ok(html(pages::tasks::create(
        &page_context(&session, Some(user)).await,
        &form,
        &rows.choices(),
    )))
}

/// GET /tasks/{id}/update/
pub(super) async fn update_page(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let conn = &state.storage.conn;
    let task = load(&state, &id).await?;
    let label_ids = TaskRepository::get_label_ids(conn, task.id).await?;
    let rows = ChoiceRows::load(conn).await?;
    Ok(html(pages::tasks::update(
        &page_context(&session, Some(user)).await,
        task.id,
        &TaskForm::from_model(&task, &label_ids),
        &rows.choices(),
    )))
}

/// POST /tasks/{id}/update/
pub(super) async fn update(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let conn = &state.storage.conn;
    let task = load(&state, &id).await?;
    let task_id = task.id;
    let mut form = TaskForm::from_data(&FormData::from(pairs));

    if let Some(changes) = form.validate(conn, Some(task_id)).await? {
        match catch_unique_violation(TaskRepository::update(conn, task, changes).await)? {
            Some(task) => {
                log::info!("User '{}' updated task {}", user.username, task.id);
                session.success(SUCCESS_TASK_UPDATED).await;
                return Ok(to_list());
            }
            None => form.errors.add("name", ERROR_TASK_EXISTS),
        }
    }

    log::warn!("Rejected update of task {}: {:?}", task_id, form.errors);
    let rows = ChoiceRows::load(conn).await?;
    Ok(html(pages::tasks::update(
        &page_context(&session, Some(user)).await,
        task_id,
        &form,
        &rows.choices(),
    )))
}

/// GET /tasks/{id}/delete/
pub(super) async fn delete_page(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let task = load(&state, &id).await?;
    if !check_author(&session, &task, &user).await {
        return Ok(to_list());
    }
    Ok(html(pages::tasks::delete(
        &page_context(&session, Some(user)).await,
        &task,
    )))
}

/// POST /tasks/{id}/delete/
pub(super) async fn delete(
    State(state): State<AppState>,
    session: Session,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let task = load(&state, &id).await?;
    if !check_author(&session, &task, &user).await {
        return Ok(to_list());
    }

    let (task_id, name) = (task.id, task.name.clone());
    TaskRepository::delete(&state.storage.conn, task).await?;
    log::info!("User '{}' deleted task '{}' ({})", user.username, name, task_id);
    session.success(SUCCESS_TASK_DELETED).await;
    Ok(to_list())
}

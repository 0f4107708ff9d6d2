//! HTTP server: router, session middleware and request handlers.
//!
//! GET routes render HTML, POST routes take url-encoded forms. Every request
//! passes through [`session_layer`], which resolves the session cookie into a
//! [`Session`] stored in the request extensions.

mod labels;
mod session;
mod statuses;
mod tasks;
mod users;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use uuid::Uuid;

use crate::auth::{Session, SessionStore};
use crate::config::Config;
use crate::entities::user;
use crate::error::{AppError, AppResult};
use crate::storage::Storage;
use crate::ui::PageContext;

/// Route paths, shared by the router, the pages and the redirects.
pub mod paths {
    pub const INDEX: &str = "/";
    pub const LOGIN: &str = "/login/";
    pub const LOGOUT: &str = "/logout/";
    pub const USERS: &str = "/users/";
    pub const USER_CREATE: &str = "/users/create/";
    pub const STATUSES: &str = "/statuses/";
    pub const STATUS_CREATE: &str = "/statuses/create/";
    pub const LABELS: &str = "/labels/";
    pub const LABEL_CREATE: &str = "/labels/create/";
    pub const TASKS: &str = "/tasks/";
    pub const TASK_CREATE: &str = "/tasks/create/";

    pub fn user_update(id: i32) -> String {
        format!("/users/{}/update/", id)
    }

    pub fn user_delete(id: i32) -> String {
        format!("/users/{}/delete/", id)
    }

    pub fn status_update(id: i32) -> String {
        format!("/statuses/{}/update/", id)
    }

    pub fn status_delete(id: i32) -> String {
        format!("/statuses/{}/delete/", id)
    }

    pub fn label_update(id: i32) -> String {
        format!("/labels/{}/update/", id)
    }

    pub fn label_delete(id: i32) -> String {
        format!("/labels/{}/delete/", id)
    }

    pub fn task_detail(id: i32) -> String {
        format!("/tasks/{}/", id)
    }

    pub fn task_update(id: i32) -> String {
        format!("/tasks/{}/update/", id)
    }

    pub fn task_delete(id: i32) -> String {
        format!("/tasks/{}/delete/", id)
    }
}

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub sessions: SessionStore,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(storage: Storage, config: Config) -> Self {
        Self {
            storage,
            sessions: SessionStore::new(),
            config: Arc::new(config),
        }
    }
}

/// Build the application router.
///
/// Routes:
/// - `/`, `/login/`, `/logout/`
/// - `/users/`, `/users/create/`, `/users/{id}/update/`, `/users/{id}/delete/`
/// - `/statuses/…` and `/labels/…` with the same shape
/// - `/tasks/`, `/tasks/create/`, `/tasks/{id}/`, `/tasks/{id}/update/`, `/tasks/{id}/delete/`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(paths::INDEX, get(session::index))
        .route(paths::LOGIN, get(session::login_page).post(session::login))
        .route(paths::LOGOUT, get(session::logout).post(session::logout))
        .route(paths::USERS, get(users::list))
        .route(paths::USER_CREATE, get(users::create_page).post(users::create))
        .route("/users/{id}/update/", get(users::update_page).post(users::update))
        .route("/users/{id}/delete/", get(users::delete_page).post(users::delete))
        .route(paths::STATUSES, get(statuses::list))
        .route(paths::STATUS_CREATE, get(statuses::create_page).post(statuses::create))
        .route("/statuses/{id}/update/", get(statuses::update_page).post(statuses::update))
        .route("/statuses/{id}/delete/", get(statuses::delete_page).post(statuses::delete))
        .route(paths::LABELS, get(labels::list))
        .route(paths::LABEL_CREATE, get(labels::create_page).post(labels::create))
        .route("/labels/{id}/update/", get(labels::update_page).post(labels::update))
        .route("/labels/{id}/delete/", get(labels::delete_page).post(labels::delete))
        .route(paths::TASKS, get(tasks::list))
        .route(paths::TASK_CREATE, get(tasks::create_page).post(tasks::create))
        .route("/tasks/{id}/", get(tasks::detail))
        .route("/tasks/{id}/update/", get(tasks::update_page).post(tasks::update))
        .route("/tasks/{id}/delete/", get(tasks::delete_page).post(tasks::delete))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), session_layer))
        .with_state(state)
}

/// Open the database, bind the configured address and serve until Ctrl-C.
pub async fn serve(config: Config) -> Result<()> {
    let storage = Storage::new(&config.database).await?;
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    log::info!("Listening on http://{}", addr);
    axum::serve(listener, router(AppState::new(storage, config)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
    }
}

async fn not_found() -> AppError {
    AppError::NotFound("page".to_string())
}

/// Session id carried by the request, if the cookie is present and well formed.
fn session_cookie(headers: &HeaderMap, name: &str) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// Attach a [`Session`] to the request and send a cookie when its id changed.
async fn session_layer(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let cookie_name = state.config.auth.session_cookie.clone();
    let incoming = session_cookie(request.headers(), &cookie_name);
    let known = match incoming {
        Some(id) if state.sessions.contains(id).await => Some(id),
        _ => None,
    };

    let session = Session::new(state.sessions.clone(), known);
    request.extensions_mut().insert(session.clone());
    let mut response = next.run(request).await;

    // Sessions without a user or pending flashes are not kept
    if let Some(id) = session.id() {
        if !state.sessions.discard_if_empty(id).await && incoming != Some(id) {
            let cookie = format!("{}={}; HttpOnly; SameSite=Lax; Path=/", cookie_name, id);
            match HeaderValue::from_str(&cookie) {
                Ok(value) => {
                    response.headers_mut().append(header::SET_COOKIE, value);
                }
                Err(e) => log::error!("Invalid session cookie header: {}", e),
            }
        }
    }
    response
}

/// Take the pending flash messages and build the page context.
pub(crate) async fn page_context(session: &Session, user: Option<user::Model>) -> PageContext {
    PageContext::new(user, session.take_flashes().await)
}

/// 200 response with a rendered page.
pub(crate) fn html(body: String) -> Response {
    (StatusCode::OK, Html(body)).into_response()
}

/// Parse a path id. Anything that is not a positive integer is not found.
pub(crate) fn parse_id(raw: &str) -> AppResult<i32> {
    raw.parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::NotFound(format!("id '{}'", raw)))
}

//! Index, login and logout.

use axum::extract::{Form, State};
use axum::response::{IntoResponse, Redirect, Response};

use super::{html, page_context, paths, AppState};
use crate::auth::{self, CurrentUser, Session};
use crate::constants::{ERROR_INVALID_LOGIN, SUCCESS_LOGGED_IN, SUCCESS_LOGGED_OUT};
use crate::error::AppResult;
use crate::forms::{FormData, LoginForm};
use crate::ui::pages;

/// GET /
pub(super) async fn index(session: Session, CurrentUser(user): CurrentUser) -> Response {
    html(pages::session::index(&page_context(&session, user).await))
}

/// GET /login/
pub(super) async fn login_page(session: Session, CurrentUser(user): CurrentUser) -> Response {
    html(pages::session::login(
        &page_context(&session, user).await,
        &LoginForm::default(),
    ))
}

/// POST /login/
pub(super) async fn login(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let mut form = LoginForm::from_data(&FormData::from(pairs));

    if form.is_valid() {
        match auth::authenticate(&state.storage.conn, &form.username, &form.password).await? {
            Some(account) => {
                log::info!("User '{}' logged in", account.username);
                session.login(account.id).await;
                session.success(SUCCESS_LOGGED_IN).await;
                return Ok(Redirect::to(paths::INDEX).into_response());
            }
            None => {
                log::warn!("Failed login attempt for '{}'", form.username);
                form.errors.add_non_field(ERROR_INVALID_LOGIN);
            }
        }
    }

    Ok(html(pages::session::login(&page_context(&session, user).await, &form)))
}

/// GET or POST /logout/
pub(super) async fn logout(session: Session) -> Response {
    if let Some(user_id) = session.user_id().await {
        log::info!("User {} logged out", user_id);
    }
    session.logout().await;
    session.success(SUCCESS_LOGGED_OUT).await;
    Redirect::to(paths::INDEX).into_response()
}

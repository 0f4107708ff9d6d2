//! Page shell: navigation bar, flash messages and error pages.

use axum::http::StatusCode;

use super::html::escape;
use crate::auth::Flash;
use crate::constants::APP_NAME;
use crate::entities::user;
use crate::web::paths;

/// What every page needs besides its own content.
pub struct PageContext {
    pub user: Option<user::Model>,
    pub flashes: Vec<Flash>,
}

impl PageContext {
    pub fn new(user: Option<user::Model>, flashes: Vec<Flash>) -> Self {
        Self { user, flashes }
    }
}

fn navigation(user: Option<&user::Model>) -> String {
    let mut items = vec![format!(r#"<li class="nav-item"><a class="nav-link" href="{}">Users</a></li>"#, paths::USERS)];

    let right = match user {
        Some(user) => {
            items.push(format!(r#"<li class="nav-item"><a class="nav-link" href="{}">Statuses</a></li>"#, paths::STATUSES));
            items.push(format!(r#"<li class="nav-item"><a class="nav-link" href="{}">Labels</a></li>"#, paths::LABELS));
            items.push(format!(r#"<li class="nav-item"><a class="nav-link" href="{}">Tasks</a></li>"#, paths::TASKS));
            format!(
                r#"<span class="navbar-text me-3">{}</span><form method="post" action="{}"><input class="btn btn-outline-light" type="submit" value="Log out"></form>"#,
                escape(&user.username),
                paths::LOGOUT
            )
        }
        None => format!(
            r#"<a class="nav-link" href="{}">Log in</a><a class="nav-link" href="{}">Sign up</a>"#,
            paths::LOGIN,
            paths::USER_CREATE
        ),
    };

    format!(
        r#"<nav class="navbar navbar-expand-lg navbar-dark bg-dark mb-3"><div class="container"><a class="navbar-brand" href="/">{}</a><ul class="navbar-nav me-auto">{}</ul><div class="d-flex">{}</div></div></nav>"#,
        APP_NAME,
        items.concat(),
        right
    )
}

fn flashes(flashes: &[Flash]) -> String {
    flashes
        .iter()
        .map(|flash| {
            format!(
                r#"<div class="alert {}" role="alert">{}</div>"#,
                flash.level.css_class(),
                escape(&flash.message)
            )
        })
        .collect()
}

/// Full HTML document.
pub fn page(ctx: &PageContext, title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {app}</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css">
</head>
<body class="d-flex flex-column min-vh-100">
{nav}
<main class="container flex-grow-1">
{flashes}
<h1 class="my-4">{title}</h1>
{content}
</main>
</body>
</html>
"#,
        title = escape(title),
        app = APP_NAME,
        nav = navigation(ctx.user.as_ref()),
        flashes = flashes(&ctx.flashes),
        content = content,
    )
}

/// Bare page for 404 and 500 responses.
pub fn error_page(status: StatusCode) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let ctx = PageContext::new(None, Vec::new());
    page(
        &ctx,
        &format!("{} {}", status.as_u16(), reason),
        &format!(r#"<p><a href="/">Back to {}</a></p>"#, APP_NAME),
    )
}

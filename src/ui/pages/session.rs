//! Index and login pages.

use crate::constants::APP_NAME;
use crate::forms::LoginForm;
use crate::ui::html::{escape, input, link, non_field_errors, post_form};
use crate::ui::layout::{page, PageContext};
use crate::web::paths;

pub fn index(ctx: &PageContext) -> String {
    let content = match &ctx.user {
        Some(user) => format!(
            r#"<p class="lead">Hello, {}!</p><p>{}</p>"#,
            escape(&user.full_name()),
            link(paths::TASKS, "Go to your tasks")
        ),
        None => format!(
            r#"<p class="lead">Plan work with statuses, labels and executors.</p><p>{} or {}</p>"#,
            link(paths::LOGIN, "Log in"),
            link(paths::USER_CREATE, "sign up")
        ),
    };
    page(ctx, APP_NAME, &content)
}

/// The password is never rendered back.
pub fn login(ctx: &PageContext, form: &LoginForm) -> String {
    let fields = [
        non_field_errors(&form.errors),
        input("text", "username", "Username", &form.username, &form.errors, None),
        input("password", "password", "Password", "", &form.errors, None),
    ]
    .concat();
    page(ctx, "Login", &post_form(paths::LOGIN, &fields, "Log in"))
}

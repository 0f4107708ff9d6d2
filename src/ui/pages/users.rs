//! User list, registration, profile and delete pages.

use crate::entities::user;
use crate::forms::UserForm;
use crate::ui::html::{escape, input, link, non_field_errors, post_form};
use crate::ui::layout::{page, PageContext};
use crate::utils::datetime::format_timestamp;
use crate::web::paths;

use super::{delete_confirmation, table};

pub fn list(ctx: &PageContext, users: &[user::Model]) -> String {
    let rows: Vec<String> = users
        .iter()
        .map(|user| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{} {}</td></tr>",
                user.id,
                escape(&user.username),
                escape(&user.full_name()),
                format_timestamp(&user.created_at),
                link(&paths::user_update(user.id), "Update"),
                link(&paths::user_delete(user.id), "Delete"),
            )
        })
        .collect();
    page(
        ctx,
        "Users",
        &table(&["ID", "Username", "Full name", "Created at", ""], &rows),
    )
}

fn fields(form: &UserForm, min_password_length: usize) -> String {
    let help = format!("Your password must contain at least {} characters.", min_password_length);
    [
        non_field_errors(&form.errors),
        input("text", "first_name", "First name", &form.first_name, &form.errors, None),
        input("text", "last_name", "Last name", &form.last_name, &form.errors, None),
        input(
            "text",
            "username",
            "Username",
            &form.username,
            &form.errors,
            Some("Required. 150 characters or fewer. Letters, digits and @/./+/-/_ only."),
        ),
        input("password", "password1", "Password", "", &form.errors, Some(help.as_str())),
        input(
            "password",
            "password2",
            "Password confirmation",
            "",
            &form.errors,
            Some("Enter the same password as before, for verification."),
        ),
    ]
    .concat()
}

pub fn create(ctx: &PageContext, form: &UserForm, min_password_length: usize) -> String {
    page(
        ctx,
        "Registration",
        &post_form(paths::USER_CREATE, &fields(form, min_password_length), "Register"),
    )
}

pub fn update(ctx: &PageContext, id: i32, form: &UserForm, min_password_length: usize) -> String {
    page(
        ctx,
        "Update user",
        &post_form(&paths::user_update(id), &fields(form, min_password_length), "Update"),
    )
}

pub fn delete(ctx: &PageContext, user: &user::Model) -> String {
    page(
        ctx,
        "Deleting user",
        &delete_confirmation(&paths::user_delete(user.id), &user.full_name()),
    )
}

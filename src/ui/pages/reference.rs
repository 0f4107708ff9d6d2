//! Pages shared by statuses and labels, which are both a bare name.

use chrono::{DateTime, Utc};

use crate::forms::NameForm;
use crate::ui::html::{escape, input, link, non_field_errors, post_form};
use crate::ui::layout::{page, PageContext};
use crate::utils::datetime::format_timestamp;

use super::{delete_confirmation, table};

/// Titles and routes of one reference resource.
pub struct Resource {
    pub list_title: &'static str,
    pub create_title: &'static str,
    pub update_title: &'static str,
    pub delete_title: &'static str,
    pub create_link: &'static str,
    pub create_path: &'static str,
    pub update_path: fn(i32) -> String,
    pub delete_path: fn(i32) -> String,
}

/// A row of the list page.
pub struct Row<'a> {
    pub id: i32,
    pub name: &'a str,
    pub created_at: &'a DateTime<Utc>,
}

pub fn list(ctx: &PageContext, resource: &Resource, rows: &[Row<'_>]) -> String {
    let rows: Vec<String> = rows
        .iter()
        .map(|row| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{} {}</td></tr>",
                row.id,
                escape(row.name),
                format_timestamp(row.created_at),
                link(&(resource.update_path)(row.id), "Update"),
                link(&(resource.delete_path)(row.id), "Delete"),
            )
        })
        .collect();
    let content = format!(
        r#"<p>{}</p>{}"#,
        link(resource.create_path, resource.create_link),
        table(&["ID", "Name", "Created at", ""], &rows)
    );
    page(ctx, resource.list_title, &content)
}

fn fields(form: &NameForm) -> String {
    [
        non_field_errors(&form.errors),
        input("text", "name", "Name", &form.name, &form.errors, None),
    ]
    .concat()
}

pub fn create(ctx: &PageContext, resource: &Resource, form: &NameForm) -> String {
    page(
        ctx,
        resource.create_title,
        &post_form(resource.create_path, &fields(form), "Create"),
    )
}

pub fn update(ctx: &PageContext, resource: &Resource, id: i32, form: &NameForm) -> String {
    page(
        ctx,
        resource.update_title,
        &post_form(&(resource.update_path)(id), &fields(form), "Update"),
    )
}

pub fn delete(ctx: &PageContext, resource: &Resource, id: i32, name: &str) -> String {
    page(
        ctx,
        resource.delete_title,
        &delete_confirmation(&(resource.delete_path)(id), name),
    )
}

//! Task list with its filter form, detail, form and delete pages.

use crate::entities::{label, status, task, user};
use crate::filter::TaskFilter;
use crate::forms::{FormErrors, TaskForm};
use crate::repositories::TaskDetails;
use crate::ui::html::{checkbox, escape, input, link, non_field_errors, post_form, select, textarea, SelectOption};
use crate::ui::layout::{page, PageContext};
use crate::utils::datetime::format_timestamp;
use crate::web::paths;

use super::{delete_confirmation, table};

/// Rows a task may point at, loaded once per page.
pub struct Choices<'a> {
    pub statuses: &'a [status::Model],
    pub users: &'a [user::Model],
    pub labels: &'a [label::Model],
}

fn status_options(statuses: &[status::Model], selected: impl Fn(i32) -> bool) -> Vec<SelectOption> {
    statuses
        .iter()
        .map(|status| SelectOption {
            value: status.id,
            label: status.name.clone(),
            selected: selected(status.id),
        })
        .collect()
}

fn user_options(users: &[user::Model], selected: impl Fn(i32) -> bool) -> Vec<SelectOption> {
    users
        .iter()
        .map(|user| SelectOption {
            value: user.id,
            label: user.full_name(),
            selected: selected(user.id),
        })
        .collect()
}

fn label_options(labels: &[label::Model], selected: impl Fn(i32) -> bool) -> Vec<SelectOption> {
    labels
        .iter()
        .map(|label| SelectOption {
            value: label.id,
            label: label.name.clone(),
            selected: selected(label.id),
        })
        .collect()
}

fn filter_form(choices: &Choices<'_>, filter: &TaskFilter) -> String {
    let no_errors = FormErrors::default();
    let fields = [
        select(
            "status",
            "Status",
            &status_options(choices.statuses, |id| filter.status.id() == Some(id)),
            false,
            &no_errors,
        ),
        select(
            "executor",
            "Executor",
            &user_options(choices.users, |id| filter.executor.id() == Some(id)),
            false,
            &no_errors,
        ),
        select(
            "labels",
            "Label",
            &label_options(choices.labels, |id| filter.label.id() == Some(id)),
            false,
            &no_errors,
        ),
        checkbox("self_tasks", "Only my tasks", filter.self_tasks),
    ]
    .concat();
    let reset = if filter.is_empty() {
        String::new()
    } else {
        format!(r#" <a class="btn btn-outline-secondary" href="{}">Reset</a>"#, paths::TASKS)
    };
    format!(
        r#"<div class="card mb-3"><div class="card-body bg-light"><form method="get" action="{}">{}<input class="btn btn-primary" type="submit" value="Show">{}</form></div></div>"#,
        paths::TASKS,
        fields,
        reset
    )
}

pub fn list(ctx: &PageContext, tasks: &[TaskDetails], choices: &Choices<'_>, filter: &TaskFilter) -> String {
    let rows: Vec<String> = tasks
        .iter()
        .map(|details| {
            let task = &details.task;
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{} {}</td></tr>",
                task.id,
                link(&paths::task_detail(task.id), &task.name),
                escape(&details.status.name),
                escape(&details.author.full_name()),
                escape(&details.executor.full_name()),
                format_timestamp(&task.created_at),
                link(&paths::task_update(task.id), "Update"),
                link(&paths::task_delete(task.id), "Delete"),
            )
        })
        .collect();

    let content = format!(
        "<p>{}</p>{}{}",
        link(paths::TASK_CREATE, "Create task"),
        filter_form(choices, filter),
        table(
            &["ID", "Name", "Status", "Author", "Executor", "Created at", ""],
            &rows
        )
    );
    page(ctx, "Tasks", &content)
}

pub fn detail(ctx: &PageContext, details: &TaskDetails) -> String {
    let task = &details.task;
    let labels: String = details
        .labels
        .iter()
        .map(|label| format!(r#"<li class="list-inline-item badge bg-secondary">{}</li>"#, escape(&label.name)))
        .collect();
    let content = format!(
        r#"<div class="card"><div class="card-header bg-secondary text-white"><h2 class="h4">{name}</h2></div><div class="card-body bg-light"><p>{description}</p><hr><dl class="row"><dt class="col-3">Author</dt><dd class="col-9">{author}</dd><dt class="col-3">Executor</dt><dd class="col-9">{executor}</dd><dt class="col-3">Status</dt><dd class="col-9">{status}</dd><dt class="col-3">Created at</dt><dd class="col-9">{created}</dd></dl><h3 class="h6">Labels:</h3><ul class="list-inline">{labels}</ul><p>{update} {delete}</p></div></div>"#,
        name = escape(&task.name),
        description = escape(&task.description),
        author = escape(&details.author.full_name()),
        executor = escape(&details.executor.full_name()),
        status = escape(&details.status.name),
        created = format_timestamp(&task.created_at),
        labels = labels,
        update = link(&paths::task_update(task.id), "Update"),
        delete = link(&paths::task_delete(task.id), "Delete"),
    );
    page(ctx, "Task view", &content)
}

fn fields(form: &TaskForm, choices: &Choices<'_>) -> String {
    [
        non_field_errors(&form.errors),
        input("text", "name", "Name", &form.name, &form.errors, None),
        textarea("description", "Description", &form.description, &form.errors),
        select(
            "status",
            "Status",
            &status_options(choices.statuses, |id| form.is_selected("status", id)),
            false,
            &form.errors,
        ),
        select(
            "executor",
            "Executor",
            &user_options(choices.users, |id| form.is_selected("executor", id)),
            false,
            &form.errors,
        ),
        select(
            "labels",
            "Labels",
            &label_options(choices.labels, |id| form.is_selected("labels", id)),
            true,
            &form.errors,
        ),
    ]
    .concat()
}

pub fn create(ctx: &PageContext, form: &TaskForm, choices: &Choices<'_>) -> String {
    page(
        ctx,
        "Create task",
        &post_form(paths::TASK_CREATE, &fields(form, choices), "Create"),
    )
}

pub fn update(ctx: &PageContext, id: i32, form: &TaskForm, choices: &Choices<'_>) -> String {
    page(
        ctx,
        "Update task",
        &post_form(&paths::task_update(id), &fields(form, choices), "Update"),
    )
}

pub fn delete(ctx: &PageContext, task: &task::Model) -> String {
    page(
        ctx,
        "Delete task",
        &delete_confirmation(&paths::task_delete(task.id), &task.name),
    )
}

//! Status pages.

use super::reference::{self, Resource, Row};
use crate::entities::status;
use crate::forms::NameForm;
use crate::ui::layout::PageContext;
use crate::web::paths;

const STATUSES: Resource = Resource {
    list_title: "Statuses",
    create_title: "Create status",
    update_title: "Update status",
    delete_title: "Status deleting",
    create_link: "Create status",
    create_path: paths::STATUS_CREATE,
    update_path: paths::status_update,
    delete_path: paths::status_delete,
};

pub fn list(ctx: &PageContext, statuses: &[status::Model]) -> String {
    let rows: Vec<Row<'_>> = statuses
        .iter()
        .map(|status| Row {
            id: status.id,
            name: &status.name,
            created_at: &status.created_at,
        })
        .collect();
    reference::list(ctx, &STATUSES, &rows)
}

pub fn create(ctx: &PageContext, form: &NameForm) -> String {
    reference::create(ctx, &STATUSES, form)
}

pub fn update(ctx: &PageContext, id: i32, form: &NameForm) -> String {
    reference::update(ctx, &STATUSES, id, form)
}

pub fn delete(ctx: &PageContext, status: &status::Model) -> String {
    reference::delete(ctx, &STATUSES, status.id, &status.name)
}

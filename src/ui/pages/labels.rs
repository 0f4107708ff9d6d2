//! Label pages.

use super::reference::{self, Resource, Row};
use crate::entities::label;
use crate::forms::NameForm;
use crate::ui::layout::PageContext;
use crate::web::paths;

const LABELS: Resource = Resource {
    list_title: "Labels",
    create_title: "Create label",
    update_title: "Update label",
    delete_title: "Label deleting",
    create_link: "Create label",
    create_path: paths::LABEL_CREATE,
    update_path: paths::label_update,
    delete_path: paths::label_delete,
};

pub fn list(ctx: &PageContext, labels: &[label::Model]) -> String {
    let rows: Vec<Row<'_>> = labels
        .iter()
        .map(|label| Row {
            id: label.id,
            name: &label.name,
            created_at: &label.created_at,
        })
        .collect();
    reference::list(ctx, &LABELS, &rows)
}

pub fn create(ctx: &PageContext, form: &NameForm) -> String {
    reference::create(ctx, &LABELS, form)
}

pub fn update(ctx: &PageContext, id: i32, form: &NameForm) -> String {
    reference::update(ctx, &LABELS, id, form)
}

pub fn delete(ctx: &PageContext, label: &label::Model) -> String {
    reference::delete(ctx, &LABELS, label.id, &label.name)
}

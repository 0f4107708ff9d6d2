//! One module per resource.

pub mod labels;
pub mod reference;
pub mod session;
pub mod statuses;
pub mod tasks;
pub mod users;

use super::html::{escape, post_form};

/// Confirmation page content shared by every delete route.
pub(crate) fn delete_confirmation(action: &str, name: &str) -> String {
    post_form(
        action,
        &format!(r#"<p class="lead">Are you sure you want to delete the {}?</p>"#, escape(name)),
        "Yes, delete",
    )
}

/// `<table>` with a header row and already rendered body rows.
pub(crate) fn table(headers: &[&str], rows: &[String]) -> String {
    let head: String = headers.iter().map(|h| format!("<th>{}</th>", escape(h))).collect();
    format!(
        r#"<table class="table table-striped"><thead><tr>{}</tr></thead><tbody>{}</tbody></table>"#,
        head,
        rows.concat()
    )
}

//! Small HTML building blocks shared by the pages.

use std::fmt::Write;

use crate::forms::FormErrors;

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// One `<option>` of a select input.
pub struct SelectOption {
    pub value: i32,
    pub label: String,
    pub selected: bool,
}

fn field_errors(errors: &FormErrors, name: &str) -> String {
    errors
        .field(name)
        .iter()
        .map(|message| format!(r#"<div class="invalid-feedback d-block">{}</div>"#, escape(message)))
        .collect()
}

fn control_class(errors: &FormErrors, name: &str) -> &'static str {
    if errors.has(name) {
        "form-control is-invalid"
    } else {
        "form-control"
    }
}

/// Errors that belong to the form as a whole.
pub fn non_field_errors(errors: &FormErrors) -> String {
    errors
        .non_field()
        .iter()
        .map(|message| format!(r#"<div class="alert alert-danger">{}</div>"#, escape(message)))
        .collect()
}

/// Labelled `<input>`; `kind` is the input type.
pub fn input(kind: &str, name: &str, label: &str, value: &str, errors: &FormErrors, help: Option<&str>) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="mb-3"><label class="form-label" for="id_{name}">{label}</label><input type="{kind}" name="{name}" id="id_{name}" class="{class}" placeholder="{label}" value="{value}">"#,
        name = name,
        kind = kind,
        label = escape(label),
        class = control_class(errors, name),
        value = escape(value),
    );
    html.push_str(&field_errors(errors, name));
    if let Some(help) = help {
        let _ = write!(html, r#"<div class="form-text">{}</div>"#, escape(help));
    }
    html.push_str("</div>");
    html
}

pub fn textarea(name: &str, label: &str, value: &str, errors: &FormErrors) -> String {
    format!(
        r#"<div class="mb-3"><label class="form-label" for="id_{name}">{label}</label><textarea name="{name}" id="id_{name}" class="{class}" placeholder="{label}" rows="10" cols="40">{value}</textarea>{errors}</div>"#,
        name = name,
        label = escape(label),
        class = control_class(errors, name),
        value = escape(value),
        errors = field_errors(errors, name),
    )
}

/// Labelled `<select>`. Single selects start with an empty choice.
pub fn select(name: &str, label: &str, options: &[SelectOption], multiple: bool, errors: &FormErrors) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="mb-3"><label class="form-label" for="id_{name}">{label}</label><select name="{name}" id="id_{name}" class="{class}"{multiple}>"#,
        name = name,
        label = escape(label),
        class = control_class(errors, name),
        multiple = if multiple { " multiple" } else { "" },
    );
    if !multiple {
        html.push_str(r#"<option value="">---------</option>"#);
    }
    for option in options {
        let _ = write!(
            html,
            r#"<option value="{}"{}>{}</option>"#,
            option.value,
            if option.selected { " selected" } else { "" },
            escape(&option.label)
        );
    }
    html.push_str("</select>");
    html.push_str(&field_errors(errors, name));
    html.push_str("</div>");
    html
}

pub fn checkbox(name: &str, label: &str, checked: bool) -> String {
    format!(
        r#"<div class="mb-3 form-check"><input type="checkbox" name="{name}" id="id_{name}" class="form-check-input"{checked}><label class="form-check-label" for="id_{name}">{label}</label></div>"#,
        name = name,
        label = escape(label),
        checked = if checked { " checked" } else { "" },
    )
}

/// `<form method="post">` wrapping `fields` with a submit button.
pub fn post_form(action: &str, fields: &str, submit: &str) -> String {
    format!(
        r#"<form method="post" action="{}">{}<input class="btn btn-primary" type="submit" value="{}"></form>"#,
        escape(action),
        fields,
        escape(submit)
    )
}

pub fn link(href: &str, text: &str) -> String {
    format!(r#"<a href="{}">{}</a>"#, escape(href), escape(text))
}

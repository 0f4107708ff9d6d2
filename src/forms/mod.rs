//! Form parsing and field validation.
//!
//! Handlers receive url-encoded bodies as key/value pairs (repeated keys such
//! as `labels` are kept). Each form collects its field errors in
//! [`FormErrors`]; a form with errors is rendered again instead of saved.

pub mod login;
pub mod reference;
pub mod task;
pub mod user;

pub use login::LoginForm;
pub use reference::NameForm;
pub use task::TaskForm;
pub use user::UserForm;

use crate::constants::ERROR_FIELD_REQUIRED;

/// Decoded `application/x-www-form-urlencoded` body.
#[derive(Clone, Debug, Default)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Last value submitted for `key`, or an empty string.
    pub fn get(&self, key: &str) -> &str {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Every value submitted for `key`, in order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}

/// Validation errors keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: Vec<(&'static str, String)>,
    non_field: Vec<String>,
}

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.push((field, message.into()));
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    /// Messages attached to `field`.
    pub fn field(&self, field: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
            .collect()
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.iter().any(|(name, _)| *name == field)
    }

    pub fn non_field(&self) -> &[String] {
        &self.non_field
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }
}

/// Record "required" for an empty value. Returns true when a value is present.
pub(crate) fn require(errors: &mut FormErrors, field: &'static str, value: &str) -> bool {
    if value.is_empty() {
        errors.add(field, ERROR_FIELD_REQUIRED);
        false
    } else {
        true
    }
}

/// Record a length error when `value` has more than `max` characters.
pub(crate) fn max_length(errors: &mut FormErrors, field: &'static str, value: &str, max: usize) -> bool {
    let length = value.chars().count();
    if length > max {
        errors.add(
            field,
            format!("Ensure this value has at most {} characters (it has {}).", max, length),
        );
        false
    } else {
        true
    }
}

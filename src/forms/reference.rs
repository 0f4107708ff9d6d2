//! Single-field form shared by statuses and labels.

use sea_orm::ConnectionTrait;

use super::{max_length, require, FormData, FormErrors};
use crate::constants::{ERROR_LABEL_EXISTS, ERROR_STATUS_EXISTS, MAX_REFERENCE_NAME_LENGTH};
use crate::error::AppResult;
use crate::repositories::{LabelRepository, StatusRepository};

#[derive(Clone, Debug, Default)]
pub struct NameForm {
    pub name: String,
    pub errors: FormErrors,
}

impl NameForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            name: data.get("name").trim().to_string(),
            errors: FormErrors::default(),
        }
    }

    pub fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            errors: FormErrors::default(),
        }
    }

    fn clean(&mut self) -> bool {
        require(&mut self.errors, "name", &self.name)
            && max_length(&mut self.errors, "name", &self.name, MAX_REFERENCE_NAME_LENGTH)
    }
}

/// Validate a status name; `exclude` is the status being edited.
pub async fn validate_status<C>(conn: &C, form: &mut NameForm, exclude: Option<i32>) -> AppResult<bool>
where
    C: ConnectionTrait,
{
    if form.clean() && StatusRepository::name_taken(conn, &form.name, exclude).await? {
        form.errors.add("name", ERROR_STATUS_EXISTS);
    }
    Ok(form.errors.is_empty())
}

/// Validate a label name; `exclude` is the label being edited.
pub async fn validate_label<C>(conn: &C, form: &mut NameForm, exclude: Option<i32>) -> AppResult<bool>
where
    C: ConnectionTrait,
{
    if form.clean() && LabelRepository::name_taken(conn, &form.name, exclude).await? {
        form.errors.add("name", ERROR_LABEL_EXISTS);
    }
    Ok(form.errors.is_empty())
}

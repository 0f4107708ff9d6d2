//! Task creation and update form.

use sea_orm::ConnectionTrait;

use super::{max_length, require, FormData, FormErrors};
use crate::constants::{ERROR_INVALID_CHOICE, ERROR_TASK_EXISTS, MAX_TASK_NAME_LENGTH};
use crate::entities::task;
use crate::error::AppResult;
use crate::repositories::{LabelRepository, StatusRepository, TaskChanges, TaskRepository, UserRepository};

/// Raw task form values; choices stay as submitted so the form can be
/// rendered back unchanged.
#[derive(Clone, Debug, Default)]
pub struct TaskForm {
    pub name: String,
    pub description: String,
    pub status: String,
    pub executor: String,
    pub labels: Vec<String>,
    pub errors: FormErrors,
}

impl TaskForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            name: data.get("name").trim().to_string(),
            description: data.get("description").trim().to_string(),
            status: data.get("status").trim().to_string(),
            executor: data.get("executor").trim().to_string(),
            labels: data
                .get_all("labels")
                .into_iter()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .collect(),
            errors: FormErrors::default(),
        }
    }

    pub fn from_model(task: &task::Model, label_ids: &[i32]) -> Self {
        Self {
            name: task.name.clone(),
            description: task.description.clone(),
            status: task.status_id.to_string(),
            executor: task.executor_id.to_string(),
            labels: label_ids.iter().map(i32::to_string).collect(),
            errors: FormErrors::default(),
        }
    }

    /// Whether `id` is among the submitted choices for `field`.
    pub fn is_selected(&self, field: &str, id: i32) -> bool {
        let id = id.to_string();
        match field {
            "status" => self.status == id,
            "executor" => self.executor == id,
            "labels" => self.labels.contains(&id),
            _ => false,
        }
    }

    /// Validate all fields; `exclude` is the task being edited.
    pub async fn validate<C>(&mut self, conn: &C, exclude: Option<i32>) -> AppResult<Option<TaskChanges>>
    where
        C: ConnectionTrait,
    {
        if require(&mut self.errors, "name", &self.name)
            && max_length(&mut self.errors, "name", &self.name, MAX_TASK_NAME_LENGTH)
            && TaskRepository::name_taken(conn, &self.name, exclude).await?
        {
            self.errors.add("name", ERROR_TASK_EXISTS);
        }

        let mut status_id = None;
        if require(&mut self.errors, "status", &self.status) {
            status_id = match parse_id(&self.status) {
                Some(id) => StatusRepository::get_by_id(conn, id).await?.map(|s| s.id),
                None => None,
            };
            if status_id.is_none() {
                self.errors.add("status", ERROR_INVALID_CHOICE);
            }
        }

        let mut executor_id = None;
        if require(&mut self.errors, "executor", &self.executor) {
            executor_id = match parse_id(&self.executor) {
                Some(id) => UserRepository::get_by_id(conn, id).await?.map(|u| u.id),
                None => None,
            };
            if executor_id.is_none() {
                self.errors.add("executor", ERROR_INVALID_CHOICE);
            }
        }

        let mut label_ids: Vec<i32> = Vec::new();
        let mut unknown_labels: Vec<&str> = Vec::new();
        for raw in &self.labels {
            match parse_id(raw) {
                Some(id) if !label_ids.contains(&id) => label_ids.push(id),
                Some(_) => {}
                None => unknown_labels.push(raw),
            }
        }
        let existing = LabelRepository::get_by_ids(conn, &label_ids).await?;
        for raw in &self.labels {
            if let Some(id) = parse_id(raw) {
                if !existing.iter().any(|label| label.id == id) && !unknown_labels.contains(&raw.as_str()) {
                    unknown_labels.push(raw);
                }
            }
        }
        if let Some(first) = unknown_labels.first() {
            self.errors.add(
                "labels",
                format!("Select a valid choice. {} is not one of the available choices.", first),
            );
        }

        match (status_id, executor_id) {
            (Some(status_id), Some(executor_id)) if self.errors.is_empty() => Ok(Some(TaskChanges {
                name: self.name.clone(),
                description: self.description.clone(),
                status_id,
                executor_id,
                label_ids,
            })),
            _ => Ok(None),
        }
    }
}

fn parse_id(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok().filter(|id| *id > 0)
}

//! Query-parameter filter for the task list.
//!
//! `GET /tasks/?status=1&executor=2&labels=3&self_tasks=on` maps onto a
//! conjunction of column filters. Empty parameters mean "any"; a parameter
//! that is not an id makes the whole filter match nothing.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect, QueryTrait, Select};

use crate::entities::{task, task_label};

/// One choice parameter of the filter form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Choice {
    #[default]
    Any,
    Id(i32),
    /// Raw value that is not an id
    Invalid(String),
}

impl Choice {
    fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Choice::Any;
        }
        match raw.parse::<i32>() {
            Ok(id) if id > 0 => Choice::Id(id),
            _ => Choice::Invalid(raw.to_string()),
        }
    }

    pub fn id(&self) -> Option<i32> {
        match self {
            Choice::Id(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Choice::Invalid(_))
    }
}

/// Filter applied to the task list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Choice,
    pub executor: Choice,
    pub label: Choice,
    /// Only tasks authored by the current user
    pub self_tasks: bool,
}

impl TaskFilter {
    /// Build the filter from decoded query pairs. Repeated keys: last wins.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut filter = TaskFilter::default();
        for (key, value) in pairs {
            match key.as_str() {
                "status" => filter.status = Choice::parse(value),
                "executor" => filter.executor = Choice::parse(value),
                "labels" => filter.label = Choice::parse(value),
                "self_tasks" => filter.self_tasks = !value.trim().is_empty(),
                _ => {}
            }
        }
        filter
    }

    /// True when some parameter could not be understood.
    pub fn matches_nothing(&self) -> bool {
        self.status.is_invalid() || self.executor.is_invalid() || self.label.is_invalid()
    }

    /// True when no parameter narrows the list.
    pub fn is_empty(&self) -> bool {
        *self == TaskFilter::default()
    }

    /// Narrow `query` to the tasks matching this filter.
    pub fn apply(&self, mut query: Select<task::Entity>, current_user_id: i32) -> Select<task::Entity> {
        if let Some(status_id) = self.status.id() {
            query = query.filter(task::Column::StatusId.eq(status_id));
        }
        if let Some(executor_id) = self.executor.id() {
            query = query.filter(task::Column::ExecutorId.eq(executor_id));
        }
        if let Some(label_id) = self.label.id() {
            query = query.filter(
                task::Column::Id.in_subquery(
                    task_label::Entity::find()
                        .filter(task_label::Column::LabelId.eq(label_id))
                        .select_only()
                        .column(task_label::Column::TaskId)
                        .into_query(),
                ),
            );
        }
        if self.self_tasks {
            query = query.filter(task::Column::AuthorId.eq(current_user_id));
        }
        query
    }
}

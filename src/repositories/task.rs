//! Task repository for database operations.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::entities::{label, status, task, task_label, user};
use crate::error::{AppError, AppResult};
use crate::filter::TaskFilter;

/// Validated task fields coming from the task form.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskChanges {
    pub name: String,
    pub description: String,
    pub status_id: i32,
    pub executor_id: i32,
    /// Distinct ids of existing labels
    pub label_ids: Vec<i32>,
}

/// A task together with the rows it references, ready for display.
#[derive(Clone, Debug)]
pub struct TaskDetails {
    pub task: task::Model,
    pub status: status::Model,
    pub author: user::Model,
    pub executor: user::Model,
    pub labels: Vec<label::Model>,
}

/// Repository for task-related database operations.
pub struct TaskRepository;

impl TaskRepository {
    /// Get all tasks ordered by id.
    pub async fn get_all<C>(conn: &C) -> AppResult<Vec<task::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(task::Entity::find().order_by_asc(task::Column::Id).all(conn).await?)
    }

    /// Get the tasks matching a list filter.
    pub async fn get_filtered<C>(conn: &C, filter: &TaskFilter, current_user_id: i32) -> AppResult<Vec<task::Model>>
    where
        C: ConnectionTrait,
    {
        if filter.matches_nothing() {
            return Ok(Vec::new());
        }
        Ok(filter
            .apply(task::Entity::find(), current_user_id)
            .order_by_asc(task::Column::Id)
            .all(conn)
            .await?)
    }

    /// Get a single task by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> AppResult<Option<task::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(task::Entity::find_by_id(id).one(conn).await?)
    }

    /// Number of stored tasks.
    pub async fn count<C>(conn: &C) -> AppResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(task::Entity::find().count(conn).await?)
    }

    /// Whether another task already uses `name`.
    pub async fn name_taken<C>(conn: &C, name: &str, exclude: Option<i32>) -> AppResult<bool>
    where
        C: ConnectionTrait,
    {
        let mut query = task::Entity::find().filter(task::Column::Name.eq(name));
        if let Some(id) = exclude {
            query = query.filter(task::Column::Id.ne(id));
        }
        Ok(query.count(conn).await? > 0)
    }

    /// Ids of the labels attached to a task.
    pub async fn get_label_ids<C>(conn: &C, task_id: i32) -> AppResult<Vec<i32>>
    where
        C: ConnectionTrait,
    {
        Ok(task_label::Entity::find()
            .filter(task_label::Column::TaskId.eq(task_id))
            .order_by_asc(task_label::Column::LabelId)
            .all(conn)
            .await?
            .into_iter()
            .map(|link| link.label_id)
            .collect())
    }

    /// Resolve status, author, executor and labels for each task.
    pub async fn with_details<C>(conn: &C, tasks: Vec<task::Model>) -> AppResult<Vec<TaskDetails>>
    where
        C: ConnectionTrait,
    {
        if tasks.is_empty() {
            return Ok(Vec::new());
        }

        let statuses: HashMap<i32, status::Model> = status::Entity::find()
            .all(conn)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();
        let users: HashMap<i32, user::Model> = user::Entity::find()
            .all(conn)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();
        let labels: HashMap<i32, label::Model> = label::Entity::find()
            .all(conn)
            .await?
            .into_iter()
            .map(|l| (l.id, l))
            .collect();

        let task_ids: Vec<i32> = tasks.iter().map(|t| t.id).collect();
        let mut task_labels: HashMap<i32, Vec<label::Model>> = HashMap::new();
        for link in task_label::Entity::find()
            .filter(task_label::Column::TaskId.is_in(task_ids))
            .order_by_asc(task_label::Column::LabelId)
            .all(conn)
            .await?
        {
            if let Some(label) = labels.get(&link.label_id) {
                task_labels.entry(link.task_id).or_default().push(label.clone());
            }
        }

        tasks
            .into_iter()
            .map(|task| -> AppResult<TaskDetails> {
                let task_id = task.id;
                let dangling = |what: &str| AppError::Internal(format!("task {} references a missing {}", task_id, what));
                Ok(TaskDetails {
                    status: statuses.get(&task.status_id).cloned().ok_or_else(|| dangling("status"))?,
                    author: users.get(&task.author_id).cloned().ok_or_else(|| dangling("author"))?,
                    executor: users.get(&task.executor_id).cloned().ok_or_else(|| dangling("executor"))?,
                    labels: task_labels.remove(&task.id).unwrap_or_default(),
                    task,
                })
            })
            .collect()
    }

    /// Load one task with its details.
    pub async fn get_details<C>(conn: &C, id: i32) -> AppResult<Option<TaskDetails>>
    where
        C: ConnectionTrait,
    {
        let Some(task) = Self::get_by_id(conn, id).await? else {
            return Ok(None);
        };
        Ok(Self::with_details(conn, vec![task]).await?.pop())
    }

    /// Create a task authored by `author_id` and attach its labels.
    pub async fn create<C>(conn: &C, author_id: i32, changes: TaskChanges) -> AppResult<task::Model>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = conn.begin().await?;

        let model = task::ActiveModel {
            name: ActiveValue::Set(changes.name),
            description: ActiveValue::Set(changes.description),
            status_id: ActiveValue::Set(changes.status_id),
            author_id: ActiveValue::Set(author_id),
            executor_id: ActiveValue::Set(changes.executor_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        let task = model.insert(&txn).await?;
        Self::replace_labels(&txn, task.id, &changes.label_ids).await?;

        txn.commit().await?;
        Ok(task)
    }

    /// Update a task's fields and replace its labels. The author never changes.
    pub async fn update<C>(conn: &C, task: task::Model, changes: TaskChanges) -> AppResult<task::Model>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = conn.begin().await?;

        let mut active_model: task::ActiveModel = task.into();
        active_model.name = ActiveValue::Set(changes.name);
        active_model.description = ActiveValue::Set(changes.description);
        active_model.status_id = ActiveValue::Set(changes.status_id);
        active_model.executor_id = ActiveValue::Set(changes.executor_id);
        let task = active_model.update(&txn).await?;
        Self::replace_labels(&txn, task.id, &changes.label_ids).await?;

        txn.commit().await?;
        Ok(task)
    }

    /// Delete a task and its label links.
    pub async fn delete<C>(conn: &C, task: task::Model) -> AppResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = conn.begin().await?;
        task_label::Entity::delete_many()
            .filter(task_label::Column::TaskId.eq(task.id))
            .exec(&txn)
            .await?;
        task.delete(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn replace_labels<C>(conn: &C, task_id: i32, label_ids: &[i32]) -> AppResult<()>
    where
        C: ConnectionTrait,
    {
        task_label::Entity::delete_many()
            .filter(task_label::Column::TaskId.eq(task_id))
            .exec(conn)
            .await?;

        if label_ids.is_empty() {
            return Ok(());
        }

        let links = label_ids.iter().map(|label_id| task_label::ActiveModel {
            task_id: ActiveValue::Set(task_id),
            label_id: ActiveValue::Set(*label_id),
        });
        task_label::Entity::insert_many(links).exec_without_returning(conn).await?;
        Ok(())
    }
}

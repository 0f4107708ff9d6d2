//! Label repository for database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::entities::{label, task_label};
use crate::error::{AppError, AppResult};

/// Repository for label-related database operations.
pub struct LabelRepository;

impl LabelRepository {
    /// Get all labels in creation order.
    pub async fn get_all<C>(conn: &C) -> AppResult<Vec<label::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(label::Entity::find().order_by_asc(label::Column::Id).all(conn).await?)
    }

    /// Get a single label by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> AppResult<Option<label::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(label::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get a single label by name.
    pub async fn get_by_name<C>(conn: &C, name: &str) -> AppResult<Option<label::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(label::Entity::find().filter(label::Column::Name.eq(name)).one(conn).await?)
    }

    /// Get the labels among `ids` that exist.
    pub async fn get_by_ids<C>(conn: &C, ids: &[i32]) -> AppResult<Vec<label::Model>>
    where
        C: ConnectionTrait,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(label::Entity::find()
            .filter(label::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(label::Column::Id)
            .all(conn)
            .await?)
    }

    /// Whether another label already uses `name`.
    pub async fn name_taken<C>(conn: &C, name: &str, exclude: Option<i32>) -> AppResult<bool>
    where
        C: ConnectionTrait,
    {
        let mut query = label::Entity::find().filter(label::Column::Name.eq(name));
        if let Some(id) = exclude {
            query = query.filter(label::Column::Id.ne(id));
        }
        Ok(query.count(conn).await? > 0)
    }

    /// Insert a new label.
    pub async fn create<C>(conn: &C, name: &str) -> AppResult<label::Model>
    where
        C: ConnectionTrait,
    {
        let model = label::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        Ok(model.insert(conn).await?)
    }

    /// Update a label's name.
    pub async fn rename<C>(conn: &C, label: label::Model, name: &str) -> AppResult<label::Model>
    where
        C: ConnectionTrait,
    {
        let mut active_model: label::ActiveModel = label.into();
        active_model.name = ActiveValue::Set(name.to_string());
        Ok(active_model.update(conn).await?)
    }

    /// Whether the label is attached to at least one task.
    pub async fn is_in_use<C>(conn: &C, id: i32) -> AppResult<bool>
    where
        C: ConnectionTrait,
    {
        let count = task_label::Entity::find()
            .filter(task_label::Column::LabelId.eq(id))
            .count(conn)
            .await?;
        Ok(count > 0)
    }

    /// Delete a label that no task carries.
    pub async fn delete<C>(conn: &C, id: i32) -> AppResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = conn.begin().await?;

        let label = Self::get_by_id(&txn, id)
            .await?
            .ok_or_else(|| AppError::not_found("Label", id))?;

        if Self::is_in_use(&txn, id).await? {
            return Err(AppError::Protected(format!("label '{}' is attached to tasks", label.name)));
        }

        label.delete(&txn).await?;
        txn.commit().await?;
        Ok(())
    }
}

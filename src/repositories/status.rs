//! Status repository for database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::entities::{status, task};
use crate::error::{AppError, AppResult};

/// Repository for status-related database operations.
pub struct StatusRepository;

impl StatusRepository {
    /// Get all statuses ordered by id.
    pub async fn get_all<C>(conn: &C) -> AppResult<Vec<status::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(status::Entity::find().order_by_asc(status::Column::Id).all(conn).await?)
    }

    /// Get a single status by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> AppResult<Option<status::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(status::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get a single status by name.
    pub async fn get_by_name<C>(conn: &C, name: &str) -> AppResult<Option<status::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(status::Entity::find().filter(status::Column::Name.eq(name)).one(conn).await?)
    }

    /// Whether another status already uses `name`.
    pub async fn name_taken<C>(conn: &C, name: &str, exclude: Option<i32>) -> AppResult<bool>
    where
        C: ConnectionTrait,
    {
        let mut query = status::Entity::find().filter(status::Column::Name.eq(name));
        if let Some(id) = exclude {
            query = query.filter(status::Column::Id.ne(id));
        }
        Ok(query.count(conn).await? > 0)
    }

    /// Insert a new status.
    pub async fn create<C>(conn: &C, name: &str) -> AppResult<status::Model>
    where
        C: ConnectionTrait,
    {
        let model = status::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        Ok(model.insert(conn).await?)
    }

    /// Change the name of an existing status.
    pub async fn rename<C>(conn: &C, status: status::Model, name: &str) -> AppResult<status::Model>
    where
        C: ConnectionTrait,
    {
        let mut active_model: status::ActiveModel = status.into();
        active_model.name = ActiveValue::Set(name.to_string());
        Ok(active_model.update(conn).await?)
    }

    /// Whether any task references the status.
    pub async fn is_in_use<C>(conn: &C, id: i32) -> AppResult<bool>
    where
        C: ConnectionTrait,
    {
        let count = task::Entity::find().filter(task::Column::StatusId.eq(id)).count(conn).await?;
        Ok(count > 0)
    }

    /// Delete a status unless a task still references it.
    pub async fn delete<C>(conn: &C, id: i32) -> AppResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = conn.begin().await?;

        let status = Self::get_by_id(&txn, id)
            .await?
            .ok_or_else(|| AppError::not_found("Status", id))?;

        if Self::is_in_use(&txn, id).await? {
            return Err(AppError::Protected(format!("status '{}' is referenced by tasks", status.name)));
        }

        status.delete(&txn).await?;
        txn.commit().await?;
        Ok(())
    }
}

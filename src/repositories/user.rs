//! User repository for database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::entities::{task, user};
use crate::error::{AppError, AppResult};

/// Validated account fields, with the password already hashed.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

/// Repository for user-related database operations.
pub struct UserRepository;

impl UserRepository {
    /// Get all users in registration order.
    pub async fn get_all<C>(conn: &C) -> AppResult<Vec<user::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find().order_by_asc(user::Column::Id).all(conn).await?)
    }

    /// Get a single user by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> AppResult<Option<user::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get a single user by username (exact, case-sensitive).
    pub async fn get_by_username<C>(conn: &C, username: &str) -> AppResult<Option<user::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(conn)
            .await?)
    }

    /// Whether another account already uses `username`.
    pub async fn username_taken<C>(conn: &C, username: &str, exclude: Option<i32>) -> AppResult<bool>
    where
        C: ConnectionTrait,
    {
        let mut query = user::Entity::find().filter(user::Column::Username.eq(username));
        if let Some(id) = exclude {
            query = query.filter(user::Column::Id.ne(id));
        }
        Ok(query.count(conn).await? > 0)
    }

    /// Register a new user.
    pub async fn create<C>(conn: &C, new_user: NewUser) -> AppResult<user::Model>
    where
        C: ConnectionTrait,
    {
        let model = user::ActiveModel {
            username: ActiveValue::Set(new_user.username),
            first_name: ActiveValue::Set(new_user.first_name),
            last_name: ActiveValue::Set(new_user.last_name),
            password_hash: ActiveValue::Set(new_user.password_hash),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        Ok(model.insert(conn).await?)
    }

    /// Overwrite the profile and password of an existing user.
    pub async fn update<C>(conn: &C, user: user::Model, changes: NewUser) -> AppResult<user::Model>
    where
        C: ConnectionTrait,
    {
        let mut active_model: user::ActiveModel = user.into();
        active_model.username = ActiveValue::Set(changes.username);
        active_model.first_name = ActiveValue::Set(changes.first_name);
        active_model.last_name = ActiveValue::Set(changes.last_name);
        active_model.password_hash = ActiveValue::Set(changes.password_hash);
        Ok(active_model.update(conn).await?)
    }

    /// Whether the user authored or executes any task.
    pub async fn is_in_use<C>(conn: &C, id: i32) -> AppResult<bool>
    where
        C: ConnectionTrait,
    {
        let count = task::Entity::find()
            .filter(
                Condition::any()
                    .add(task::Column::AuthorId.eq(id))
                    .add(task::Column::ExecutorId.eq(id)),
            )
            .count(conn)
            .await?;
        Ok(count > 0)
    }

    /// Delete a user who is not attached to any task.
    pub async fn delete<C>(conn: &C, id: i32) -> AppResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = conn.begin().await?;

        let user = Self::get_by_id(&txn, id)
            .await?
            .ok_or_else(|| AppError::not_found("User", id))?;

        if Self::is_in_use(&txn, id).await? {
            return Err(AppError::Protected(format!("user '{}' has tasks", user.username)));
        }

        user.delete(&txn).await?;
        txn.commit().await?;
        Ok(())
    }
}

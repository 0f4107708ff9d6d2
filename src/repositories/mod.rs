//! Repository layer for database operations.
//!
//! This module provides repository structs that encapsulate database queries
//! and operations, following the Data Mapper pattern recommended by SeaORM.
//! Repositories keep entities as pure data models while providing reusable
//! database access methods. Deletions that would orphan a task fail with
//! [`AppError::Protected`](crate::error::AppError::Protected) and leave the
//! database untouched.

pub mod label;
pub mod status;
pub mod task;
pub mod user;

pub use label::LabelRepository;
pub use status::StatusRepository;
pub use task::{TaskChanges, TaskDetails, TaskRepository};
pub use user::{NewUser, UserRepository};

//! Local storage module managing the relational schema
//!
//! This module opens the SeaORM connection and creates the tables for:
//! - Users
//! - Statuses
//! - Labels
//! - Tasks
//! - Task-label relationships

pub mod db;

pub use db::Storage;

//! Task manager - a small multi-user task tracker served over HTTP
//!
//! Registered users create tasks, give them a status, an executor and any
//! number of labels, and filter the task list. Pages are rendered on the
//! server and forms are plain url-encoded posts.
//!
//! # Modules
//!
//! * [`config`] - Application configuration management
//! * [`storage`] - Database connection and schema
//! * [`repositories`] - Queries and protected deletes
//! * [`forms`] - Form parsing and validation
//! * [`web`] - Router, session middleware and handlers
//! * [`ui`] - HTML pages

/// Password hashing, sessions and the signed-in user extractors
pub mod auth;

/// Configuration module for managing application settings
pub mod config;

/// Flash messages, validation errors and field limits
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Error type returned by repositories and handlers
pub mod error;

/// Task list filter built from query parameters
pub mod filter;

/// Form parsing and validation
pub mod forms;

/// Logging setup for the `log` facade
pub mod logger;

/// Repository layer for database operations
pub mod repositories;

/// Database connection and schema creation
pub mod storage;

/// Server-side HTML rendering
pub mod ui;

/// Utility functions for date/time formatting
pub mod utils;

/// HTTP server, routes and handlers
pub mod web;

// Re-export entity models for convenient access
pub use entities::{label, status, task, task_label, user};

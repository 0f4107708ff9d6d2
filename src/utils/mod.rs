//! Utility modules for the task manager.
//!
//! - [`datetime`] - Timestamp formatting used by the list and detail pages

pub mod datetime;

//! Constants used throughout the application
//!
//! This module centralizes flash messages, validation errors and other
//! user-facing text so handlers, pages and tests agree on the wording.

// Authentication Messages
pub const ERROR_NOT_SIGNED_IN: &str = "You are not signed in! Please, sign in";
pub const ERROR_INVALID_LOGIN: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";
pub const SUCCESS_LOGGED_IN: &str = "You are logged in";
pub const SUCCESS_LOGGED_OUT: &str = "You are logged out";

// User Messages
pub const SUCCESS_USER_REGISTERED: &str = "User registration was successful";
pub const SUCCESS_USER_UPDATED: &str = "The user has been successfully updated";
pub const SUCCESS_USER_DELETED: &str = "The user was successfully deleted";
pub const ERROR_USER_FOREIGN: &str = "You don't have the rights to modify another user.";
pub const ERROR_USER_IN_USE: &str = "Unable to delete the user because it is in use";

// Status Messages
pub const SUCCESS_STATUS_CREATED: &str = "The status was successfully created";
pub const SUCCESS_STATUS_UPDATED: &str = "The status was successfully updated";
pub const SUCCESS_STATUS_DELETED: &str = "The status was successfully deleted";
pub const ERROR_STATUS_IN_USE: &str = "The status cannot be deleted because it is in use";

// Label Messages
pub const SUCCESS_LABEL_CREATED: &str = "The label was successfully created";
pub const SUCCESS_LABEL_UPDATED: &str = "The label was successfully updated";
pub const SUCCESS_LABEL_DELETED: &str = "The label was successfully deleted";
pub const ERROR_LABEL_IN_USE: &str = "The label cannot be deleted because it is in use";

// Task Messages
pub const SUCCESS_TASK_CREATED: &str = "The task was successfully created";
pub const SUCCESS_TASK_UPDATED: &str = "The task was successfully updated";
pub const SUCCESS_TASK_DELETED: &str = "The task was successfully deleted";
pub const ERROR_TASK_NOT_AUTHOR: &str = "Only the author can delete the task";

// Validation Error Messages
pub const ERROR_FIELD_REQUIRED: &str = "This field is required.";
pub const ERROR_INVALID_CHOICE: &str = "Select a valid choice. That choice is not one of the available choices.";
pub const ERROR_INVALID_USERNAME: &str =
    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";
pub const ERROR_USERNAME_TAKEN: &str = "A user with that username already exists.";
pub const ERROR_PASSWORD_MISMATCH: &str = "The entered passwords do not match.";
pub const ERROR_STATUS_EXISTS: &str = "Status with this name already exists.";
pub const ERROR_LABEL_EXISTS: &str = "Label with this name already exists.";
pub const ERROR_TASK_EXISTS: &str = "Task with this name already exists.";

// Field Limits
/// Maximum length of a username and of a task name
pub const MAX_USERNAME_LENGTH: usize = 150;
pub const MAX_TASK_NAME_LENGTH: usize = 150;
/// Maximum length of a status or label name
pub const MAX_REFERENCE_NAME_LENGTH: usize = 100;

// Application Messages
pub const CONFIG_GENERATED: &str = "Generated default configuration file";
pub const APP_NAME: &str = "Task manager";

/// Display format for creation timestamps
pub const DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M";

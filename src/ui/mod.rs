//! Server-side HTML rendering.
//!
//! Pages are plain functions from already loaded models to an HTML string.
//! [`layout::page`] wraps the page content with the navigation bar and the
//! pending flash messages.

pub mod html;
pub mod layout;
pub mod pages;

pub use layout::PageContext;

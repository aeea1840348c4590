//! Task API Library
//!
//! A small task-management REST service: an axum HTTP layer over a
//! repository that stores id/title/description records in `PostgreSQL`
//! (or in memory for development and tests).

pub mod api;
pub mod domain;
pub mod infrastructure;

//! Core library for Taskdesk
//!
//! This crate contains the task data service:
//! - Task and subtask model
//! - Search and boundary validation
//! - In-memory and JSON file backed stores

pub mod error;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

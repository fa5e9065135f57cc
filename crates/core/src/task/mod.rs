//! Task module
//!
//! This module contains task-related types and logic.

mod demo;
mod document;
mod file_store;
mod id;
mod memory_store;
mod model;
mod repository;
mod search;
pub mod validation;

#[cfg(test)]
mod conformance;

pub use demo::demo_tasks;
pub use document::TaskDocument;
pub use file_store::FileTaskStore;
pub use id::IdGenerator;
pub use memory_store::InMemoryTaskStore;
pub use model::*;
pub use repository::TaskRepository;
pub use search::filter_tasks;

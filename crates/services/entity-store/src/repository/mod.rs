//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod base;
mod document_repository;

pub use base::{CrudRepository, DeleteRepository, EntityRepository, ReadRepository, WriteRepository};
pub use document_repository::DocumentRepository;

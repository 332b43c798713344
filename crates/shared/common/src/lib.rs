//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Store and repository error types
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{
    OptionExt, RepositoryError, RepositoryResult, StoreError, StoreErrorKind, StoreResult,
};

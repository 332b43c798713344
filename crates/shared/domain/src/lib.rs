//! Domain layer - Entity and identifier contracts.
//!
//! This crate contains the types a caller implements to persist its own
//! records. It has no storage dependencies.

pub mod constants;
pub mod entity;
pub mod identifier;

pub use constants::*;
pub use entity::Entity;
pub use identifier::Identifier;

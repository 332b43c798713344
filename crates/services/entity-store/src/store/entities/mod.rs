//! SeaORM entity definitions for the document table.

pub mod document;

//! Identifier keys.

use std::fmt::Debug;

use uuid::Uuid;

/// Opaque key addressing a single entity within a collection.
///
/// Stores address documents by string key, so every identifier renders
/// itself as one. No validation happens here; whether a key is acceptable
/// is up to the store.
pub trait Identifier: Debug + Clone + Send + Sync + 'static {
    /// Render the identifier as the store key
    fn to_key(&self) -> String;
}

impl Identifier for String {
    fn to_key(&self) -> String {
        self.clone()
    }
}

impl Identifier for Uuid {
    fn to_key(&self) -> String {
        self.to_string()
    }
}

macro_rules! integer_identifier {
    ($($ty:ty),*) => {
        $(
            impl Identifier for $ty {
                fn to_key(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

integer_identifier!(i32, i64, u32, u64);

//! Entity contract for stored records.

use serde::{de::DeserializeOwned, Serialize};

use crate::constants::DEFAULT_COLLECTION;
use crate::identifier::Identifier;

/// A caller-defined record that can be persisted and retrieved by identifier.
///
/// The repository never looks inside an entity. It only needs to turn it into
/// a document and back, and to know which collection it lives in. The
/// identifier is expected under the `_id` field of the serialized form, e.g.
/// `#[serde(rename = "_id")] id: Option<String>`.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Identifier type used to address a single instance
    type Id: Identifier;

    /// Collection the entity is stored in
    const COLLECTION: &'static str = DEFAULT_COLLECTION;
}

//! Document-level constants.
//!
//! These constants define how entities are laid out inside the store.

// =============================================================================
// Document Layout
// =============================================================================

/// Field holding the identifier of every stored document
pub const ID_FIELD: &str = "_id";

/// Collection used when an entity does not name one
pub const DEFAULT_COLLECTION: &str = "documents";

/// Maximum length of a collection name
pub const MAX_COLLECTION_NAME_LENGTH: usize = 120;

/// Check if a collection name can be used by the store
pub fn is_valid_collection(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_COLLECTION_NAME_LENGTH
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_collection_names() {
        assert!(is_valid_collection("groups"));
        assert!(is_valid_collection("user_details"));
        assert!(is_valid_collection("content.posts-v2"));
    }

    #[test]
    fn test_invalid_collection_names() {
        assert!(!is_valid_collection(""));
        assert!(!is_valid_collection("has space"));
        assert!(!is_valid_collection(&"x".repeat(MAX_COLLECTION_NAME_LENGTH + 1)));
    }
}

//! Error types for facetset core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in facetset core operations.
///
/// Configuration errors (`EmptyExtractors`, `DuplicateExtractor`,
/// `UnresolvedExtractor`, `ElementTypeMismatch`) are only produced by
/// constructors and snapshot import; when one is returned, no usable
/// instance exists. `UnknownExtractor` is the call-time precondition
/// violation for queries against a name that was never registered.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The extractor set to index is empty.
    #[error("extractor set is empty: at least one extractor is required")]
    EmptyExtractors,

    /// Two extractors were registered under the same name.
    #[error("duplicate extractor name: {name}")]
    DuplicateExtractor {
        /// The colliding name.
        name: String,
    },

    /// A name could not be resolved against the element type's accessors.
    #[error("element type {element_type} has no accessor named {name}")]
    UnresolvedExtractor {
        /// The name that failed to resolve.
        name: String,
        /// The element type searched.
        element_type: String,
    },

    /// A query referenced an extractor that is not registered.
    #[error("extractor {name} is not indexed")]
    UnknownExtractor {
        /// The unregistered name.
        name: String,
    },

    /// A snapshot was produced for a different element type.
    #[error("snapshot element type mismatch: expected {expected}, got {actual}")]
    ElementTypeMismatch {
        /// The element type of the importing set.
        expected: String,
        /// The element type recorded in the snapshot.
        actual: String,
    },
}

impl CoreError {
    /// Creates a duplicate extractor error.
    pub fn duplicate_extractor(name: impl Into<String>) -> Self {
        Self::DuplicateExtractor { name: name.into() }
    }

    /// Creates an unresolved extractor error.
    pub fn unresolved_extractor(
        name: impl Into<String>,
        element_type: impl Into<String>,
    ) -> Self {
        Self::UnresolvedExtractor {
            name: name.into(),
            element_type: element_type.into(),
        }
    }

    /// Creates an unknown extractor error.
    pub fn unknown_extractor(name: impl Into<String>) -> Self {
        Self::UnknownExtractor { name: name.into() }
    }

    /// Creates an element type mismatch error.
    pub fn element_type_mismatch(
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ElementTypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

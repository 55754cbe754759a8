//! Error types for the data layer.
//!
//! All errors are propagated via [`DbError`]. Driver errors from
//! [`mongodb`] are flattened into [`DbError::StoreUnavailable`] with the
//! driver's message preserved for logging.

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The store could not be reached, timed out, or rejected the query.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// A stored document does not fit the entity descriptor.
    #[error("cannot decode document {document_id} in `{collection}`: {reason}")]
    Decode {
        /// Collection the document was read from.
        collection: String,
        /// The document's `_id`, rendered for logs.
        document_id: String,
        /// What did not match.
        reason: String,
    },

    /// A configuration error (bad connection string, unknown policy).
    #[error("configuration error: {0}")]
    Config(String),
}

impl DbError {
    /// Check if this error means the store itself could not be used.
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }

    /// Check if this error was caused by a malformed document.
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

impl From<mongodb::error::Error> for DbError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}

//! Error types for stroyka-core.

use thiserror::Error;

use crate::calc::CalcError;

/// Result type alias using stroyka-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside a single calculator run.
///
/// Calculator failures are local values ([`CalcError`]) carried inside a
/// `CalculationResult`; this type covers the store boundary and configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Knowledge store failure (connection, query, corruption)
    #[error("Knowledge store error: {0}")]
    Storage(String),

    /// Search produced nothing
    #[error("Nothing found for '{query}'")]
    NotFound { query: String },

    /// Lookup by id failed
    #[error("{entity} #{id} not found")]
    EntityNotFound { entity: &'static str, id: i64 },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Calculator error surfaced through a fallible API
    #[error(transparent)]
    Calculation(#[from] CalcError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create a not-found error for a search query.
    pub fn not_found(query: impl Into<String>) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    /// Create an entity-not-found error.
    pub fn entity_not_found(entity: &'static str, id: i64) -> Self {
        Self::EntityNotFound { entity, id }
    }

    /// Whether the error came from the store rather than from the request itself.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Internal(_))
    }
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

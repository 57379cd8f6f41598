//! Unified error type for diy-projects.
//!
//! Failures fall into two families: business conditions the caller can act
//! on ([`Error::NotFound`], [`Error::InvalidInput`]) and infrastructure
//! failures while talking to the store ([`Error::Database`]).

use std::fmt;

/// Error type shared by every diy-projects crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "project", "category").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// A database operation failed. The enclosing transaction has been
    /// rolled back.
    #[error("Database error: {source}")]
    Database {
        /// The underlying database error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Caller-supplied data was rejected before reaching the store.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::Database`].
    pub fn database(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Database {
            source: source.into(),
        }
    }

    /// Convenience constructor for [`Error::InvalidInput`].
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_database(&self) -> bool {
        matches!(self, Error::Database { .. })
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

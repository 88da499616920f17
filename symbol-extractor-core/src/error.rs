//! Error types for symbol extraction.

use crate::model::SymbolId;
use std::io;
use thiserror::Error;

/// Boxed transport error carried as the cause of a connection failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure to link the flat response records into a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Two records in one response share the same id.
    #[error("duplicate symbol id {0} in response")]
    DuplicateId(SymbolId),

    /// A record names a parent id that no record in the response carries.
    #[error("symbol {id} refers to unknown parent {parent}")]
    MissingParent { id: SymbolId, parent: SymbolId },
}

/// Error types that can occur during one extraction call.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The request to the service could not complete.
    #[error("Request to server {endpoint} failed")]
    Connection {
        endpoint: String,
        #[source]
        source: BoxError,
    },

    /// I/O error while packing the sources directory.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The response body is not a JSON array of symbol records.
    #[error("Failed to decode server response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The records could not be linked into a tree.
    #[error("Failed to resolve symbol tree: {0}")]
    Resolve(#[from] ResolveError),

    /// Non-success status, only reported when status checking is enabled.
    #[error("Server responded with status {status}")]
    Status { status: u16, body: String },

    /// The HTTP request could not be built.
    #[error("Invalid request: {0}")]
    Request(String),
}

impl ExtractError {
    pub fn connection(endpoint: impl Into<String>, source: impl Into<BoxError>) -> Self {
        ExtractError::Connection {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, ExtractError::Connection { .. })
    }
}

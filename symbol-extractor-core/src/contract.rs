//! # contract: the transport seam between the pipeline and the extraction service
//!
//! The pipeline in [`crate::extract`] only knows the [`SymbolService`] trait. The
//! real implementation is the HTTP client in the `symbol-extractor` crate; tests
//! use the generated `MockSymbolService`.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so consumers can generate deterministic
//!   mocks for unit/integration tests (feature `test-export-mocks`, on by default).

use async_trait::async_trait;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::error::ExtractError;

/// Raw response of the service, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ServiceResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Submits a sources archive to a symbol-extraction service.
///
/// Implementors must issue exactly one request per call and map any failure to
/// complete it to [`ExtractError::Connection`]. A received response is returned
/// as-is, non-success statuses included.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait SymbolService: Send + Sync {
    /// Upload the gzip-compressed tarball and return the raw response.
    async fn submit(&self, archive: Vec<u8>) -> Result<ServiceResponse, ExtractError>;

    /// Endpoint the service talks to, for logs and error messages.
    fn endpoint(&self) -> String;
}

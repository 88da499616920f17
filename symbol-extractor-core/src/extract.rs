//! High-level pipeline: archive → submit → resolve for one sources directory.
//!
//! Stages run strictly in sequence and fail fast. There are no retries and no
//! partial results: either the full [`SymbolTree`] comes back or an
//! [`ExtractError`] does.
//!
//! # Error Handling
//! - archive creation: filesystem errors unchanged, as [`ExtractError::Io`]
//! - submit: whatever the [`SymbolService`] reports, normally [`ExtractError::Connection`]
//! - status: only checked when [`ExtractOptions::check_status`] is set
//! - body: [`ExtractError::Decode`] or [`ExtractError::Resolve`]

use std::path::Path;
use tracing::{debug, error, info};

use crate::archive::{archive_digest, create_archive};
use crate::config::ClientConfig;
use crate::contract::SymbolService;
use crate::error::ExtractError;
use crate::model::SymbolTree;
use crate::resolve::parse_symbols;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub check_status: bool,
}

impl From<&ClientConfig> for ExtractOptions {
    fn from(config: &ClientConfig) -> Self {
        ExtractOptions {
            check_status: config.check_status,
        }
    }
}

pub async fn extract<S>(
    service: &S,
    sources_dir: &Path,
    options: ExtractOptions,
) -> Result<SymbolTree, ExtractError>
where
    S: SymbolService + ?Sized,
{
    let endpoint = service.endpoint();
    info!(sources_dir = %sources_dir.display(), endpoint = %endpoint, "Starting symbol extraction");

    let archive = create_archive(sources_dir)?;
    info!(
        size = archive.len(),
        sha256 = %archive_digest(&archive),
        "Sources archived"
    );

    let response = service.submit(archive).await.map_err(|e| {
        error!(error = %e, endpoint = %endpoint, "Submitting sources failed");
        e
    })?;
    info!(status = response.status, bytes = response.body.len(), "Received response");

    if !response.is_success() {
        if options.check_status {
            let body = String::from_utf8_lossy(&response.body).into_owned();
            error!(status = response.status, body = %body, "Server rejected the request");
            return Err(ExtractError::Status {
                status: response.status,
                body,
            });
        }
        debug!(status = response.status, "Non-success status ignored; decoding body anyway");
    }

    let tree = parse_symbols(&response.body)?;
    info!(symbols = tree.len(), roots = tree.roots().len(), "Symbol extraction complete");
    Ok(tree)
}

#![doc = "HTTP transport for the extraction service: implements the core `SymbolService` seam with reqwest."]
//
//! # Upload (client <-> extraction service)
//!
//! [`HttpSymbolService`] issues one multipart `POST` per archive to
//! `{host}:{port}/`. The form has a single file part named `sources`, file name
//! `archive.tgz`, whose content type is `multipart/form-data` (the service
//! expects exactly that value on the part).
//!
//! Any response that arrives is handed back untouched, error statuses included;
//! deciding what to do with the status is the pipeline's business. Failing to
//! get a response at all (DNS, refused connection, timeout, truncated body)
//! becomes [`ExtractError::Connection`] with the reqwest error as its source.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;

pub use symbol_extractor_core::contract::{ServiceResponse, SymbolService};
use symbol_extractor_core::archive::ARCHIVE_FILENAME;
use symbol_extractor_core::config::ClientConfig;
use symbol_extractor_core::ExtractError;

/// Form field carrying the archive.
pub const SOURCES_FIELD: &str = "sources";
/// Content type declared on the archive part.
pub const SOURCES_PART_MIME: &str = "multipart/form-data";

pub struct HttpSymbolService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSymbolService {
    pub fn new(config: &ClientConfig) -> Result<Self, ExtractError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| {
            tracing::error!(error = ?e, "Failed to build HTTP client");
            ExtractError::Request(e.to_string())
        })?;
        let endpoint = config.endpoint();
        tracing::info!(
            endpoint = %endpoint,
            timeout_secs = ?config.timeout_secs,
            "Initialized HttpSymbolService"
        );
        Ok(HttpSymbolService { client, endpoint })
    }
}

#[async_trait]
impl SymbolService for HttpSymbolService {
    async fn submit(&self, archive: Vec<u8>) -> Result<ServiceResponse, ExtractError> {
        tracing::info!(
            endpoint = %self.endpoint,
            size = archive.len(),
            "Uploading sources archive"
        );
        let part = Part::bytes(archive)
            .file_name(ARCHIVE_FILENAME)
            .mime_str(SOURCES_PART_MIME)
            .map_err(|e| ExtractError::Request(e.to_string()))?;
        let form = Form::new().part(SOURCES_FIELD, part);

        let response = match self.client.post(&self.endpoint).multipart(form).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = ?e, endpoint = %self.endpoint, "Request to server failed");
                return Err(ExtractError::connection(&self.endpoint, e));
            }
        };

        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(body) => {
                tracing::info!(status, bytes = body.len(), "Server responded");
                Ok(ServiceResponse {
                    status,
                    body: body.to_vec(),
                })
            }
            Err(e) => {
                tracing::error!(error = ?e, status, "Failed to read response body");
                Err(ExtractError::connection(&self.endpoint, e))
            }
        }
    }

    fn endpoint(&self) -> String {
        self.endpoint.clone()
    }
}

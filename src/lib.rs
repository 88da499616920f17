//! Client for a remote symbol-extraction service.
//!
//! [`extract_symbols`] packs a sources directory into `archive.tgz`, uploads it
//! to `{host}:{port}/` and returns the symbols from the response with their parent
//! links resolved. Data model, resolver and pipeline live in
//! `symbol-extractor-core`; this crate adds the HTTP transport, the config loader
//! and the CLI.

pub mod cli;
pub mod load_config;
pub mod upload;

use std::path::Path;

pub use cli::{run, Cli, Commands};
pub use symbol_extractor_core::config::{ClientConfig, DEFAULT_HOST, DEFAULT_PORT};
pub use symbol_extractor_core::extract::ExtractOptions;
pub use symbol_extractor_core::{
    ExtractError, Location, ResolveError, Symbol, SymbolId, SymbolTree,
};
pub use upload::HttpSymbolService;

/// Extracts the symbols of `sources_dir` from the service at `{host}:{port}/`.
///
/// Use [`DEFAULT_HOST`] and [`DEFAULT_PORT`] for a locally running service.
pub async fn extract_symbols(
    sources_dir: impl AsRef<Path>,
    host: &str,
    port: u16,
) -> Result<Vec<Symbol>, ExtractError> {
    let config = ClientConfig::new(host, port);
    let tree = extract_symbols_with(sources_dir.as_ref(), &config).await?;
    Ok(tree.into_symbols())
}

/// Like [`extract_symbols`], with full configuration, returning the tree.
pub async fn extract_symbols_with(
    sources_dir: &Path,
    config: &ClientConfig,
) -> Result<SymbolTree, ExtractError> {
    let service = HttpSymbolService::new(config)?;
    symbol_extractor_core::extract::extract(&service, sources_dir, ExtractOptions::from(config))
        .await
}

/// Blocking form of [`extract_symbols`] for callers without an async runtime.
///
/// Runs on a private current-thread runtime. Called from inside a tokio runtime
/// it returns [`ExtractError::Request`] instead of blocking that runtime.
pub fn extract_symbols_blocking(
    sources_dir: impl AsRef<Path>,
    host: &str,
    port: u16,
) -> Result<Vec<Symbol>, ExtractError> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(ExtractError::Request(
            "extract_symbols_blocking called from within an async runtime; use extract_symbols"
                .to_string(),
        ));
    }
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(extract_symbols(sources_dir, host, port))
}

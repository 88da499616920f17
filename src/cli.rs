//! # symbol-extractor CLI Interface (Module)
//!
//! Command parsing and the async [`run`] entrypoint shared by `main()` and the
//! integration tests. All extraction logic lives in `symbol-extractor-core`;
//! this module only wires configuration, transport and output together.
//!
//! Configuration precedence, lowest first: YAML file (`--config`), environment
//! (`SYMBOL_EXTRACTOR_HOST`, `SYMBOL_EXTRACTOR_PORT`), command-line flags.

use crate::load_config::resolve_config;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use symbol_extractor_core::SymbolTree;

/// CLI for symbol-extractor: send document sources to the extraction service.
#[derive(Parser)]
#[clap(
    name = "symbol-extractor",
    version,
    about = "Upload document sources to a symbol-extraction service and print the recognized symbols"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract the mathematical symbols of a sources directory
    Extract {
        /// Directory holding the document sources
        #[clap(long)]
        sources: PathBuf,
        /// Path to the YAML config file
        #[clap(long)]
        config: Option<PathBuf>,
        /// Service scheme and host, e.g. http://127.0.0.1
        #[clap(long)]
        host: Option<String>,
        /// Service port
        #[clap(long)]
        port: Option<u16>,
        /// Fail on non-success HTTP status instead of decoding the body
        #[clap(long)]
        check_status: bool,
        /// Write the JSON result to this file instead of stdout
        #[clap(long)]
        output: Option<PathBuf>,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Extract {
            sources,
            config,
            host,
            port,
            check_status,
            output,
        } => {
            let mut client_config = resolve_config(config.as_deref())?;
            if let Some(host) = host {
                client_config.host = host;
            }
            if let Some(port) = port {
                client_config.port = port;
            }
            client_config.check_status |= check_status;

            tracing::info!(
                command = "extract",
                sources = %sources.display(),
                endpoint = %client_config.endpoint(),
                "Starting extraction"
            );
            match crate::extract_symbols_with(&sources, &client_config).await {
                Ok(tree) => {
                    tracing::info!(command = "extract", symbols = tree.len(), "Extraction complete");
                    write_symbols(&tree, output.as_deref())
                }
                Err(e) => {
                    eprintln!("[ERROR] Extraction failed: {}", e);
                    tracing::error!(command = "extract", error = ?e, "Extraction failed");
                    Err(anyhow::Error::new(e))
                }
            }
        }
    }
}

fn write_symbols(tree: &SymbolTree, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(tree).context("Failed to serialize symbols")?;
    match output {
        None => {
            println!("{json}");
            Ok(())
        }
        Some(path) => {
            // Write next to the target, then rename, so readers never see a partial file.
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let mut file = tempfile::NamedTempFile::new_in(dir)
                .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
            file.persist(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(output = %path.display(), "Wrote symbols");
            Ok(())
        }
    }
}

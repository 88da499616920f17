#![doc = "symbol-extractor-core: core logic library for symbol-extractor."]

//! This crate contains the data model, archive packing and parent resolution for
//! the symbol-extraction client. The HTTP transport lives in the `symbol-extractor`
//! crate; here it is only described by the [`contract::SymbolService`] trait.
//!
//! # Usage
//! Add this as a dependency for code that needs the symbol types, the resolver,
//! or the archive → submit → resolve pipeline with a custom transport.

pub mod archive;
pub mod config;
pub mod contract;
pub mod error;
pub mod extract;
pub mod model;
pub mod resolve;

pub use error::{ExtractError, ResolveError};
pub use model::{Location, RawSymbol, Symbol, SymbolId, SymbolTree};

//! Two-pass resolution of the service's flat, id-referenced records into a
//! [`SymbolTree`].
//!
//! The first pass builds every [`Symbol`] with its parent unset and remembers the
//! raw parent id per symbol id. The second pass checks each remembered parent id
//! against the symbols built in the first pass and sets the link. Duplicate ids
//! and dangling parent ids both fail the whole call; no partial tree is returned.

use crate::error::{ExtractError, ResolveError};
use crate::model::{RawSymbol, Symbol, SymbolId, SymbolTree};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, error};

pub fn resolve(raw_items: Vec<RawSymbol>) -> Result<SymbolTree, ResolveError> {
    let mut symbols: Vec<Symbol> = Vec::with_capacity(raw_items.len());
    let mut index: HashMap<SymbolId, usize> = HashMap::with_capacity(raw_items.len());
    let mut parents: Vec<Option<SymbolId>> = Vec::with_capacity(raw_items.len());

    for raw in raw_items {
        match index.entry(raw.id) {
            Entry::Occupied(_) => {
                error!(id = raw.id, "Duplicate symbol id in response");
                return Err(ResolveError::DuplicateId(raw.id));
            }
            Entry::Vacant(slot) => {
                slot.insert(symbols.len());
            }
        }
        parents.push(raw.parent);
        symbols.push(Symbol {
            id: raw.id,
            mathml: raw.mathml,
            tex: raw.tex,
            location: raw.location,
            parent: None,
        });
    }

    for (symbol, parent) in symbols.iter_mut().zip(parents) {
        let Some(parent) = parent else { continue };
        if !index.contains_key(&parent) {
            error!(id = symbol.id, parent_id = parent, "Symbol refers to unknown parent");
            return Err(ResolveError::MissingParent {
                id: symbol.id,
                parent,
            });
        }
        symbol.parent = Some(parent);
    }

    debug!(count = symbols.len(), "Resolved symbol tree");
    Ok(SymbolTree::from_resolved(symbols, index))
}

/// Decodes a response body (JSON array of symbol records) and resolves it.
pub fn parse_symbols(body: &[u8]) -> Result<SymbolTree, ExtractError> {
    let raw_items: Vec<RawSymbol> = serde_json::from_slice(body).map_err(|e| {
        error!(error = %e, "Failed to decode symbol records");
        ExtractError::Decode(e)
    })?;
    Ok(resolve(raw_items)?)
}

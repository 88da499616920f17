//! # model: symbols, their locations and the tree that owns them
//!
//! Two families of types live here:
//! - the wire record [`RawSymbol`] deserialized verbatim from
//!   the extraction service's JSON response;
//! - the resolved model ([`Symbol`], [`Location`]) and the owning collection
//!   [`SymbolTree`] produced by [`crate::resolve::resolve`].
//!
//! A symbol's parent is stored as the parent's [`SymbolId`]. The parent itself is
//! always another element of the same [`SymbolTree`], so following the link goes
//! through the tree ([`SymbolTree::parent_of`]) rather than through a pointer.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// Identifier of a symbol, unique within one extraction call.
pub type SymbolId = i64;

/// Bounding box of a symbol on a rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
    /// Zero-based page index.
    pub page: i64,
}

/// One element of the service's JSON array, before parent resolution.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSymbol {
    pub id: SymbolId,
    pub mathml: String,
    pub tex: String,
    pub location: Location,
    /// Id of the enclosing symbol, `null` for roots.
    pub parent: Option<SymbolId>,
}

/// A recognized mathematical symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub id: SymbolId,
    pub mathml: String,
    pub tex: String,
    pub location: Location,
    /// Non-owning link to the parent symbol in the same [`SymbolTree`].
    pub parent: Option<SymbolId>,
}

impl Symbol {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Owning collection of resolved symbols.
///
/// Symbols keep the order in which the service returned them. That order carries
/// no structural meaning; use [`SymbolTree::roots`] and [`SymbolTree::children_of`]
/// to walk the hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTree {
    symbols: Vec<Symbol>,
    index: HashMap<SymbolId, usize>,
}

impl SymbolTree {
    /// Builds a tree from symbols whose parent links have already been checked.
    pub(crate) fn from_resolved(symbols: Vec<Symbol>, index: HashMap<SymbolId, usize>) -> Self {
        SymbolTree { symbols, index }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.index.get(&id).map(|&i| &self.symbols[i])
    }

    /// Follows the symbol's parent link.
    pub fn parent_of(&self, symbol: &Symbol) -> Option<&Symbol> {
        symbol.parent.and_then(|parent| self.get(parent))
    }

    pub fn children_of(&self, id: SymbolId) -> Vec<&Symbol> {
        self.symbols
            .iter()
            .filter(|s| s.parent == Some(id))
            .collect()
    }

    pub fn roots(&self) -> Vec<&Symbol> {
        self.symbols.iter().filter(|s| s.is_root()).collect()
    }

    /// Parent chain of `id`, nearest first. Empty for roots and unknown ids.
    ///
    /// Stops if the chain revisits a symbol, so a cyclic response cannot loop.
    pub fn ancestors(&self, id: SymbolId) -> Vec<&Symbol> {
        let mut chain: Vec<&Symbol> = Vec::new();
        let mut current = self.get(id).and_then(|s| self.parent_of(s));
        while let Some(symbol) = current {
            if symbol.id == id || chain.iter().any(|seen| seen.id == symbol.id) {
                break;
            }
            chain.push(symbol);
            current = self.parent_of(symbol);
        }
        chain
    }
}

impl Serialize for SymbolTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.symbols)
    }
}

impl<'a> IntoIterator for &'a SymbolTree {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}

impl IntoIterator for SymbolTree {
    type Item = Symbol;
    type IntoIter = std::vec::IntoIter<Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.into_iter()
    }
}

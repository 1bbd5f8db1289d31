//! Symbols as answered by the type checker.
//!
//! The optimizer only ever asks one question, "which symbol does this identifier refer to", through
//! [`SymbolResolver`]. [`SymbolTable`] is the plain storage implementing it; [`Binder`] fills one
//! from a tree by lexical name lookup.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tsfold_ast::{DeclarationKind, NodeId};
use tsfold_span::id::{Id, IdAllocator, IdTag};

mod binder;

pub use binder::Binder;

#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
pub struct SymbolIdTag;

impl IdTag for SymbolIdTag {
    const NAME: &'static str = "SymbolId";
}

pub type SymbolId = Id<SymbolIdTag>;
pub type SymbolIdAllocator = IdAllocator<SymbolIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SymbolKind {
    BlockScopedConstant,
    BlockScopedVariable,
    FunctionScopedVariable,
}

impl From<DeclarationKind> for SymbolKind {
    fn from(kind: DeclarationKind) -> Self {
        match kind {
            DeclarationKind::Const => SymbolKind::BlockScopedConstant,
            DeclarationKind::Let => SymbolKind::BlockScopedVariable,
            DeclarationKind::Var => SymbolKind::FunctionScopedVariable,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Symbol {
    pub id: SymbolId,
    pub name: Box<str>,
    pub kind: SymbolKind,
    /// The `VariableDeclaration` introducing this symbol, if any.
    pub value_declaration: Option<NodeId>,
}

impl Symbol {
    pub fn new(id: SymbolId, name: &str, kind: SymbolKind) -> Self {
        Symbol {
            id,
            name: name.into(),
            kind,
            value_declaration: None,
        }
    }

    /// A `const` binding: block scoped and never reassigned after initialization.
    pub fn is_block_scoped_immutable(&self) -> bool {
        self.kind == SymbolKind::BlockScopedConstant
    }
}

/// Read-only view of the type checker's symbol resolution.
pub trait SymbolResolver {
    fn symbol_at_location(&self, identifier: NodeId) -> Option<&Symbol>;
}

impl<T: SymbolResolver + ?Sized> SymbolResolver for &T {
    fn symbol_at_location(&self, identifier: NodeId) -> Option<&Symbol> {
        (**self).symbol_at_location(identifier)
    }
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    ids: SymbolIdAllocator,
    symbols: Vec<Symbol>,
    resolutions: HashMap<NodeId, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(
        &mut self,
        name: &str,
        kind: SymbolKind,
        value_declaration: Option<NodeId>,
    ) -> SymbolId {
        let id = self.ids.next_id();
        let mut symbol = Symbol::new(id, name, kind);
        symbol.value_declaration = value_declaration;
        self.symbols.push(symbol);
        id
    }

    /// Records that `identifier` refers to `symbol`.
    pub fn bind(&mut self, identifier: NodeId, symbol: SymbolId) {
        self.resolutions.insert(identifier, symbol);
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    pub fn resolved_symbol(&self, identifier: NodeId) -> Option<SymbolId> {
        self.resolutions.get(&identifier).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Vec<&Symbol> {
        self.symbols
            .iter()
            .filter(|symbol| &*symbol.name == name)
            .collect()
    }
}

impl SymbolResolver for SymbolTable {
    fn symbol_at_location(&self, identifier: NodeId) -> Option<&Symbol> {
        self.resolved_symbol(identifier)
            .and_then(|symbol| self.get(symbol))
    }
}

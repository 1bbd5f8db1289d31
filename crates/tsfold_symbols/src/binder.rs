use std::collections::{HashMap, HashSet};

use log::debug;
use tsfold_ast::visit::{Visitor, walk_node};
use tsfold_ast::{DeclarationKind, NodeId, NodeKind, Tree};

use crate::{SymbolId, SymbolKind, SymbolTable};

#[derive(Debug, Default)]
struct Scope {
    bindings: HashMap<Box<str>, SymbolId>,
}

/// Resolves identifiers by name against the enclosing `SourceFile` and `Block` scopes.
///
/// Block scoped declarations are visible throughout their block, `var` declarations throughout the
/// whole file. Declaration names resolve to the symbol they declare.
#[derive(Debug, Default)]
pub struct Binder {
    table: SymbolTable,
    scopes: Vec<Scope>,
    declared: HashSet<NodeId>,
}

impl Binder {
    pub fn bind(tree: &Tree) -> SymbolTable {
        let mut binder = Self::default();
        binder.visit_tree(tree);
        binder.table
    }

    fn declare_statements(&mut self, tree: &Tree, statements: &[NodeId]) {
        for statement in statements {
            if let NodeKind::VariableStatement { declaration_list } = tree.kind(*statement) {
                self.declare_list(tree, *declaration_list);
            }
        }
    }

    fn declare_list(&mut self, tree: &Tree, declaration_list: NodeId) {
        if let NodeKind::VariableDeclarationList { kind, declarations } = tree.kind(declaration_list)
        {
            for declaration in declarations {
                self.declare(tree, *kind, *declaration);
            }
        }
    }

    fn declare(&mut self, tree: &Tree, kind: DeclarationKind, declaration: NodeId) {
        if !self.declared.insert(declaration) {
            return;
        }

        let NodeKind::VariableDeclaration { name, .. } = tree.kind(declaration) else {
            return;
        };
        let NodeKind::Identifier { name } = tree.kind(*name) else {
            return;
        };

        let symbol = self.table.declare(name, kind.into(), Some(declaration));
        debug!("Declared {} `{}` as {:?}", kind.as_str(), name, symbol);

        let scope = if kind.is_block_scoped() {
            self.scopes.last_mut()
        } else {
            self.scopes.first_mut()
        };

        if let Some(scope) = scope {
            scope.bindings.insert(name.clone(), symbol);
        }
    }

    fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.bindings.get(name).copied())
    }

    fn with_scope(&mut self, tree: &Tree, id: NodeId, statements: &[NodeId]) {
        self.scopes.push(Scope::default());
        self.declare_statements(tree, statements);
        walk_node(self, tree, id);
        self.scopes.pop();
    }
}

impl<'tree> Visitor<'tree> for Binder {
    fn visit_node(&mut self, tree: &'tree Tree, id: NodeId) {
        match tree.kind(id) {
            NodeKind::SourceFile { statements } | NodeKind::Block { statements } => {
                self.with_scope(tree, id, statements);
            }
            // Declarations nested in constructs without their own statement list.
            NodeKind::VariableDeclarationList { .. } => {
                self.declare_list(tree, id);
                walk_node(self, tree, id);
            }
            NodeKind::Identifier { name } => match self.lookup(name) {
                Some(symbol) => {
                    debug!("Resolved `{}` at {} to {:?}", name, id, symbol);
                    self.table.bind(id, symbol);
                }
                None => debug!("No symbol found for `{}` at {}", name, id),
            },
            _ => walk_node(self, tree, id),
        }
    }
}

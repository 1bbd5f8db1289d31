use log::debug;
use tsfold_ast::{NodeId, NodeKind};

use super::evaluator::{EvalResult, Evaluator};
use crate::value::Value;

impl Evaluator<'_> {
    /// Evaluates an identifier through the `const` declaration it is bound to.
    pub fn resolve_identifier(&mut self, identifier: NodeId) -> EvalResult {
        self.resolving.clear();
        self.try_resolve_identifier(identifier).into()
    }

    pub(super) fn try_resolve_identifier(&mut self, identifier: NodeId) -> Option<Value> {
        let tree = self.tree;
        let symbols = self.symbols;

        if !self.propagate_constants || tree.parent(identifier).is_none() {
            return None;
        }

        // Never substitute the name being declared.
        if tree.is_declaration_name(identifier) {
            return None;
        }

        let symbol = symbols.symbol_at_location(identifier)?;
        if !symbol.is_block_scoped_immutable() {
            return None;
        }

        let declaration = symbol.value_declaration?;
        let NodeKind::VariableDeclaration {
            initializer: Some(initializer),
            ..
        } = *tree.kind(declaration)
        else {
            return None;
        };

        let declaration_list = tree.parent(declaration)?;
        let NodeKind::VariableDeclarationList { kind, .. } = tree.kind(declaration_list) else {
            return None;
        };
        if !kind.is_immutable() {
            return None;
        }

        if !self.resolving.insert(declaration) {
            debug!(
                "Cycle while resolving `{}` through {}, leaving it as is",
                symbol.name, declaration
            );
            return None;
        }

        let value = self.try_eval_expr(initializer);
        self.resolving.remove(&declaration);

        if let Some(value) = &value {
            debug!("Resolved `{}` at {} to {}", symbol.name, identifier, value);
        }

        value
    }
}

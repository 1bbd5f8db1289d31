//! Constant folding, dead branch elimination and `const` propagation in a single pre-order walk.
//!
//! Each visited node is first offered for rewriting. When it is replaced, the walk continues at
//! the replacement, so code exposed by removing a branch is optimized in the same run.

use log::debug;
use tsfold_ast::{NodeId, NodeKind, Tree};

use crate::diagnostic::Diagnostic;
use crate::optimizer::{OptContext, Pass};
use crate::value::Value;

mod evaluator;
mod identifier_resolver;

pub use evaluator::{EvalResult, Evaluator};

enum Rewrite {
    Unchanged,
    Replaced(NodeId),
    Removed,
}

#[derive(Debug, Default)]
pub struct ConstantFolding {
    changed: bool,
}

impl ConstantFolding {
    pub fn new() -> Self {
        Self::default()
    }

    fn visit_node(&mut self, tree: &mut Tree, ctx: &mut OptContext<'_>, id: NodeId) {
        match self.rewrite(tree, ctx, id) {
            Rewrite::Replaced(replacement) => {
                self.changed = true;
                self.visit_node(tree, ctx, replacement);
            }
            Rewrite::Removed => self.changed = true,
            Rewrite::Unchanged => {
                for child in tree.children(id) {
                    self.visit_node(tree, ctx, child);
                }
            }
        }
    }

    fn rewrite(&mut self, tree: &mut Tree, ctx: &mut OptContext<'_>, id: NodeId) -> Rewrite {
        match *tree.kind(id) {
            NodeKind::If {
                condition,
                then_statement,
                else_statement,
            } if ctx.options.eliminate_dead_branches => {
                self.eliminate_branch(tree, ctx, id, condition, then_statement, else_statement)
            }
            NodeKind::Binary { .. } | NodeKind::PrefixUnary { .. }
                if ctx.options.fold_expressions =>
            {
                let result = ctx.evaluator(tree).evaluate(id);
                self.fold(tree, ctx, id, result)
            }
            NodeKind::Identifier { .. }
                if ctx.options.propagate_constants && is_substitution_site(tree, id) =>
            {
                let result = ctx.evaluator(tree).resolve_identifier(id);
                self.fold(tree, ctx, id, result)
            }
            _ => Rewrite::Unchanged,
        }
    }

    fn eliminate_branch(
        &mut self,
        tree: &mut Tree,
        ctx: &mut OptContext<'_>,
        if_statement: NodeId,
        condition: NodeId,
        then_statement: NodeId,
        else_statement: Option<NodeId>,
    ) -> Rewrite {
        let result = ctx.evaluator(tree).evaluate(condition);
        let EvalResult::Literal(value) = result else {
            return Rewrite::Unchanged;
        };

        let selected = if value.is_truthy() {
            Some(then_statement)
        } else {
            else_statement
        };

        debug!(
            "Condition of {} is always {}, keeping {:?}",
            if_statement,
            value.is_truthy(),
            selected
        );

        match selected {
            Some(branch) if ctx.replace_node(tree, if_statement, branch) => {
                Rewrite::Replaced(branch)
            }
            Some(_) => Rewrite::Unchanged,
            None => match tree.remove(if_statement) {
                Ok(Some(placeholder)) => Rewrite::Replaced(placeholder),
                Ok(None) => Rewrite::Removed,
                Err(error) => {
                    ctx.report(Diagnostic::slot_not_found(tree, error, None));
                    Rewrite::Unchanged
                }
            },
        }
    }

    fn fold(
        &mut self,
        tree: &mut Tree,
        ctx: &mut OptContext<'_>,
        id: NodeId,
        result: EvalResult,
    ) -> Rewrite {
        match result {
            EvalResult::Literal(value) => self.install_literal(tree, ctx, id, &value),
            EvalResult::NotReducible => Rewrite::Unchanged,
        }
    }

    fn install_literal(
        &mut self,
        tree: &mut Tree,
        ctx: &mut OptContext<'_>,
        id: NodeId,
        value: &Value,
    ) -> Rewrite {
        let Some(literal) = value.to_literal() else {
            ctx.report(Diagnostic::unmaterializable_literal(tree, id, value));
            return Rewrite::Unchanged;
        };

        debug!("Folding {} {} into {}", tree.kind(id).name(), id, value);

        let literal = tree.add_node(NodeKind::Literal(literal));

        if ctx.replace_node(tree, id, literal) {
            Rewrite::Replaced(literal)
        } else {
            Rewrite::Unchanged
        }
    }
}

/// Identifiers are only substituted where a literal is a drop-in replacement: call arguments and
/// operands of binary expressions, except the target of an assignment.
fn is_substitution_site(tree: &Tree, id: NodeId) -> bool {
    let Some(parent) = tree.parent(id) else {
        return false;
    };

    match tree.kind(parent) {
        NodeKind::Call { arguments, .. } => arguments.contains(&id),
        NodeKind::Binary { left, operator, .. } => !(operator.is_assignment() && *left == id),
        _ => false,
    }
}

impl Pass for ConstantFolding {
    fn optimize(&mut self, tree: &mut Tree, ctx: &mut OptContext<'_>) -> bool {
        self.changed = false;

        if let Some(root) = tree.root() {
            self.visit_node(tree, ctx, root);
        }

        self.changed
    }
}

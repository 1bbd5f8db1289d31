use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::Serialize;
use tsfold_ast::{NodeId, ReplaceError, Span, Tree};

use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum DiagnosticKind {
    /// A replacement was attempted but the node no longer occupies a slot of its parent.
    SlotNotFound,
    /// A folded value has no literal spelling.
    UnmaterializableLiteral,
}

/// A non-fatal event raised while optimizing. The affected subtree is always left unchanged.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Diagnostic {
    kind: DiagnosticKind,
    /// The node that could not be rewritten.
    node: NodeId,
    span: Option<Span>,
    message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, node: NodeId, span: Option<Span>, message: String) -> Self {
        Diagnostic {
            kind,
            node,
            span,
            message,
        }
    }

    pub fn slot_not_found(tree: &Tree, error: ReplaceError, replacement: Option<NodeId>) -> Self {
        let node = error.node();
        let message = match replacement {
            Some(replacement) => format!(
                "Failed to substitute {} with {}: {}",
                tree.kind(node).name(),
                tree.kind(replacement).name(),
                error
            ),
            None => format!("Failed to remove {}: {}", tree.kind(node).name(), error),
        };

        Self::new(DiagnosticKind::SlotNotFound, node, tree.span(node), message)
    }

    pub fn unmaterializable_literal(tree: &Tree, node: NodeId, value: &Value) -> Self {
        let message = format!(
            "Failed to replace {} with the {} {}, it has no literal form",
            tree.kind(node).name(),
            value.type_name(),
            value
        );

        Self::new(
            DiagnosticKind::UnmaterializableLiteral,
            node,
            tree.span(node),
            message,
        )
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.span {
            Some(span) => write!(f, "WARNING: {} on line {}", self.message, span.start),
            None => write!(f, "WARNING: {} ({})", self.message, self.node),
        }
    }
}

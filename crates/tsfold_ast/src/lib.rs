//! Arena-backed syntax tree with parent links.
//!
//! The tree is produced by an external parser. Every node except the root occupies exactly one
//! slot of its parent, and [`Tree::replace`] and [`Tree::remove`] are the only operations that
//! relink nodes once the tree is built.

pub mod builder;
pub mod node;
pub mod pretty;
pub mod tree;
pub mod visit;

pub use builder::TreeBuilder;
pub use node::{BinaryOperator, DeclarationKind, Literal, NodeKind, UnaryOperator};
pub use pretty::TreePretty;
pub use tree::{Node, NodeId, NodeIdTag, ReplaceError, Tree};
pub use tsfold_span::{LineColumn, Span};
pub use visit::Visitor;

//! Compile-time evaluation of TypeScript syntax trees.
//!
//! [`ConstantFolding`] replaces reducible expressions with literals, drops `if` branches whose
//! condition is known and looks through identifiers bound to `const` declarations. Problems
//! encountered along the way never abort the run, they are collected as [`Diagnostic`]s.

pub mod constant_folding;
pub mod diagnostic;
pub mod optimizer;
pub mod options;
pub mod value;

pub use constant_folding::{ConstantFolding, EvalResult, Evaluator};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use optimizer::{OptContext, Optimizer, Pass, PassGroup};
pub use options::Optimizations;
use tsfold_ast::Tree;
use tsfold_symbols::SymbolResolver;
pub use value::Value;

/// Runs the default pipeline over `tree` with every optimization enabled.
pub fn optimize(tree: &mut Tree, symbols: &dyn SymbolResolver) -> Vec<Diagnostic> {
    optimize_with(tree, symbols, Optimizations::all())
}

pub fn optimize_with(
    tree: &mut Tree,
    symbols: &dyn SymbolResolver,
    options: Optimizations,
) -> Vec<Diagnostic> {
    let mut ctx = OptContext::new(symbols).with_options(options);
    Optimizer::default().optimize(tree, &mut ctx);
    ctx.diagnostics
}

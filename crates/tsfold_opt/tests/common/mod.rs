#![allow(dead_code)]

use tsfold_ast::{Tree, TreePretty};
use tsfold_opt::{Diagnostic, Optimizations};
use tsfold_symbols::Binder;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Binds `tree` and runs the default pipeline over it.
pub fn optimize(tree: &mut Tree) -> Vec<Diagnostic> {
    optimize_with(tree, Optimizations::all())
}

pub fn optimize_with(tree: &mut Tree, options: Optimizations) -> Vec<Diagnostic> {
    init_logger();

    let symbols = Binder::bind(tree);
    tsfold_opt::optimize_with(tree, &symbols, options)
}

pub fn pretty_print(tree: &Tree) -> String {
    TreePretty::pretty_print(tree)
}

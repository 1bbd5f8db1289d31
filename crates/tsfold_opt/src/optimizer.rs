use std::collections::HashSet;

use log::{debug, warn};
use tsfold_ast::{NodeId, Tree};
use tsfold_symbols::SymbolResolver;

use crate::constant_folding::{ConstantFolding, Evaluator};
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::options::Optimizations;

const MAX_ITERATIONS: usize = 10;

pub struct OptContext<'a> {
    pub symbols: &'a dyn SymbolResolver,
    pub options: Optimizations,
    pub diagnostics: Vec<Diagnostic>,
    reported: HashSet<(DiagnosticKind, NodeId)>,
}

impl<'a> OptContext<'a> {
    pub fn new(symbols: &'a dyn SymbolResolver) -> Self {
        Self {
            symbols,
            options: Optimizations::default(),
            diagnostics: Vec::new(),
            reported: HashSet::new(),
        }
    }

    pub fn with_options(mut self, options: Optimizations) -> Self {
        self.options = options;
        self
    }

    pub fn evaluator<'t>(&self, tree: &'t Tree) -> Evaluator<'t>
    where
        'a: 't,
    {
        Evaluator::new(tree, self.symbols)
            .with_constant_propagation(self.options.propagate_constants)
    }

    /// Records `diagnostic` unless one of the same kind was already reported for its node.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        if !self.reported.insert((diagnostic.kind(), diagnostic.node())) {
            debug!("Already reported: {diagnostic}");
            return;
        }

        warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// Installs `new` in the slot holding `old`, reporting a diagnostic when there is none.
    pub fn replace_node(&mut self, tree: &mut Tree, old: NodeId, new: NodeId) -> bool {
        match tree.replace(old, new) {
            Ok(()) => true,
            Err(error) => {
                self.report(Diagnostic::slot_not_found(tree, error, Some(new)));
                false
            }
        }
    }
}

pub trait Pass {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    #[allow(unused_variables)]
    fn init_context(&mut self, ctx: &mut OptContext<'_>) {}

    /// Runs the pass over `tree`, returning whether anything changed.
    fn optimize(&mut self, tree: &mut Tree, ctx: &mut OptContext<'_>) -> bool;
}

#[derive(Default)]
pub struct PassGroup {
    name: &'static str,
    passes: Vec<Box<dyn Pass>>,
}

impl PassGroup {
    pub fn new(name: &'static str, passes: Vec<Box<dyn Pass>>) -> Self {
        Self { name, passes }
    }

    pub fn add_pass(&mut self, pass: Box<dyn Pass>) {
        self.passes.push(pass);
    }
}

impl Pass for PassGroup {
    fn name(&self) -> &'static str {
        self.name
    }

    fn init_context(&mut self, ctx: &mut OptContext<'_>) {
        for pass in &mut self.passes {
            debug!("Initializing context for pass: {}", pass.name());

            pass.init_context(ctx);
        }
    }

    /// Re-runs all passes until none of them reports a change.
    fn optimize(&mut self, tree: &mut Tree, ctx: &mut OptContext<'_>) -> bool {
        let mut changed_any = false;
        let mut changed = true;
        let mut iteration = 0;

        while changed {
            iteration += 1;
            if iteration > MAX_ITERATIONS {
                warn!(
                    "Pass group {} still changing after {} iterations, stopping",
                    self.name, MAX_ITERATIONS
                );
                break;
            }

            changed = false;
            for pass in &mut self.passes {
                debug!("Running pass: {}", pass.name());

                changed |= pass.optimize(tree, ctx);
            }
            changed_any |= changed;
        }

        changed_any
    }
}

pub struct Optimizer {
    group: PassGroup,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new(vec![Box::new(ConstantFolding::default())])
    }
}

impl Optimizer {
    pub fn new(passes: Vec<Box<dyn Pass>>) -> Self {
        Self {
            group: PassGroup::new("root", passes),
        }
    }

    pub fn add_pass(&mut self, pass: Box<dyn Pass>) {
        self.group.add_pass(pass);
    }

    pub fn optimize(&mut self, tree: &mut Tree, ctx: &mut OptContext<'_>) -> bool {
        self.group.init_context(ctx);
        self.group.optimize(tree, ctx)
    }
}

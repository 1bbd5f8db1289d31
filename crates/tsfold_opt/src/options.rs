#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which rewrites the constant folding pass may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Optimizations {
    /// Replace reducible unary and binary expressions with literals.
    pub fold_expressions: bool,
    /// Replace `if` statements with constant conditions by the selected branch.
    pub eliminate_dead_branches: bool,
    /// Look through identifiers bound to `const` declarations.
    pub propagate_constants: bool,
}

impl Optimizations {
    pub fn all() -> Self {
        Self {
            fold_expressions: true,
            eliminate_dead_branches: true,
            propagate_constants: true,
        }
    }

    pub fn none() -> Self {
        Self {
            fold_expressions: false,
            eliminate_dead_branches: false,
            propagate_constants: false,
        }
    }

    pub fn with_fold_expressions(mut self, enabled: bool) -> Self {
        self.fold_expressions = enabled;
        self
    }

    pub fn with_eliminate_dead_branches(mut self, enabled: bool) -> Self {
        self.eliminate_dead_branches = enabled;
        self
    }

    pub fn with_propagate_constants(mut self, enabled: bool) -> Self {
        self.propagate_constants = enabled;
        self
    }
}

impl Default for Optimizations {
    fn default() -> Self {
        Self::all()
    }
}

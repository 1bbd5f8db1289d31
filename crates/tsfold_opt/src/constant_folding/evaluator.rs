use std::collections::HashSet;

use log::debug;
use tsfold_ast::{BinaryOperator, Literal, NodeId, NodeKind, Tree, UnaryOperator};
use tsfold_symbols::SymbolResolver;

use crate::value::{Value, parse_numeric_literal};

/// Outcome of evaluating an expression at compile time.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalResult {
    Literal(Value),
    /// The expression depends on something only known at runtime. Not an error.
    NotReducible,
}

impl From<Option<Value>> for EvalResult {
    fn from(value: Option<Value>) -> Self {
        value.map_or(EvalResult::NotReducible, EvalResult::Literal)
    }
}

/// Reduces expression subtrees to primitive values.
///
/// An evaluator borrows the tree for the duration of one evaluation; the declarations currently
/// being resolved are tracked so that `const a = b; const b = a;` is not reducible instead of
/// recursing forever.
pub struct Evaluator<'a> {
    pub(super) tree: &'a Tree,
    pub(super) symbols: &'a dyn SymbolResolver,
    pub(super) propagate_constants: bool,
    pub(super) resolving: HashSet<NodeId>,
}

impl<'a> Evaluator<'a> {
    pub fn new(tree: &'a Tree, symbols: &'a dyn SymbolResolver) -> Self {
        Self {
            tree,
            symbols,
            propagate_constants: true,
            resolving: HashSet::new(),
        }
    }

    pub fn with_constant_propagation(mut self, enabled: bool) -> Self {
        self.propagate_constants = enabled;
        self
    }

    pub fn evaluate(&mut self, expr: NodeId) -> EvalResult {
        self.resolving.clear();
        self.try_eval_expr(expr).into()
    }

    pub(super) fn try_eval_expr(&mut self, expr: NodeId) -> Option<Value> {
        let tree = self.tree;

        match tree.kind(expr) {
            NodeKind::Literal(Literal::Boolean(value)) => Some(Value::Boolean(*value)),
            NodeKind::Literal(Literal::Numeric(text)) => {
                parse_numeric_literal(text).map(Value::Number)
            }
            NodeKind::Literal(Literal::String(text)) => Some(Value::String(text.clone())),
            NodeKind::PrefixUnary { operator, operand } => self.try_eval_unary(*operator, *operand),
            NodeKind::Binary {
                left,
                operator,
                right,
            } => self.try_eval_binary(*left, *operator, *right),
            NodeKind::Identifier { .. } => self.try_resolve_identifier(expr),
            _ => None,
        }
    }

    fn try_eval_unary(&mut self, operator: UnaryOperator, operand: NodeId) -> Option<Value> {
        match operator {
            UnaryOperator::Not => {
                let value = self.try_eval_expr(operand)?;
                Some(Value::Boolean(!value.is_truthy()))
            }
            _ => None,
        }
    }

    fn try_eval_binary(
        &mut self,
        left: NodeId,
        operator: BinaryOperator,
        right: NodeId,
    ) -> Option<Value> {
        let lhs = self.try_eval_expr(left)?;

        match operator {
            BinaryOperator::AmpersandAmpersand if !lhs.is_truthy() => {
                debug!("Short-circuiting `&&` at {left}, right operand not evaluated");
                return Some(lhs);
            }
            BinaryOperator::BarBar if lhs.is_truthy() => {
                debug!("Short-circuiting `||` at {left}, right operand not evaluated");
                return Some(lhs);
            }
            _ => {}
        }

        let rhs = self.try_eval_expr(right)?;

        try_eval_binary_op(operator, lhs, rhs)
    }
}

fn int32(value: i32) -> Value {
    Value::Number(f64::from(value))
}

fn try_eval_binary_op(operator: BinaryOperator, lhs: Value, rhs: Value) -> Option<Value> {
    let value = match operator {
        // Not short-circuited, the right operand decides.
        BinaryOperator::AmpersandAmpersand | BinaryOperator::BarBar => rhs,

        BinaryOperator::Ampersand => int32(lhs.to_int32() & rhs.to_int32()),
        BinaryOperator::Bar => int32(lhs.to_int32() | rhs.to_int32()),
        BinaryOperator::Caret | BinaryOperator::CaretEquals => {
            int32(lhs.to_int32() ^ rhs.to_int32())
        }

        BinaryOperator::EqualsEquals => Value::Boolean(lhs.loose_equals(&rhs)),
        BinaryOperator::ExclamationEquals => Value::Boolean(!lhs.loose_equals(&rhs)),
        BinaryOperator::EqualsEqualsEquals => Value::Boolean(lhs.strict_equals(&rhs)),
        BinaryOperator::ExclamationEqualsEquals => Value::Boolean(!lhs.strict_equals(&rhs)),

        BinaryOperator::LessThan => Value::Boolean(lhs.compare(&rhs).is_some_and(|o| o.is_lt())),
        BinaryOperator::LessThanEquals => {
            Value::Boolean(lhs.compare(&rhs).is_some_and(|o| o.is_le()))
        }
        BinaryOperator::GreaterThan => {
            Value::Boolean(lhs.compare(&rhs).is_some_and(|o| o.is_gt()))
        }
        BinaryOperator::GreaterThanEquals => {
            Value::Boolean(lhs.compare(&rhs).is_some_and(|o| o.is_ge()))
        }

        BinaryOperator::Plus => match (&lhs, &rhs) {
            (Value::String(_), _) | (_, Value::String(_)) => {
                Value::String(format!("{}{}", lhs.to_js_string(), rhs.to_js_string()).into())
            }
            _ => Value::Number(lhs.to_number() + rhs.to_number()),
        },
        BinaryOperator::Minus => Value::Number(lhs.to_number() - rhs.to_number()),
        BinaryOperator::Asterisk => Value::Number(lhs.to_number() * rhs.to_number()),
        BinaryOperator::Slash => Value::Number(lhs.to_number() / rhs.to_number()),
        BinaryOperator::Percent => Value::Number(lhs.to_number() % rhs.to_number()),

        BinaryOperator::Equals => return None,
    };

    Some(value)
}

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::tree::NodeId;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    Boolean(bool),
    /// Numeric literal as spelled in the source, e.g. `0x1F` or `1_000`.
    Numeric(Box<str>),
    String(Box<str>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOperator {
    Not,
    Minus,
    Plus,
    Tilde,
}

impl UnaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Not => "!",
            UnaryOperator::Minus => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::Tilde => "~",
        }
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOperator {
    AmpersandAmpersand,
    BarBar,
    Ampersand,
    Bar,
    Caret,
    CaretEquals,
    EqualsEquals,
    EqualsEqualsEquals,
    ExclamationEquals,
    ExclamationEqualsEquals,
    LessThan,
    LessThanEquals,
    GreaterThan,
    GreaterThanEquals,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    Equals,
}

impl BinaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::AmpersandAmpersand => "&&",
            BinaryOperator::BarBar => "||",
            BinaryOperator::Ampersand => "&",
            BinaryOperator::Bar => "|",
            BinaryOperator::Caret => "^",
            BinaryOperator::CaretEquals => "^=",
            BinaryOperator::EqualsEquals => "==",
            BinaryOperator::EqualsEqualsEquals => "===",
            BinaryOperator::ExclamationEquals => "!=",
            BinaryOperator::ExclamationEqualsEquals => "!==",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanEquals => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanEquals => ">=",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Asterisk => "*",
            BinaryOperator::Slash => "/",
            BinaryOperator::Percent => "%",
            BinaryOperator::Equals => "=",
        }
    }

    /// Whether the left operand is written to by this operator.
    pub fn is_assignment(self) -> bool {
        matches!(self, BinaryOperator::Equals | BinaryOperator::CaretEquals)
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
}

impl DeclarationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKind::Var => "var",
            DeclarationKind::Let => "let",
            DeclarationKind::Const => "const",
        }
    }

    pub fn is_block_scoped(self) -> bool {
        matches!(self, DeclarationKind::Let | DeclarationKind::Const)
    }

    pub fn is_immutable(self) -> bool {
        self == DeclarationKind::Const
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeKind {
    SourceFile {
        statements: Vec<NodeId>,
    },
    Literal(Literal),
    Identifier {
        name: Box<str>,
    },
    PrefixUnary {
        operator: UnaryOperator,
        operand: NodeId,
    },
    Binary {
        left: NodeId,
        operator: BinaryOperator,
        right: NodeId,
    },
    Call {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    If {
        condition: NodeId,
        then_statement: NodeId,
        else_statement: Option<NodeId>,
    },
    Block {
        statements: Vec<NodeId>,
    },
    ExpressionStatement {
        expression: NodeId,
    },
    VariableStatement {
        declaration_list: NodeId,
    },
    VariableDeclarationList {
        kind: DeclarationKind,
        declarations: Vec<NodeId>,
    },
    VariableDeclaration {
        name: NodeId,
        initializer: Option<NodeId>,
    },
    EmptyStatement,
    /// Any construct this crate has no dedicated kind for. Its children are kept in source order.
    Opaque {
        label: Box<str>,
        children: Vec<NodeId>,
    },
}

/// A child position inside a node.
#[derive(Debug)]
pub enum Slot<'a> {
    Single(&'a NodeId),
    Optional(&'a Option<NodeId>),
    Sequence(&'a [NodeId]),
}

#[derive(Debug)]
pub enum SlotMut<'a> {
    Single(&'a mut NodeId),
    Optional(&'a mut Option<NodeId>),
    Sequence(&'a mut Vec<NodeId>),
}

impl NodeKind {
    /// The child slots of this node in source order.
    pub fn slots(&self) -> Vec<Slot<'_>> {
        match self {
            NodeKind::SourceFile { statements } | NodeKind::Block { statements } => {
                vec![Slot::Sequence(statements)]
            }
            NodeKind::Literal(_) | NodeKind::Identifier { .. } | NodeKind::EmptyStatement => {
                vec![]
            }
            NodeKind::PrefixUnary { operand, .. } => vec![Slot::Single(operand)],
            NodeKind::Binary { left, right, .. } => vec![Slot::Single(left), Slot::Single(right)],
            NodeKind::Call { callee, arguments } => {
                vec![Slot::Single(callee), Slot::Sequence(arguments)]
            }
            NodeKind::If {
                condition,
                then_statement,
                else_statement,
            } => vec![
                Slot::Single(condition),
                Slot::Single(then_statement),
                Slot::Optional(else_statement),
            ],
            NodeKind::ExpressionStatement { expression } => vec![Slot::Single(expression)],
            NodeKind::VariableStatement { declaration_list } => {
                vec![Slot::Single(declaration_list)]
            }
            NodeKind::VariableDeclarationList { declarations, .. } => {
                vec![Slot::Sequence(declarations)]
            }
            NodeKind::VariableDeclaration { name, initializer } => {
                vec![Slot::Single(name), Slot::Optional(initializer)]
            }
            NodeKind::Opaque { children, .. } => vec![Slot::Sequence(children)],
        }
    }

    pub fn slots_mut(&mut self) -> Vec<SlotMut<'_>> {
        match self {
            NodeKind::SourceFile { statements } | NodeKind::Block { statements } => {
                vec![SlotMut::Sequence(statements)]
            }
            NodeKind::Literal(_) | NodeKind::Identifier { .. } | NodeKind::EmptyStatement => {
                vec![]
            }
            NodeKind::PrefixUnary { operand, .. } => vec![SlotMut::Single(operand)],
            NodeKind::Binary { left, right, .. } => {
                vec![SlotMut::Single(left), SlotMut::Single(right)]
            }
            NodeKind::Call { callee, arguments } => {
                vec![SlotMut::Single(callee), SlotMut::Sequence(arguments)]
            }
            NodeKind::If {
                condition,
                then_statement,
                else_statement,
            } => vec![
                SlotMut::Single(condition),
                SlotMut::Single(then_statement),
                SlotMut::Optional(else_statement),
            ],
            NodeKind::ExpressionStatement { expression } => vec![SlotMut::Single(expression)],
            NodeKind::VariableStatement { declaration_list } => {
                vec![SlotMut::Single(declaration_list)]
            }
            NodeKind::VariableDeclarationList { declarations, .. } => {
                vec![SlotMut::Sequence(declarations)]
            }
            NodeKind::VariableDeclaration { name, initializer } => {
                vec![SlotMut::Single(name), SlotMut::Optional(initializer)]
            }
            NodeKind::Opaque { children, .. } => vec![SlotMut::Sequence(children)],
        }
    }

    pub fn children(&self) -> Vec<NodeId> {
        let mut children = Vec::new();

        for slot in self.slots() {
            match slot {
                Slot::Single(id) => children.push(*id),
                Slot::Optional(id) => children.extend(*id),
                Slot::Sequence(ids) => children.extend_from_slice(ids),
            }
        }

        children
    }

    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::SourceFile { .. } => "SourceFile",
            NodeKind::Literal(Literal::Boolean(_)) => "BooleanLiteral",
            NodeKind::Literal(Literal::Numeric(_)) => "NumericLiteral",
            NodeKind::Literal(Literal::String(_)) => "StringLiteral",
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::PrefixUnary { .. } => "PrefixUnaryExpression",
            NodeKind::Binary { .. } => "BinaryExpression",
            NodeKind::Call { .. } => "CallExpression",
            NodeKind::If { .. } => "IfStatement",
            NodeKind::Block { .. } => "Block",
            NodeKind::ExpressionStatement { .. } => "ExpressionStatement",
            NodeKind::VariableStatement { .. } => "VariableStatement",
            NodeKind::VariableDeclarationList { .. } => "VariableDeclarationList",
            NodeKind::VariableDeclaration { .. } => "VariableDeclaration",
            NodeKind::EmptyStatement => "EmptyStatement",
            NodeKind::Opaque { .. } => "Opaque",
        }
    }
}

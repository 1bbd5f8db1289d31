use tsfold_span::Span;

use crate::node::{BinaryOperator, DeclarationKind, Literal, NodeKind, UnaryOperator};
use crate::tree::{NodeId, Tree};

/// Builds a [`Tree`] bottom-up, linking parents as nodes are created.
///
/// ```
/// use tsfold_ast::{BinaryOperator, TreeBuilder, TreePretty};
///
/// let mut builder = TreeBuilder::new();
/// let one = builder.number("1");
/// let two = builder.number("2");
/// let sum = builder.binary(one, BinaryOperator::Plus, two);
/// let statement = builder.expression_statement(sum);
/// let tree = builder.finish(vec![statement]);
///
/// assert_eq!(TreePretty::pretty_print(&tree), "1 + 2;\n");
/// ```
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: Tree,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&mut self, kind: NodeKind) -> NodeId {
        self.tree.add_node(kind)
    }

    pub fn with_span(&mut self, id: NodeId, span: Span) -> NodeId {
        self.tree.set_span(id, span);
        id
    }

    pub fn boolean(&mut self, value: bool) -> NodeId {
        self.node(NodeKind::Literal(Literal::Boolean(value)))
    }

    pub fn number(&mut self, text: &str) -> NodeId {
        self.node(NodeKind::Literal(Literal::Numeric(text.into())))
    }

    pub fn string(&mut self, text: &str) -> NodeId {
        self.node(NodeKind::Literal(Literal::String(text.into())))
    }

    pub fn ident(&mut self, name: &str) -> NodeId {
        self.node(NodeKind::Identifier { name: name.into() })
    }

    pub fn prefix(&mut self, operator: UnaryOperator, operand: NodeId) -> NodeId {
        self.node(NodeKind::PrefixUnary { operator, operand })
    }

    pub fn not(&mut self, operand: NodeId) -> NodeId {
        self.prefix(UnaryOperator::Not, operand)
    }

    pub fn binary(&mut self, left: NodeId, operator: BinaryOperator, right: NodeId) -> NodeId {
        self.node(NodeKind::Binary {
            left,
            operator,
            right,
        })
    }

    pub fn call(&mut self, callee: NodeId, arguments: Vec<NodeId>) -> NodeId {
        self.node(NodeKind::Call { callee, arguments })
    }

    /// `name(arguments);`
    pub fn call_statement(&mut self, name: &str, arguments: Vec<NodeId>) -> NodeId {
        let callee = self.ident(name);
        let call = self.call(callee, arguments);
        self.expression_statement(call)
    }

    pub fn expression_statement(&mut self, expression: NodeId) -> NodeId {
        self.node(NodeKind::ExpressionStatement { expression })
    }

    pub fn if_statement(
        &mut self,
        condition: NodeId,
        then_statement: NodeId,
        else_statement: Option<NodeId>,
    ) -> NodeId {
        self.node(NodeKind::If {
            condition,
            then_statement,
            else_statement,
        })
    }

    pub fn block(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.node(NodeKind::Block { statements })
    }

    pub fn empty_statement(&mut self) -> NodeId {
        self.node(NodeKind::EmptyStatement)
    }

    pub fn declaration(&mut self, name: &str, initializer: Option<NodeId>) -> NodeId {
        let name = self.ident(name);
        self.node(NodeKind::VariableDeclaration { name, initializer })
    }

    pub fn declaration_list(&mut self, kind: DeclarationKind, declarations: Vec<NodeId>) -> NodeId {
        self.node(NodeKind::VariableDeclarationList { kind, declarations })
    }

    pub fn variable_statement(
        &mut self,
        kind: DeclarationKind,
        declarations: Vec<NodeId>,
    ) -> NodeId {
        let declaration_list = self.declaration_list(kind, declarations);
        self.node(NodeKind::VariableStatement { declaration_list })
    }

    /// `const name = initializer;`
    pub fn const_statement(&mut self, name: &str, initializer: NodeId) -> NodeId {
        let declaration = self.declaration(name, Some(initializer));
        self.variable_statement(DeclarationKind::Const, vec![declaration])
    }

    /// `let name = initializer;`
    pub fn let_statement(&mut self, name: &str, initializer: NodeId) -> NodeId {
        let declaration = self.declaration(name, Some(initializer));
        self.variable_statement(DeclarationKind::Let, vec![declaration])
    }

    pub fn opaque(&mut self, label: &str, children: Vec<NodeId>) -> NodeId {
        self.node(NodeKind::Opaque {
            label: label.into(),
            children,
        })
    }

    /// Wraps `statements` into the source file root and returns the finished tree.
    pub fn finish(mut self, statements: Vec<NodeId>) -> Tree {
        let root = self.node(NodeKind::SourceFile { statements });
        self.tree.set_root(root);
        self.tree
    }
}

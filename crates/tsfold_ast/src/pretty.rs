use crate::node::{Literal, NodeKind};
use crate::tree::{NodeId, Tree};

/// Renders a tree back into source-like text, one statement per line.
pub struct TreePretty<'tree> {
    tree: &'tree Tree,
    output: String,
    indent_level: usize,
}

impl<'tree> TreePretty<'tree> {
    fn new(tree: &'tree Tree) -> Self {
        Self {
            tree,
            output: String::new(),
            indent_level: 0,
        }
    }

    pub fn pretty_print(tree: &Tree) -> String {
        match tree.root() {
            Some(root) => Self::pretty_print_node(tree, root),
            None => String::new(),
        }
    }

    pub fn pretty_print_node(tree: &Tree, id: NodeId) -> String {
        let mut prettier = TreePretty::new(tree);
        prettier.print_node(id);
        prettier.output
    }

    fn push_str(&mut self, string: &str) {
        self.output.push_str(string);
    }

    fn push_char(&mut self, ch: char) {
        self.output.push(ch);
    }

    fn push_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.push_str("    ");
        }
    }

    fn push_newline(&mut self) {
        self.push_char('\n');
    }

    fn print_statements(&mut self, statements: &[NodeId]) {
        for statement in statements {
            self.push_indent();
            self.print_node(*statement);
            self.push_newline();
        }
    }

    fn print_separated(&mut self, ids: &[NodeId], separator: &str) {
        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                self.push_str(separator);
            }
            self.print_node(*id);
        }
    }

    fn print_operand(&mut self, id: NodeId) {
        if matches!(self.tree.kind(id), NodeKind::Binary { .. }) {
            self.push_char('(');
            self.print_node(id);
            self.push_char(')');
        } else {
            self.print_node(id);
        }
    }

    fn print_literal(&mut self, literal: &Literal) {
        match literal {
            Literal::Boolean(true) => self.push_str("true"),
            Literal::Boolean(false) => self.push_str("false"),
            Literal::Numeric(text) => self.push_str(text),
            Literal::String(text) => {
                self.push_char('"');
                for ch in text.chars() {
                    match ch {
                        '"' => self.push_str("\\\""),
                        '\\' => self.push_str("\\\\"),
                        '\n' => self.push_str("\\n"),
                        ch => self.push_char(ch),
                    }
                }
                self.push_char('"');
            }
        }
    }

    fn print_node(&mut self, id: NodeId) {
        let tree = self.tree;

        match tree.kind(id) {
            NodeKind::SourceFile { statements } => self.print_statements(statements),
            NodeKind::Literal(literal) => self.print_literal(literal),
            NodeKind::Identifier { name } => self.push_str(name),
            NodeKind::PrefixUnary { operator, operand } => {
                self.push_str(operator.as_str());
                self.print_operand(*operand);
            }
            NodeKind::Binary {
                left,
                operator,
                right,
            } => {
                self.print_operand(*left);
                self.push_char(' ');
                self.push_str(operator.as_str());
                self.push_char(' ');
                self.print_operand(*right);
            }
            NodeKind::Call { callee, arguments } => {
                self.print_node(*callee);
                self.push_char('(');
                self.print_separated(arguments, ", ");
                self.push_char(')');
            }
            NodeKind::If {
                condition,
                then_statement,
                else_statement,
            } => {
                self.push_str("if (");
                self.print_node(*condition);
                self.push_str(") ");
                self.print_node(*then_statement);

                if let Some(else_statement) = else_statement {
                    self.push_str(" else ");
                    self.print_node(*else_statement);
                }
            }
            NodeKind::Block { statements } if statements.is_empty() => self.push_str("{}"),
            NodeKind::Block { statements } => {
                self.push_char('{');
                self.push_newline();
                self.indent_level += 1;
                self.print_statements(statements);
                self.indent_level -= 1;
                self.push_indent();
                self.push_char('}');
            }
            NodeKind::ExpressionStatement { expression } => {
                self.print_node(*expression);
                self.push_char(';');
            }
            NodeKind::VariableStatement { declaration_list } => {
                self.print_node(*declaration_list);
                self.push_char(';');
            }
            NodeKind::VariableDeclarationList { kind, declarations } => {
                self.push_str(kind.as_str());
                self.push_char(' ');
                self.print_separated(declarations, ", ");
            }
            NodeKind::VariableDeclaration { name, initializer } => {
                self.print_node(*name);

                if let Some(initializer) = initializer {
                    self.push_str(" = ");
                    self.print_node(*initializer);
                }
            }
            NodeKind::EmptyStatement => self.push_char(';'),
            NodeKind::Opaque { label, children } => {
                self.push_char('#');
                self.push_str(label);
                self.push_char('[');
                self.print_separated(children, ", ");
                self.push_char(']');
            }
        }
    }
}

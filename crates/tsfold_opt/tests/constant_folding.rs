use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use tsfold_ast::BinaryOperator::*;
use tsfold_ast::{LineColumn, NodeKind, Span, TreeBuilder};
use tsfold_opt::DiagnosticKind;

mod common;

#[test]
fn test_equality_and_bitwise_operators() {
    let mut b = TreeBuilder::new();
    let args = vec![
        {
            let (l, r) = (b.number("1"), b.string("1"));
            b.binary(l, EqualsEquals, r)
        },
        {
            let (l, r) = (b.number("1"), b.string("1"));
            b.binary(l, EqualsEqualsEquals, r)
        },
        {
            let (l, r) = (b.number("5"), b.number("3"));
            b.binary(l, Ampersand, r)
        },
        {
            let (l, r) = (b.number("5"), b.number("2"));
            b.binary(l, Bar, r)
        },
        {
            let (l, r) = (b.string("a"), b.string("b"));
            b.binary(l, LessThan, r)
        },
        {
            let (l, r) = (b.number("1"), b.number("3"));
            b.binary(l, CaretEquals, r)
        },
    ];
    let statement = b.call_statement("f", args);
    let mut tree = b.finish(vec![statement]);

    let diagnostics = common::optimize(&mut tree);

    assert!(diagnostics.is_empty());
    assert_snapshot!(common::pretty_print(&tree), @"f(true, false, 1, 7, true, 2);");
}

#[test]
fn test_loose_equality_coerces_booleans_and_strings() {
    let mut b = TreeBuilder::new();
    let args = vec![
        {
            let (l, r) = (b.boolean(true), b.number("1"));
            b.binary(l, EqualsEquals, r)
        },
        {
            let (l, r) = (b.string(""), b.number("0"));
            b.binary(l, EqualsEquals, r)
        },
        {
            let (l, r) = (b.string("0x10"), b.number("16"));
            b.binary(l, ExclamationEquals, r)
        },
        {
            let (l, r) = (b.boolean(false), b.string("false"));
            b.binary(l, ExclamationEqualsEquals, r)
        },
    ];
    let statement = b.call_statement("f", args);
    let mut tree = b.finish(vec![statement]);

    common::optimize(&mut tree);

    assert_snapshot!(common::pretty_print(&tree), @"f(true, true, false, true);");
}

#[test]
fn test_relational_operators() {
    let mut b = TreeBuilder::new();
    let args = vec![
        {
            let (l, r) = (b.string("10"), b.number("9"));
            b.binary(l, GreaterThan, r)
        },
        {
            let (l, r) = (b.string("10"), b.string("9"));
            b.binary(l, GreaterThan, r)
        },
        {
            let (l, r) = (b.number("2"), b.number("2"));
            b.binary(l, LessThanEquals, r)
        },
        {
            let (l, r) = (b.string("a"), b.number("1"));
            b.binary(l, GreaterThanEquals, r)
        },
    ];
    let statement = b.call_statement("f", args);
    let mut tree = b.finish(vec![statement]);

    common::optimize(&mut tree);

    assert_snapshot!(common::pretty_print(&tree), @"f(true, false, true, false);");
}

#[test]
fn test_arithmetic_and_concatenation() {
    let mut b = TreeBuilder::new();
    let args = vec![
        {
            let (one, two, three) = (b.number("1"), b.number("2"), b.number("3"));
            let product = b.binary(two, Asterisk, three);
            b.binary(one, Plus, product)
        },
        {
            let (l, r) = (b.string("a"), b.number("1"));
            b.binary(l, Plus, r)
        },
        {
            let (l, r) = (b.number("1"), b.number("3"));
            b.binary(l, Minus, r)
        },
        {
            let (l, r) = (b.number("0.1"), b.number("0.2"));
            b.binary(l, Plus, r)
        },
        {
            let (l, r) = (b.number("0x1F"), b.number("1_000"));
            b.binary(l, Percent, r)
        },
    ];
    let statement = b.call_statement("f", args);
    let mut tree = b.finish(vec![statement]);

    common::optimize(&mut tree);

    assert_snapshot!(common::pretty_print(&tree), @r#"f(7, "a1", -2, 0.30000000000000004, 31);"#);
}

#[test]
fn test_logical_not() {
    let mut b = TreeBuilder::new();
    let args = vec![
        {
            let zero = b.number("0");
            b.not(zero)
        },
        {
            let empty = b.string("");
            b.not(empty)
        },
        {
            let a = b.string("a");
            let not_a = b.not(a);
            b.not(not_a)
        },
    ];
    let statement = b.call_statement("f", args);
    let mut tree = b.finish(vec![statement]);

    common::optimize(&mut tree);

    assert_snapshot!(common::pretty_print(&tree), @"f(true, true, true);");
}

#[test]
fn test_short_circuit_returns_selected_operand() {
    let mut b = TreeBuilder::new();
    let args = vec![
        {
            let (l, r) = (b.boolean(false), b.ident("x"));
            b.binary(l, AmpersandAmpersand, r)
        },
        {
            let (l, r) = (b.number("0"), b.ident("x"));
            b.binary(l, AmpersandAmpersand, r)
        },
        {
            let (l, r) = (b.number("1"), b.ident("x"));
            b.binary(l, BarBar, r)
        },
        {
            let (l, r) = (b.string(""), b.string("b"));
            b.binary(l, BarBar, r)
        },
        {
            let (l, r) = (b.boolean(true), b.number("2"));
            b.binary(l, AmpersandAmpersand, r)
        },
    ];
    let statement = b.call_statement("f", args);
    let mut tree = b.finish(vec![statement]);

    common::optimize(&mut tree);

    assert_snapshot!(common::pretty_print(&tree), @r#"f(false, 0, 1, "b", 2);"#);
}

#[test]
fn test_runtime_operands_are_left_alone() {
    let mut b = TreeBuilder::new();
    let args = vec![
        {
            let (l, r) = (b.ident("a"), b.number("1"));
            b.binary(l, Plus, r)
        },
        {
            let two = b.number("2");
            let callee = b.ident("g");
            let call = b.call(callee, vec![two]);
            let t = b.boolean(true);
            b.binary(call, AmpersandAmpersand, t)
        },
        {
            let (l, r) = (b.boolean(true), b.ident("x"));
            b.binary(l, AmpersandAmpersand, r)
        },
        {
            let one = b.number("1");
            b.prefix(tsfold_ast::UnaryOperator::Tilde, one)
        },
    ];
    let statement = b.call_statement("f", args);
    let mut tree = b.finish(vec![statement]);

    let diagnostics = common::optimize(&mut tree);

    assert!(diagnostics.is_empty());
    assert_snapshot!(common::pretty_print(&tree), @"f(a + 1, g(2) && true, true && x, ~1);");
}

#[test]
fn test_folds_operands_of_irreducible_expressions() {
    let mut b = TreeBuilder::new();
    let a = b.ident("a");
    let (one, two) = (b.number("1"), b.number("2"));
    let sum = b.binary(one, Plus, two);
    let product = b.binary(a, Asterisk, sum);
    let statement = b.call_statement("f", vec![product]);
    let mut tree = b.finish(vec![statement]);

    common::optimize(&mut tree);

    assert_snapshot!(common::pretty_print(&tree), @"f(a * 3);");
}

#[test]
fn test_unsupported_numeric_spellings_are_not_reducible() {
    let mut b = TreeBuilder::new();
    let args = vec![
        {
            let (l, r) = (b.number("017"), b.number("1"));
            b.binary(l, Plus, r)
        },
        {
            let (l, r) = (b.number("1n"), b.number("1"));
            b.binary(l, Plus, r)
        },
    ];
    let statement = b.call_statement("f", args);
    let mut tree = b.finish(vec![statement]);

    common::optimize(&mut tree);

    assert_snapshot!(common::pretty_print(&tree), @"f(017 + 1, 1n + 1);");
}

#[test]
fn test_non_finite_results_are_reported_and_kept() {
    let mut b = TreeBuilder::new();
    let (one, zero) = (b.number("1"), b.number("0"));
    let division = b.binary(one, Slash, zero);
    let division = b.with_span(
        division,
        Span::new(LineColumn::new(2, 4), LineColumn::new(2, 9)),
    );
    let statement = b.call_statement("f", vec![division]);
    let mut tree = b.finish(vec![statement]);

    let diagnostics = common::optimize(&mut tree);

    assert_snapshot!(common::pretty_print(&tree), @"f(1 / 0);");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind(), DiagnosticKind::UnmaterializableLiteral);
    assert_eq!(diagnostics[0].node(), division);
    assert_snapshot!(
        diagnostics[0].to_string(),
        @"WARNING: Failed to replace BinaryExpression with the number Infinity, it has no literal form on line 3:5"
    );
}

#[test]
fn test_non_finite_result_is_reported_once_across_iterations() {
    let mut b = TreeBuilder::new();
    let (one, zero) = (b.number("1"), b.number("0"));
    let division = b.binary(one, Slash, zero);
    let f = b.call_statement("f", vec![division]);
    let (lhs, rhs) = (b.number("1"), b.number("1"));
    let sum = b.binary(lhs, Plus, rhs);
    let g = b.call_statement("g", vec![sum]);
    let mut tree = b.finish(vec![f, g]);

    let diagnostics = common::optimize(&mut tree);

    assert_snapshot!(common::pretty_print(&tree), @r"
    f(1 / 0);
    g(2);
    ");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind(), DiagnosticKind::UnmaterializableLiteral);
    assert_eq!(diagnostics[0].node(), division);
}

#[test]
fn test_non_finite_intermediate_values_still_fold() {
    let mut b = TreeBuilder::new();
    let (one, zero) = (b.number("1"), b.number("0"));
    let division = b.binary(one, Slash, zero);
    let limit = b.number("1e308");
    let comparison = b.binary(division, GreaterThan, limit);
    let statement = b.call_statement("f", vec![comparison]);
    let mut tree = b.finish(vec![statement]);

    let diagnostics = common::optimize(&mut tree);

    assert!(diagnostics.is_empty());
    assert_snapshot!(common::pretty_print(&tree), @"f(true);");
}

#[test]
fn test_materialized_literal_takes_over_the_slot() {
    let mut b = TreeBuilder::new();
    let (one, two) = (b.number("1"), b.number("2"));
    let sum = b.binary(one, Plus, two);
    let sum = b.with_span(sum, Span::new(LineColumn::new(0, 2), LineColumn::new(0, 7)));
    let callee = b.ident("f");
    let call = b.call(callee, vec![sum]);
    let statement = b.expression_statement(call);
    let mut tree = b.finish(vec![statement]);

    common::optimize(&mut tree);

    let NodeKind::Call { arguments, .. } = tree.kind(call) else {
        panic!("expected a call");
    };
    let literal = arguments[0];

    assert_eq!(tree.kind(literal), &NodeKind::Literal(tsfold_ast::Literal::Numeric("3".into())));
    assert_eq!(tree.parent(literal), Some(call));
    assert_eq!(tree.span(literal), None);
    assert_eq!(tree.parent(sum), None);
}

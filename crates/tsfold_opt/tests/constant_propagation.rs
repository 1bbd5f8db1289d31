use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use tsfold_ast::{BinaryOperator, DeclarationKind, NodeKind, TreeBuilder};
use tsfold_opt::Optimizations;

mod common;

#[test]
fn test_substitutes_const_in_call_argument() {
    let mut b = TreeBuilder::new();
    let (one, two) = (b.number("1"), b.number("2"));
    let sum = b.binary(one, BinaryOperator::Plus, two);
    let declaration = b.const_statement("x", sum);
    let x = b.ident("x");
    let call = b.call_statement("f", vec![x]);
    let mut tree = b.finish(vec![declaration, call]);

    common::optimize(&mut tree);

    assert_snapshot!(common::pretty_print(&tree), @r"
    const x = 3;
    f(3);
    ");
}

#[test]
fn test_declaration_name_is_never_substituted() {
    let mut b = TreeBuilder::new();
    let one = b.number("1");
    let declaration = b.declaration("x", Some(one));
    let statement = b.variable_statement(DeclarationKind::Const, vec![declaration]);
    let mut tree = b.finish(vec![statement]);

    common::optimize(&mut tree);

    let NodeKind::VariableDeclaration { name, .. } = *tree.kind(declaration) else {
        panic!("expected a declaration");
    };
    assert_eq!(tree.kind(name), &NodeKind::Identifier { name: "x".into() });
    assert_snapshot!(common::pretty_print(&tree), @"const x = 1;");
}

#[test]
fn test_chained_constants() {
    let mut b = TreeBuilder::new();
    let two = b.number("2");
    let a_declaration = b.const_statement("a", two);
    let a = b.ident("a");
    let three = b.number("3");
    let product = b.binary(a, BinaryOperator::Asterisk, three);
    let b_declaration = b.const_statement("b", product);
    let b_ref = b.ident("b");
    let one = b.number("1");
    let difference = b.binary(b_ref, BinaryOperator::Minus, one);
    let call = b.call_statement("f", vec![difference]);
    let mut tree = b.finish(vec![a_declaration, b_declaration, call]);

    common::optimize(&mut tree);

    assert_snapshot!(common::pretty_print(&tree), @r"
    const a = 2;
    const b = 6;
    f(5);
    ");
}

#[test]
fn test_let_and_var_are_not_propagated() {
    let mut b = TreeBuilder::new();
    let one = b.number("1");
    let let_statement = b.let_statement("y", one);
    let two = b.number("2");
    let declaration = b.declaration("z", Some(two));
    let var_statement = b.variable_statement(DeclarationKind::Var, vec![declaration]);
    let (y, z) = (b.ident("y"), b.ident("z"));
    let call = b.call_statement("f", vec![y, z]);
    let mut tree = b.finish(vec![let_statement, var_statement, call]);

    common::optimize(&mut tree);

    assert_snapshot!(common::pretty_print(&tree), @r"
    let y = 1;
    var z = 2;
    f(y, z);
    ");
}

#[test]
fn test_const_without_initializer_is_not_propagated() {
    let mut b = TreeBuilder::new();
    let declaration = b.declaration("x", None);
    let statement = b.variable_statement(DeclarationKind::Const, vec![declaration]);
    let x = b.ident("x");
    let call = b.call_statement("f", vec![x]);
    let mut tree = b.finish(vec![statement, call]);

    common::optimize(&mut tree);

    assert_snapshot!(common::pretty_print(&tree), @r"
    const x;
    f(x);
    ");
}

#[test]
fn test_assignment_target_is_not_substituted() {
    let mut b = TreeBuilder::new();
    let one = b.number("1");
    let declaration = b.const_statement("z", one);
    let (z, two) = (b.ident("z"), b.number("2"));
    let assignment = b.binary(z, BinaryOperator::Equals, two);
    let statement = b.expression_statement(assignment);
    let mut tree = b.finish(vec![declaration, statement]);

    common::optimize(&mut tree);

    assert_snapshot!(common::pretty_print(&tree), @r"
    const z = 1;
    z = 2;
    ");
}

#[test]
fn test_only_argument_and_operand_sites_are_substituted() {
    let mut b = TreeBuilder::new();
    let one = b.number("1");
    let declaration = b.const_statement("x", one);
    let callee = b.ident("x");
    let call = b.call(callee, vec![]);
    let call_statement = b.expression_statement(call);
    let x = b.ident("x");
    let statement = b.expression_statement(x);
    let mut tree = b.finish(vec![declaration, call_statement, statement]);

    common::optimize(&mut tree);

    assert_snapshot!(common::pretty_print(&tree), @r"
    const x = 1;
    x();
    x;
    ");
}

#[test]
fn test_block_scoped_shadowing() {
    let mut b = TreeBuilder::new();
    let one = b.number("1");
    let outer = b.const_statement("x", one);
    let two = b.number("2");
    let inner = b.let_statement("x", two);
    let inner_use = b.ident("x");
    let inner_call = b.call_statement("f", vec![inner_use]);
    let block = b.block(vec![inner, inner_call]);
    let outer_use = b.ident("x");
    let outer_call = b.call_statement("g", vec![outer_use]);
    let mut tree = b.finish(vec![outer, block, outer_call]);

    common::optimize(&mut tree);

    assert_snapshot!(common::pretty_print(&tree), @r"
    const x = 1;
    {
        let x = 2;
        f(x);
    }
    g(1);
    ");
}

#[test]
fn test_mutual_reference_is_not_reducible() {
    let mut b = TreeBuilder::new();
    let b_ref = b.ident("b");
    let a_declaration = b.const_statement("a", b_ref);
    let a_ref = b.ident("a");
    let b_declaration = b.const_statement("b", a_ref);
    let a = b.ident("a");
    let call = b.call_statement("f", vec![a]);
    let mut tree = b.finish(vec![a_declaration, b_declaration, call]);

    let diagnostics = common::optimize(&mut tree);

    assert!(diagnostics.is_empty());
    assert_snapshot!(common::pretty_print(&tree), @r"
    const a = b;
    const b = a;
    f(a);
    ");
}

#[test]
fn test_self_reference_is_not_reducible() {
    let mut b = TreeBuilder::new();
    let s = b.ident("s");
    let one = b.number("1");
    let sum = b.binary(s, BinaryOperator::Plus, one);
    let declaration = b.const_statement("s", sum);
    let s = b.ident("s");
    let call = b.call_statement("f", vec![s]);
    let mut tree = b.finish(vec![declaration, call]);

    common::optimize(&mut tree);

    assert_snapshot!(common::pretty_print(&tree), @r"
    const s = s + 1;
    f(s);
    ");
}

#[test]
fn test_disabled_propagation_makes_identifiers_opaque() {
    let mut b = TreeBuilder::new();
    let (one, two) = (b.number("1"), b.number("2"));
    let sum = b.binary(one, BinaryOperator::Plus, two);
    let declaration = b.const_statement("x", sum);
    let x = b.ident("x");
    let (lhs, rhs) = (b.number("2"), b.number("2"));
    let product = b.binary(lhs, BinaryOperator::Asterisk, rhs);
    let call = b.call_statement("f", vec![x, product]);
    let x = b.ident("x");
    let zero = b.number("0");
    let condition = b.binary(x, BinaryOperator::GreaterThan, zero);
    let g = b.call_statement("g", vec![]);
    let if_statement = b.if_statement(condition, g, None);
    let mut tree = b.finish(vec![declaration, call, if_statement]);

    common::optimize_with(
        &mut tree,
        Optimizations::all().with_propagate_constants(false),
    );

    assert_snapshot!(common::pretty_print(&tree), @r"
    const x = 3;
    f(x, 4);
    if (x > 0) g();
    ");
}

#[test]
fn test_propagation_without_folding() {
    let mut b = TreeBuilder::new();
    let (one, two) = (b.number("1"), b.number("2"));
    let sum = b.binary(one, BinaryOperator::Plus, two);
    let declaration = b.const_statement("x", sum);
    let x = b.ident("x");
    let call = b.call_statement("f", vec![x]);
    let mut tree = b.finish(vec![declaration, call]);

    common::optimize_with(&mut tree, Optimizations::none().with_propagate_constants(true));

    assert_snapshot!(common::pretty_print(&tree), @r"
    const x = 1 + 2;
    f(3);
    ");
}

#[test]
fn test_nothing_enabled_leaves_tree_untouched() {
    let mut b = TreeBuilder::new();
    let (one, two) = (b.number("1"), b.number("2"));
    let sum = b.binary(one, BinaryOperator::Plus, two);
    let declaration = b.const_statement("x", sum);
    let condition = b.boolean(true);
    let x = b.ident("x");
    let call = b.call_statement("f", vec![x]);
    let if_statement = b.if_statement(condition, call, None);
    let mut tree = b.finish(vec![declaration, if_statement]);
    let before = tree.clone();

    common::optimize_with(&mut tree, Optimizations::none());

    assert_eq!(tree, before);
}

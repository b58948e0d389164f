mod common;

use common::*;
use jayc::ast::*;

fn binary_parts(expr: &Expr) -> (BinaryOp, &Expr, &Expr) {
    match &expr.kind {
        ExprKind::Binary { op, lhs, rhs } => (*op, lhs.as_ref(), rhs.as_ref()),
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn additive_chain_is_left_associative() {
    let expr = parse_init_expr("a + b + c");
    let (op, lhs, rhs) = binary_parts(&expr);
    assert_eq!(op, BinaryOp::Plus);
    assert!(matches!(&rhs.kind, ExprKind::Variable { name } if name == "c"));
    let (inner_op, inner_lhs, inner_rhs) = binary_parts(lhs);
    assert_eq!(inner_op, BinaryOp::Plus);
    assert!(matches!(&inner_lhs.kind, ExprKind::Variable { name } if name == "a"));
    assert!(matches!(&inner_rhs.kind, ExprKind::Variable { name } if name == "b"));
}

#[test]
fn mixed_additive_operators_stay_left_deep() {
    let expr = parse_init_expr("a - b + c");
    let (op, lhs, _) = binary_parts(&expr);
    assert_eq!(op, BinaryOp::Plus);
    let (inner_op, _, _) = binary_parts(lhs);
    assert_eq!(inner_op, BinaryOp::Subtract);
}

#[test]
fn multiplicative_binds_tighter_than_additive() {
    let expr = parse_init_expr("a + b * c");
    let (op, lhs, rhs) = binary_parts(&expr);
    assert_eq!(op, BinaryOp::Plus);
    assert!(matches!(&lhs.kind, ExprKind::Variable { .. }));
    let (inner_op, _, _) = binary_parts(rhs);
    assert_eq!(inner_op, BinaryOp::Multiply);
}

#[test]
fn multiplicative_chain_is_left_deep() {
    let expr = parse_init_expr("a * b / c % d");
    let (op, lhs, _) = binary_parts(&expr);
    assert_eq!(op, BinaryOp::Modulo);
    let (div_op, div_lhs, _) = binary_parts(lhs);
    assert_eq!(div_op, BinaryOp::Divide);
    let (mul_op, _, _) = binary_parts(div_lhs);
    assert_eq!(mul_op, BinaryOp::Multiply);
}

#[test]
fn logical_and_above_equality() {
    let expr = parse_init_expr("a && b == c");
    let (op, lhs, rhs) = binary_parts(&expr);
    assert_eq!(op, BinaryOp::LogicalAnd);
    assert!(matches!(&lhs.kind, ExprKind::Variable { .. }));
    let (eq_op, _, _) = binary_parts(rhs);
    assert_eq!(eq_op, BinaryOp::Equal);
}

#[test]
fn assignment_is_right_associative() {
    let stmt = parse_stmt("x = y = z;");
    let expr = match &stmt {
        Stmt::Expression(es) => &es.expr,
        other => panic!("expected expression statement, got {:?}", other),
    };
    match &expr.kind {
        ExprKind::Assignment { op, target, value } => {
            assert_eq!(*op, AssignOp::Assign);
            assert!(matches!(&target.kind, ExprKind::Variable { name } if name == "x"));
            assert!(matches!(&value.kind, ExprKind::Assignment { .. }));
        }
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn plus_assign_statement() {
    let stmt = parse_stmt("x += 2;");
    match &stmt {
        Stmt::Expression(es) => {
            assert!(es.expr.is_statement_expression);
            assert!(matches!(
                &es.expr.kind,
                ExprKind::Assignment {
                    op: AssignOp::PlusAssign,
                    ..
                }
            ));
        }
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn relational_takes_one_operator_only() {
    let (_, diagnostics, had_error) = parse_stmt_lenient("boolean t = a > b > c;");
    assert!(had_error);
    assert!(
        diagnostics
            .iter()
            .any(|d| d.contains("> found where ; sought")),
        "unexpected diagnostics: {:?}",
        diagnostics
    );
}

#[test]
fn instanceof_relational() {
    let expr = parse_init_expr("x instanceof p.Foo");
    match &expr.kind {
        ExprKind::InstanceOf { expr: lhs, of_type } => {
            assert!(matches!(&lhs.kind, ExprKind::Variable { .. }));
            match of_type {
                Type::Named(name) => assert_eq!(name.name, "p.Foo"),
                other => panic!("expected named type, got {:?}", other),
            }
        }
        other => panic!("expected instanceof, got {:?}", other),
    }
}

#[test]
fn basic_cast_of_negation() {
    // (int) -3 is a cast of a negation, not a subtraction.
    let expr = parse_init_expr("(int) -3");
    match &expr.kind {
        ExprKind::Cast { of_type, expr: inner } => {
            assert_eq!(*of_type, Type::Int);
            match &inner.kind {
                ExprKind::Unary { op, operand } => {
                    assert_eq!(*op, UnaryOp::Negate);
                    assert!(matches!(&operand.kind, ExprKind::LiteralInt { value } if value == "3"));
                }
                other => panic!("expected negation, got {:?}", other),
            }
        }
        other => panic!("expected cast, got {:?}", other),
    }
}

#[test]
fn reference_cast_rejects_adjacent_unary() {
    // A reference-type cast recurses into simpleUnaryExpression, so the `-`
    // cannot start the operand; the parser reports and substitutes a
    // placeholder.
    let (stmt, diagnostics, had_error) = parse_stmt_lenient("int t = (Foo) -x;");
    assert!(had_error);
    assert!(
        diagnostics
            .iter()
            .any(|d| d.contains("Literal sought where - found")),
        "unexpected diagnostics: {:?}",
        diagnostics
    );
    let init = match &stmt {
        Stmt::VarDecl(decl) => decl.declarators[0].initializer.as_ref().unwrap(),
        other => panic!("expected declaration, got {:?}", other),
    };
    match &init.kind {
        ExprKind::Cast { expr: inner, .. } => {
            assert!(matches!(inner.kind, ExprKind::Wild));
        }
        other => panic!("expected cast, got {:?}", other),
    }
}

#[test]
fn reference_cast_of_primary() {
    let expr = parse_init_expr("(Foo) x");
    match &expr.kind {
        ExprKind::Cast { of_type, expr: inner } => {
            assert!(matches!(of_type, Type::Named(_)));
            assert!(matches!(&inner.kind, ExprKind::Variable { .. }));
        }
        other => panic!("expected cast, got {:?}", other),
    }
}

#[test]
fn array_type_cast() {
    let expr = parse_init_expr("(int[]) x");
    match &expr.kind {
        ExprKind::Cast { of_type, .. } => {
            assert_eq!(*of_type, Type::array_of(Type::Int));
        }
        other => panic!("expected cast, got {:?}", other),
    }
}

#[test]
fn parenthesized_binary_lhs_is_not_a_cast() {
    // (a + b) - c cannot be a cast, so the parenthesis is an ordinary
    // grouped expression.
    let expr = parse_init_expr("(a + b) - c");
    let (op, lhs, rhs) = binary_parts(&expr);
    assert_eq!(op, BinaryOp::Subtract);
    let (inner_op, _, _) = binary_parts(lhs);
    assert_eq!(inner_op, BinaryOp::Plus);
    assert!(matches!(&rhs.kind, ExprKind::Variable { name } if name == "c"));
}

#[test]
fn parenthesized_name_is_taken_as_cast() {
    // (a) - x matches the cast lookahead, so `a` is read as a reference
    // type and the `-` cannot start the operand.
    let (_, diagnostics, had_error) = parse_stmt_lenient("int t = (a) - x;");
    assert!(had_error);
    assert!(
        diagnostics
            .iter()
            .any(|d| d.contains("Literal sought where - found")),
        "unexpected diagnostics: {:?}",
        diagnostics
    );
}

#[test]
fn pre_increment_and_unary_operators() {
    let stmt = parse_stmt("++x;");
    match &stmt {
        Stmt::Expression(es) => {
            assert!(es.expr.is_statement_expression);
            assert!(matches!(
                &es.expr.kind,
                ExprKind::Unary {
                    op: UnaryOp::PreIncrement,
                    ..
                }
            ));
        }
        other => panic!("expected expression statement, got {:?}", other),
    }

    let negated = parse_init_expr("-x");
    assert!(matches!(
        &negated.kind,
        ExprKind::Unary {
            op: UnaryOp::Negate,
            ..
        }
    ));
    let plus = parse_init_expr("+x");
    assert!(matches!(
        &plus.kind,
        ExprKind::Unary {
            op: UnaryOp::UnaryPlus,
            ..
        }
    ));
    let not = parse_init_expr("!x");
    assert!(matches!(
        &not.kind,
        ExprKind::Unary {
            op: UnaryOp::LogicalNot,
            ..
        }
    ));
}

#[test]
fn post_decrement_applies_after_selectors() {
    let stmt = parse_stmt("a[i]--;");
    let expr = match &stmt {
        Stmt::Expression(es) => &es.expr,
        other => panic!("expected expression statement, got {:?}", other),
    };
    match &expr.kind {
        ExprKind::Unary { op, operand } => {
            assert_eq!(*op, UnaryOp::PostDecrement);
            assert!(matches!(&operand.kind, ExprKind::ArrayAccess { .. }));
        }
        other => panic!("expected post-decrement, got {:?}", other),
    }
}

#[test]
fn selector_chain_on_call_result() {
    let expr = parse_init_expr("f().g");
    match &expr.kind {
        ExprKind::FieldSelection { target, name, .. } => {
            assert_eq!(name, "g");
            assert!(matches!(
                target.as_deref().map(|t| &t.kind),
                Some(ExprKind::Message { .. })
            ));
        }
        other => panic!("expected field selection, got {:?}", other),
    }
}

#[test]
fn super_field_and_method() {
    let expr = parse_init_expr("super.f");
    match &expr.kind {
        ExprKind::FieldSelection { target, name, .. } => {
            assert_eq!(name, "f");
            assert!(matches!(
                target.as_deref().map(|t| &t.kind),
                Some(ExprKind::Super)
            ));
        }
        other => panic!("expected field selection, got {:?}", other),
    }

    let call = parse_init_expr("super.m(1)");
    match &call.kind {
        ExprKind::Message { target, name, arguments, .. } => {
            assert_eq!(name, "m");
            assert_eq!(arguments.len(), 1);
            assert!(matches!(
                target.as_deref().map(|t| &t.kind),
                Some(ExprKind::Super)
            ));
        }
        other => panic!("expected message expression, got {:?}", other),
    }
}

#[test]
fn new_object_creation() {
    let expr = parse_init_expr("new p.Foo(1, x)");
    match &expr.kind {
        ExprKind::New { of_type, arguments } => {
            assert!(matches!(of_type, Type::Named(name) if name.name == "p.Foo"));
            assert_eq!(arguments.len(), 2);
        }
        other => panic!("expected object creation, got {:?}", other),
    }
}

#[test]
fn new_array_with_two_dimension_expressions() {
    let expr = parse_init_expr("new int[2][3]");
    match &expr.kind {
        ExprKind::NewArray {
            of_type,
            dimensions,
        } => {
            assert_eq!(*of_type, Type::array_of(Type::array_of(Type::Int)));
            assert_eq!(dimensions.len(), 2);
        }
        other => panic!("expected new-array, got {:?}", other),
    }
}

#[test]
fn literals() {
    assert!(matches!(
        parse_init_expr("'a'").kind,
        ExprKind::LiteralChar { .. }
    ));
    assert!(matches!(
        parse_init_expr("\"hi\"").kind,
        ExprKind::LiteralString { .. }
    ));
    assert!(matches!(parse_init_expr("true").kind, ExprKind::LiteralTrue));
    assert!(matches!(parse_init_expr("false").kind, ExprKind::LiteralFalse));
    assert!(matches!(parse_init_expr("null").kind, ExprKind::LiteralNull));
}

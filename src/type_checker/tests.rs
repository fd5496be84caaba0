//! Unit tests for comparison and assignability rules.

use crate::{
    ast::{
        expressions::{Expr, NewObjectExpr, RelationalOperationExpr, ValueExpr, Variable, VariableExpr},
        reference::{ConcreteReference, VaporReference},
        types::TypeNode,
        values::Value,
    },
    type_checker::validator::{check_no_null_elements, is_assignable},
};

fn variable(name: &str, type_: TypeNode) -> Expr {
    VariableExpr::with_variable(Variable::new(name, type_).unwrap()).into()
}

fn null() -> Expr {
    ValueExpr::with_value(Value::Null).into()
}

fn numeric_types() -> Vec<TypeNode> {
    vec![
        TypeNode::byte(),
        TypeNode::short(),
        TypeNode::int(),
        TypeNode::long(),
        TypeNode::float(),
        TypeNode::double(),
        TypeNode::char(),
        TypeNode::byte_object(),
        TypeNode::short_object(),
        TypeNode::int_object(),
        TypeNode::long_object(),
        TypeNode::float_object(),
        TypeNode::double_object(),
        TypeNode::char_object(),
    ]
}

fn echo_request() -> TypeNode {
    TypeNode::with_reference(
        VaporReference::builder()
            .package("com.google.showcase.v1beta1")
            .name("EchoRequest")
            .build()
            .unwrap(),
    )
}

fn list_type() -> TypeNode {
    TypeNode::with_reference(ConcreteReference::with_class("java.util.List").unwrap())
}

fn assert_comparable(left: TypeNode, right: TypeNode) {
    let result = RelationalOperationExpr::equal_to(variable("x", left.clone()), variable("y", right.clone()));
    assert!(result.is_ok(), "expected `{}` == `{}` to be legal", left, right);
}

fn assert_incomparable(left: TypeNode, right: TypeNode) {
    let error = RelationalOperationExpr::not_equal_to(variable("x", left.clone()), variable("y", right.clone()))
        .expect_err(&format!("expected `{}` != `{}` to be rejected", left, right));
    assert_eq!(error.get_error_name(), "TypeIncompatible");
}

// RELATIONAL OPERATIONS

#[test]
fn test_all_numeric_pairs_are_comparable() {
    for left in numeric_types() {
        for right in numeric_types() {
            assert_comparable(left.clone(), right);
        }
    }
}

#[test]
fn test_boolean_pairs_are_comparable() {
    assert_comparable(TypeNode::boolean(), TypeNode::boolean());
    assert_comparable(TypeNode::boolean(), TypeNode::boolean_object());
    assert_comparable(TypeNode::boolean_object(), TypeNode::boolean());
    assert_comparable(TypeNode::boolean_object(), TypeNode::boolean_object());
}

#[test]
fn test_boolean_against_non_boolean_is_rejected() {
    let mut others = numeric_types();
    others.push(TypeNode::string());
    others.push(echo_request());
    others.push(TypeNode::int().to_array().unwrap());

    for boolean in [TypeNode::boolean(), TypeNode::boolean_object()] {
        for other in &others {
            assert_incomparable(boolean.clone(), other.clone());
            assert_incomparable(other.clone(), boolean.clone());
        }
    }
}

#[test]
fn test_float_against_boxed_boolean_is_rejected() {
    let error = RelationalOperationExpr::equal_to(
        variable("x", TypeNode::float()),
        variable("y", TypeNode::boolean_object()),
    )
    .unwrap_err();

    assert_eq!(error.get_error_name(), "TypeIncompatible");
    assert_eq!(error.get_node(), "relational operation");
    assert!(error.to_string().contains("=="));
    assert!(error.to_string().contains("float"));
    assert!(error.to_string().contains("Boolean"));
}

#[test]
fn test_null_comparisons() {
    for reference in [
        TypeNode::string(),
        TypeNode::object(),
        TypeNode::int_object(),
        TypeNode::boolean_object(),
        echo_request(),
        TypeNode::int().to_array().unwrap(),
    ] {
        assert!(RelationalOperationExpr::equal_to(variable("x", reference.clone()), null()).is_ok());
        assert!(RelationalOperationExpr::equal_to(null(), variable("x", reference)).is_ok());
    }

    assert!(RelationalOperationExpr::equal_to(null(), null()).is_ok());

    for primitive in [TypeNode::int(), TypeNode::double(), TypeNode::boolean(), TypeNode::char()] {
        assert!(RelationalOperationExpr::equal_to(variable("x", primitive.clone()), null()).is_err());
        assert!(RelationalOperationExpr::equal_to(null(), variable("x", primitive)).is_err());
    }
}

#[test]
fn test_array_comparisons() {
    let ints = TypeNode::int().to_array().unwrap();
    let longs = TypeNode::long().to_array().unwrap();
    let boxed_ints = TypeNode::int_object().to_array().unwrap();
    let strings = TypeNode::string().to_array().unwrap();

    assert_comparable(ints.clone(), ints.clone());
    assert_comparable(strings.clone(), strings.clone());

    assert_incomparable(ints.clone(), longs);
    assert_incomparable(ints.clone(), boxed_ints);
    assert_incomparable(ints.clone(), strings.clone());

    assert_incomparable(ints.clone(), TypeNode::int());
    assert_incomparable(strings, TypeNode::string());
    assert_incomparable(TypeNode::object(), ints);
}

#[test]
fn test_reference_comparisons() {
    assert_comparable(echo_request(), echo_request());
    assert_comparable(TypeNode::string(), TypeNode::string());
    assert_comparable(list_type(), list_type());

    assert_incomparable(echo_request(), TypeNode::string());
    assert_incomparable(list_type(), echo_request());
}

#[test]
fn test_top_type_comparisons() {
    for other in [
        TypeNode::object(),
        TypeNode::string(),
        TypeNode::int_object(),
        TypeNode::double_object(),
        echo_request(),
        list_type(),
    ] {
        assert_comparable(TypeNode::object(), other.clone());
        assert_comparable(other, TypeNode::object());
    }

    assert_incomparable(TypeNode::object(), TypeNode::int());
    assert_incomparable(TypeNode::long(), TypeNode::object());
}

/// The top type accepts a boxed boolean but not a primitive one; keep it that way.
#[test]
fn test_top_type_against_booleans() {
    assert_comparable(TypeNode::object(), TypeNode::boolean_object());
    assert_comparable(TypeNode::boolean_object(), TypeNode::object());
    assert_incomparable(TypeNode::object(), TypeNode::boolean());
    assert_incomparable(TypeNode::boolean(), TypeNode::object());
}

#[test]
fn test_new_top_object_is_comparable_with_references() {
    let new_object = NewObjectExpr::with_type(TypeNode::object()).unwrap();
    assert!(RelationalOperationExpr::equal_to(variable("request", echo_request()), new_object.clone()).is_ok());
    assert!(RelationalOperationExpr::equal_to(variable("count", TypeNode::int()), new_object).is_err());
}

#[test]
fn test_void_operands_are_rejected() {
    let run = crate::ast::expressions::MethodInvocationExpr::builder()
        .method_name("run")
        .build()
        .unwrap();
    assert!(RelationalOperationExpr::equal_to(run.clone(), null()).is_err());
    assert!(RelationalOperationExpr::equal_to(run, variable("x", TypeNode::int())).is_err());
}

// ASSIGNABILITY

#[test]
fn test_primitive_widening() {
    assert!(is_assignable(&TypeNode::long(), &TypeNode::int()));
    assert!(is_assignable(&TypeNode::double(), &TypeNode::float()));
    assert!(is_assignable(&TypeNode::int(), &TypeNode::char()));
    assert!(is_assignable(&TypeNode::short(), &TypeNode::byte()));

    assert!(!is_assignable(&TypeNode::int(), &TypeNode::long()));
    assert!(!is_assignable(&TypeNode::char(), &TypeNode::byte()));
    assert!(!is_assignable(&TypeNode::short(), &TypeNode::char()));
    assert!(!is_assignable(&TypeNode::int(), &TypeNode::boolean()));
}

#[test]
fn test_boxing_and_unboxing() {
    assert!(is_assignable(&TypeNode::int_object(), &TypeNode::int()));
    assert!(is_assignable(&TypeNode::int(), &TypeNode::int_object()));
    assert!(is_assignable(&TypeNode::long(), &TypeNode::int_object()));
    assert!(is_assignable(&TypeNode::boolean(), &TypeNode::boolean_object()));

    assert!(!is_assignable(&TypeNode::long_object(), &TypeNode::int()));
    assert!(!is_assignable(&TypeNode::int_object(), &TypeNode::long_object()));
}

#[test]
fn test_reference_assignability() {
    let array_list = TypeNode::with_reference(ConcreteReference::with_class("java.util.ArrayList").unwrap());
    let string_list = TypeNode::with_reference(
        ConcreteReference::builder()
            .class_name("java.util.List")
            .generics(vec![ConcreteReference::with_class("java.lang.String").unwrap()])
            .build()
            .unwrap(),
    );

    assert!(is_assignable(&list_type(), &array_list));
    assert!(is_assignable(&string_list, &list_type()));
    assert!(is_assignable(&TypeNode::object(), &echo_request()));
    assert!(is_assignable(&TypeNode::object(), &TypeNode::int()));
    assert!(is_assignable(&echo_request(), &TypeNode::null_type()));

    assert!(!is_assignable(&array_list, &list_type()));
    assert!(!is_assignable(&echo_request(), &TypeNode::string()));
    assert!(!is_assignable(&TypeNode::int(), &TypeNode::null_type()));
    assert!(!is_assignable(&TypeNode::void(), &TypeNode::void()));
}

#[test]
fn test_array_assignability() {
    let objects = TypeNode::object().to_array().unwrap();
    let strings = TypeNode::string().to_array().unwrap();
    let ints = TypeNode::int().to_array().unwrap();
    let longs = TypeNode::long().to_array().unwrap();

    assert!(is_assignable(&objects, &strings));
    assert!(is_assignable(&ints, &ints));
    assert!(is_assignable(&TypeNode::object(), &ints));

    assert!(!is_assignable(&strings, &objects));
    assert!(!is_assignable(&longs, &ints));
    assert!(!is_assignable(&objects, &ints));
}

#[test]
fn test_check_no_null_elements() {
    assert_eq!(check_no_null_elements(vec![Some(1), Some(2)], "items", "test").unwrap(), vec![1, 2]);
    assert!(check_no_null_elements::<i32>(vec![], "items", "test").unwrap().is_empty());

    let error = check_no_null_elements(vec![Some(1), None], "try body", "try-catch").unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidStructure");
    assert_eq!(error.get_node(), "try-catch");
    assert!(error.to_string().contains("try body"));
}

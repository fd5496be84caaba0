use crate::{
    ast::{
        expressions::{Expr, RelationalOperator},
        types::TypeNode,
    },
    errors::errors::{Error, ErrorImpl},
};

/// Checks that `lhs` and `rhs` may be compared with `operator`.
pub fn check_comparable(operator: RelationalOperator, lhs: &Expr, rhs: &Expr) -> Result<(), Error> {
    let left = lhs.type_();
    let right = rhs.type_();

    if is_comparable(&left, &right, lhs, rhs) {
        return Ok(());
    }

    Err(Error::new(
        ErrorImpl::TypeIncompatible {
            operator: operator.symbol().to_string(),
            left: left.to_string(),
            right: right.to_string(),
        },
        "relational operation",
    ))
}

/// Ordered rules, first match wins.
fn is_comparable(left: &TypeNode, right: &TypeNode, lhs: &Expr, rhs: &Expr) -> bool {
    if left.is_void() || right.is_void() {
        return false;
    }

    if left.is_null() || right.is_null() {
        let other = if left.is_null() { right } else { left };
        return other.is_reference();
    }

    if left.is_numeric() && right.is_numeric() {
        return true;
    }

    if left.is_boolean() && right.is_boolean() {
        return true;
    }

    // `Object` against a boxed boolean falls through to the top-type rule.
    if left.is_boolean() != right.is_boolean() && !left.is_object() && !right.is_object() {
        return false;
    }

    if left.is_array() && right.is_array() {
        return left.element_type() == right.element_type();
    }

    if left.is_array() != right.is_array() {
        return false;
    }

    if left.is_object() || right.is_object() {
        let other = if left.is_object() { right } else { left };
        return other.is_reference();
    }

    if left.is_reference() && right.is_reference() {
        return left == right || is_new_top_object(lhs) || is_new_top_object(rhs);
    }

    false
}

fn is_new_top_object(expr: &Expr) -> bool {
    matches!(expr, Expr::NewObject(new_object) if new_object.is_top_type_instance())
}

use crate::{
    ast::{
        expressions::Expr,
        types::{TypeKind, TypeNode},
    },
    errors::errors::Error,
};

/// Unwraps every element of a builder collection, or names the field holding a gap.
pub fn check_no_null_elements<T>(items: Vec<Option<T>>, field: &str, node: &'static str) -> Result<Vec<T>, Error> {
    let count = items.len();
    let present: Vec<T> = items.into_iter().flatten().collect();
    if present.len() != count {
        return Err(Error::invalid_structure(
            node,
            field,
            format!("{} contains {} missing element(s)", field, count - present.len()),
        ));
    }
    Ok(present)
}

/// Conditions of `if`, `while` and `?:` must be `boolean` or `Boolean`.
pub fn check_condition(node: &'static str, condition: &Expr) -> Result<(), Error> {
    let type_ = condition.type_();
    if type_.is_boolean() {
        Ok(())
    } else {
        Err(Error::invalid_structure(
            node,
            "condition",
            format!("expected a boolean condition, found `{}`", type_),
        ))
    }
}

/// Whether a value of type `value` may be stored in a slot of type `target`.
pub fn is_assignable(target: &TypeNode, value: &TypeNode) -> bool {
    if target == value {
        return !target.is_void();
    }
    if target.is_void() || value.is_void() {
        return false;
    }
    if value.is_null() {
        return target.is_reference();
    }
    if target.is_object() {
        return true;
    }

    match (target.is_primitive(), value.is_primitive()) {
        (true, true) => widens(value.kind(), target.kind()),
        (true, false) => value
            .unboxed_kind()
            .is_some_and(|kind| widens(kind, target.kind())),
        (false, true) => target.unboxed_kind() == Some(value.kind()),
        (false, false) => is_reference_assignable(target, value),
    }
}

fn is_reference_assignable(target: &TypeNode, value: &TypeNode) -> bool {
    match (target.element_type(), value.element_type()) {
        (Some(target_element), Some(value_element)) => {
            target_element.is_reference()
                && value_element.is_reference()
                && is_assignable(&target_element, &value_element)
        }
        (None, None) => match (target.reference(), value.reference()) {
            (Some(target_reference), Some(value_reference)) => {
                let erased_match = target_reference.full_name() == value_reference.full_name()
                    && (target_reference.generics().is_empty()
                        || value_reference.generics().is_empty()
                        || target_reference.generics() == value_reference.generics());
                erased_match || value_reference.is_subtype_of(&target_reference.full_name())
            }
            _ => false,
        },
        _ => false,
    }
}

/// Primitive widening conversions, identity included.
fn widens(from: TypeKind, to: TypeKind) -> bool {
    use TypeKind::*;

    from == to
        || matches!(
            (from, to),
            (Byte, Short | Int | Long | Float | Double)
                | (Short, Int | Long | Float | Double)
                | (Char, Int | Long | Float | Double)
                | (Int, Long | Float | Double)
                | (Long, Float | Double)
                | (Float, Double)
        )
}

use std::collections::HashMap;

use crate::{
    ast::{
        expressions::{Expr, MethodInvocationExpr, NewObjectExpr, ValueExpr, Variable, VariableExpr},
        reference::{ConcreteReference, Reference, VaporReference},
        types::{TypeKind, TypeNode},
        values::{PrimitiveValue, Value},
    },
    errors::errors::{Error, ErrorImpl},
};

const NODE: &str = "default value";

/// A message field as the composer sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub type_: TypeNode,
    pub is_message: bool,
    pub is_enum: bool,
    pub is_repeated: bool,
    pub is_map: bool,
    pub is_oneof: bool,
}

impl Field {
    /// A singular scalar field.
    pub fn new(name: &str, type_: TypeNode) -> Self {
        Field {
            name: name.to_string(),
            type_,
            is_message: false,
            is_enum: false,
            is_repeated: false,
            is_map: false,
            is_oneof: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub name: String,
    pub type_: TypeNode,
    pub fields: Vec<Field>,
}

/// `String.hashCode()` as the JVM computes it.
pub fn java_hash_code(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

/// `display_name` and `displayName` both become `DisplayName`.
pub fn to_upper_camel_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

fn unsupported(field: &Field) -> Error {
    Error::new(
        ErrorImpl::UnsupportedFieldKind {
            field: field.name.clone(),
            type_: field.type_.to_string(),
        },
        NODE,
    )
}

fn byte_string_type() -> TypeNode {
    TypeNode::known_class("com.google.protobuf", "ByteString")
}

/// A placeholder value for `field`, as used in generated samples and tests.
///
/// With `use_explicit_generics`, collections spell out their element types
/// instead of relying on the diamond.
pub fn create_default_value(field: &Field, use_explicit_generics: bool) -> Result<Expr, Error> {
    if field.is_repeated {
        let class = if field.is_map { "java.util.HashMap" } else { "java.util.ArrayList" };
        let mut builder = ConcreteReference::builder().class_name(class);
        if use_explicit_generics {
            let generics = field.type_.reference().map(|r| r.generics()).unwrap_or(&[]);
            let arity = if field.is_map { 2 } else { 1 };
            if generics.len() < arity {
                return Err(unsupported(field));
            }
            builder = builder.generics(generics[..arity].to_vec());
        }
        let type_ = TypeNode::with_reference(builder.build()?);
        return Ok(NewObjectExpr::builder().type_(type_).is_generic(true).build()?.into());
    }

    if field.is_enum {
        let number = PrimitiveValue::new(TypeNode::int(), "0")?;
        return Ok(MethodInvocationExpr::builder()
            .static_reference_type(field.type_.clone())
            .method_name("forNumber")
            .arguments(vec![Expr::from(ValueExpr::with_value(Value::Primitive(number)))])
            .return_type(field.type_.clone())
            .build()?
            .into());
    }

    if field.is_message {
        let new_builder = MethodInvocationExpr::builder()
            .static_reference_type(field.type_.clone())
            .method_name("newBuilder")
            .return_type(builder_type(&field.type_)?)
            .build()?;
        return Ok(MethodInvocationExpr::builder()
            .expr_reference(new_builder)
            .method_name("build")
            .return_type(field.type_.clone())
            .build()?
            .into());
    }

    let hash = java_hash_code(&field.name);

    if field.type_.is_string() {
        let text = format!("{}{}", field.name, hash);
        return Ok(ValueExpr::with_value(Value::string(&text)).into());
    }

    if field.type_.is_primitive() && field.type_.is_numeric() && field.type_.kind() != TypeKind::Char {
        let value = PrimitiveValue::new(field.type_.clone(), &hash.to_string())?;
        return Ok(ValueExpr::with_value(Value::Primitive(value)).into());
    }

    if field.type_ == TypeNode::boolean() {
        let value = PrimitiveValue::new(TypeNode::boolean(), "true")?;
        return Ok(ValueExpr::with_value(Value::Primitive(value)).into());
    }

    if field.type_ == byte_string_type() {
        let empty = VariableExpr::builder()
            .variable(Variable::new("EMPTY", byte_string_type())?)
            .static_reference_type(byte_string_type())
            .build()?;
        return Ok(empty.into());
    }

    Err(unsupported(field))
}

/// The nested `Builder` class generated for a message type.
fn builder_type(message_type: &TypeNode) -> Result<TypeNode, Error> {
    let reference: &Reference = message_type.reference().ok_or_else(|| {
        Error::invalid_structure(NODE, "message type", format!("`{}` is not a message", message_type))
    })?;

    let mut enclosing: Vec<&str> = reference.enclosing_class_names().iter().map(String::as_str).collect();
    enclosing.push(reference.name());

    let builder = VaporReference::builder()
        .package(reference.package())
        .enclosing_class_names(enclosing)
        .name("Builder")
        .build()?;
    Ok(TypeNode::with_reference(builder))
}

/// `Message.newBuilder().setA(..).addAllB(..).build()` with a default for every
/// settable field.
///
/// Oneof members are skipped so setters cannot collide, and singular message or enum
/// fields are skipped unless their type is in `known_messages`.
pub fn create_simple_message_builder_expr(
    message: &Message,
    known_messages: &HashMap<String, Message>,
) -> Result<Expr, Error> {
    let builder_type = builder_type(&message.type_)?;

    let mut builder_expr = MethodInvocationExpr::builder()
        .static_reference_type(message.type_.clone())
        .method_name("newBuilder")
        .return_type(builder_type.clone())
        .build()?;

    for field in &message.fields {
        let is_unknown_type = (field.is_message || field.is_enum)
            && !field.is_repeated
            && !field
                .type_
                .reference()
                .is_some_and(|r| known_messages.contains_key(r.name()));
        if field.is_oneof || is_unknown_type {
            continue;
        }

        let prefix = match (field.is_repeated, field.is_map) {
            (true, true) => "putAll",
            (true, false) => "addAll",
            (false, _) => "set",
        };
        let setter = format!("{}{}", prefix, to_upper_camel_case(&field.name));

        builder_expr = MethodInvocationExpr::builder()
            .expr_reference(builder_expr)
            .method_name(&setter)
            .arguments(vec![create_default_value(field, true)?])
            .return_type(builder_type.clone())
            .build()?;
    }

    Ok(MethodInvocationExpr::builder()
        .expr_reference(builder_expr)
        .method_name("build")
        .return_type(message.type_.clone())
        .build()?
        .into())
}

use crate::errors::errors::Error;

use super::{
    ast::IdentifierNode,
    types::{TypeKind, TypeNode},
};

/// Literal and keyword values that can stand as a leaf expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Primitive(PrimitiveValue),
    String(String),
    Null,
    This(TypeNode),
    Super(TypeNode),
    EnumConstant { type_: TypeNode, name: IdentifierNode },
}

impl Value {
    pub fn string(text: &str) -> Self {
        Value::String(text.to_string())
    }

    pub fn this(type_: TypeNode) -> Result<Self, Error> {
        Value::check_reference("this", &type_)?;
        Ok(Value::This(type_))
    }

    pub fn super_(type_: TypeNode) -> Result<Self, Error> {
        Value::check_reference("super", &type_)?;
        Ok(Value::Super(type_))
    }

    pub fn enum_constant(type_: TypeNode, name: &str) -> Result<Self, Error> {
        Value::check_reference("enum constant", &type_)?;
        Ok(Value::EnumConstant {
            type_,
            name: IdentifierNode::new(name)?,
        })
    }

    fn check_reference(node: &'static str, type_: &TypeNode) -> Result<(), Error> {
        if type_.is_reference() && !type_.is_array() && !type_.is_null() {
            Ok(())
        } else {
            Err(Error::invalid_structure(
                node,
                "type",
                format!("`{}` is not a class type", type_),
            ))
        }
    }

    pub fn type_(&self) -> TypeNode {
        match self {
            Value::Primitive(primitive) => primitive.type_.clone(),
            Value::String(_) => TypeNode::string(),
            Value::Null => TypeNode::null_type(),
            Value::This(type_) | Value::Super(type_) => type_.clone(),
            Value::EnumConstant { type_, .. } => type_.clone(),
        }
    }
}

/// A primitive literal, kept as the exact text to emit.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveValue {
    type_: TypeNode,
    literal: String,
}

impl PrimitiveValue {
    pub fn new(type_: TypeNode, literal: &str) -> Result<Self, Error> {
        if !type_.is_primitive() {
            return Err(Error::invalid_structure(
                "primitive value",
                "type",
                format!("`{}` is not a primitive type", type_),
            ));
        }
        if !is_valid_literal(type_.kind(), literal) {
            return Err(Error::invalid_structure(
                "primitive value",
                "value",
                format!("`{}` is not a valid {} literal", literal, type_),
            ));
        }
        Ok(PrimitiveValue {
            type_,
            literal: literal.to_string(),
        })
    }

    pub fn type_(&self) -> &TypeNode {
        &self.type_
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }
}

fn is_valid_literal(kind: TypeKind, literal: &str) -> bool {
    match kind {
        TypeKind::Boolean => literal == "true" || literal == "false",
        TypeKind::Char => is_char_literal(literal) || literal.parse::<u16>().is_ok(),
        TypeKind::Byte => literal.parse::<i8>().is_ok(),
        TypeKind::Short => literal.parse::<i16>().is_ok(),
        TypeKind::Int => literal.parse::<i32>().is_ok(),
        TypeKind::Long => literal
            .strip_suffix(&['L', 'l'][..])
            .unwrap_or(literal)
            .parse::<i64>()
            .is_ok(),
        TypeKind::Float => literal
            .strip_suffix(&['F', 'f'][..])
            .unwrap_or(literal)
            .parse::<f32>()
            .is_ok_and(f32::is_finite),
        TypeKind::Double => literal
            .strip_suffix(&['D', 'd'][..])
            .unwrap_or(literal)
            .parse::<f64>()
            .is_ok_and(f64::is_finite),
        TypeKind::Void | TypeKind::Object => false,
    }
}

/// `'a'`, `'\n'`, `'\u0041'` or `'\101'`: one character or one escape in single quotes.
fn is_char_literal(literal: &str) -> bool {
    let Some(inner) = literal
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
    else {
        return false;
    };

    let mut chars = inner.chars();
    match (chars.next(), chars.as_str()) {
        (Some('\\'), escape) => match escape.as_bytes() {
            [b'b' | b't' | b'n' | b'f' | b'r' | b'"' | b'\'' | b'\\'] => true,
            [b'u', hex @ ..] => hex.len() == 4 && hex.iter().all(u8::is_ascii_hexdigit),
            [b'0'..=b'3', rest @ ..] if rest.len() <= 2 => rest.iter().all(is_octal_digit),
            [b'4'..=b'7', rest @ ..] if rest.len() <= 1 => rest.iter().all(is_octal_digit),
            _ => false,
        },
        (Some('\''), _) => false,
        (Some(_), rest) => rest.is_empty(),
        (None, _) => false,
    }
}

fn is_octal_digit(byte: &u8) -> bool {
    (b'0'..=b'7').contains(byte)
}

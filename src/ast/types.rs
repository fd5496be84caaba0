//! Type references for the target language.
//!
//! This module defines `TypeNode`, the type carried by every typed expression:
//!
//! - Primitive numeric, boolean and void kinds
//! - Boxed numerics, boxed boolean and `String`, as references into `java.lang`
//! - Arrays of any of the above
//! - References to declared classes, concrete or generated
//!
//! Type nodes are immutable values and compare structurally, so the same node
//! can be reused by any number of expressions.

use std::fmt::Display;

use crate::errors::errors::Error;

use super::reference::{Reference, EXCEPTION_CLASS, OBJECT_CLASS};

const NULL_TYPE_CLASS: &str = "javax.lang.model.type.NullType";

/// The kind of a type. Boxed types and `String` are `Object` kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    Boolean,
    Void,
    Object,
}

impl TypeKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Byte => "byte",
            TypeKind::Short => "short",
            TypeKind::Int => "int",
            TypeKind::Long => "long",
            TypeKind::Float => "float",
            TypeKind::Double => "double",
            TypeKind::Char => "char",
            TypeKind::Boolean => "boolean",
            TypeKind::Void => "void",
            TypeKind::Object => "Object",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TypeKind::Byte
                | TypeKind::Short
                | TypeKind::Int
                | TypeKind::Long
                | TypeKind::Float
                | TypeKind::Double
                | TypeKind::Char
        )
    }

    /// Name of the `java.lang` wrapper class for a primitive kind.
    pub fn boxed_name(&self) -> Option<&'static str> {
        match self {
            TypeKind::Byte => Some("Byte"),
            TypeKind::Short => Some("Short"),
            TypeKind::Int => Some("Integer"),
            TypeKind::Long => Some("Long"),
            TypeKind::Float => Some("Float"),
            TypeKind::Double => Some("Double"),
            TypeKind::Char => Some("Character"),
            TypeKind::Boolean => Some("Boolean"),
            TypeKind::Void | TypeKind::Object => None,
        }
    }

    fn from_boxed_name(name: &str) -> Option<TypeKind> {
        [
            TypeKind::Byte,
            TypeKind::Short,
            TypeKind::Int,
            TypeKind::Long,
            TypeKind::Float,
            TypeKind::Double,
            TypeKind::Char,
            TypeKind::Boolean,
        ]
        .into_iter()
        .find(|kind| kind.boxed_name() == Some(name))
    }
}

/// Type Node
/// A reference to a type, as written in a declaration or carried by an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    kind: TypeKind,
    is_array: bool,
    reference: Option<Reference>,
}

impl TypeNode {
    pub fn builder() -> TypeNodeBuilder {
        TypeNodeBuilder::default()
    }

    pub fn to_builder(&self) -> TypeNodeBuilder {
        TypeNodeBuilder {
            kind: Some(self.kind),
            is_array: self.is_array,
            reference: self.reference.clone(),
        }
    }

    fn primitive(kind: TypeKind) -> Self {
        TypeNode {
            kind,
            is_array: false,
            reference: None,
        }
    }

    pub(crate) fn known_class(package: &str, name: &str) -> Self {
        TypeNode::with_reference(Reference::known(package, name))
    }

    fn boxed(kind: TypeKind) -> Self {
        TypeNode::known_class("java.lang", kind.boxed_name().unwrap_or("Object"))
    }

    pub fn with_reference(reference: Reference) -> Self {
        TypeNode {
            kind: TypeKind::Object,
            is_array: false,
            reference: Some(reference),
        }
    }

    pub fn byte() -> Self {
        TypeNode::primitive(TypeKind::Byte)
    }
    pub fn short() -> Self {
        TypeNode::primitive(TypeKind::Short)
    }
    pub fn int() -> Self {
        TypeNode::primitive(TypeKind::Int)
    }
    pub fn long() -> Self {
        TypeNode::primitive(TypeKind::Long)
    }
    pub fn float() -> Self {
        TypeNode::primitive(TypeKind::Float)
    }
    pub fn double() -> Self {
        TypeNode::primitive(TypeKind::Double)
    }
    pub fn char() -> Self {
        TypeNode::primitive(TypeKind::Char)
    }
    pub fn boolean() -> Self {
        TypeNode::primitive(TypeKind::Boolean)
    }
    pub fn void() -> Self {
        TypeNode::primitive(TypeKind::Void)
    }

    pub fn byte_object() -> Self {
        TypeNode::boxed(TypeKind::Byte)
    }
    pub fn short_object() -> Self {
        TypeNode::boxed(TypeKind::Short)
    }
    pub fn int_object() -> Self {
        TypeNode::boxed(TypeKind::Int)
    }
    pub fn long_object() -> Self {
        TypeNode::boxed(TypeKind::Long)
    }
    pub fn float_object() -> Self {
        TypeNode::boxed(TypeKind::Float)
    }
    pub fn double_object() -> Self {
        TypeNode::boxed(TypeKind::Double)
    }
    pub fn char_object() -> Self {
        TypeNode::boxed(TypeKind::Char)
    }
    pub fn boolean_object() -> Self {
        TypeNode::boxed(TypeKind::Boolean)
    }

    pub fn string() -> Self {
        TypeNode::known_class("java.lang", "String")
    }

    pub fn object() -> Self {
        TypeNode::known_class("java.lang", "Object")
    }

    /// The type of the `null` literal.
    pub fn null_type() -> Self {
        TypeNode::known_class("javax.lang.model.type", "NullType")
    }

    /// An array whose elements have this node's type.
    pub fn to_array(&self) -> Result<Self, Error> {
        self.to_builder().is_array(true).build()
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    pub fn is_array(&self) -> bool {
        self.is_array
    }

    /// The type of one element, when this node is an array.
    pub fn element_type(&self) -> Option<TypeNode> {
        if !self.is_array {
            return None;
        }
        Some(TypeNode {
            kind: self.kind,
            is_array: false,
            reference: self.reference.clone(),
        })
    }

    pub fn is_void(&self) -> bool {
        self.kind == TypeKind::Void && !self.is_array
    }

    /// Unboxed numeric or boolean, not an array.
    pub fn is_primitive(&self) -> bool {
        !self.is_array && self.kind != TypeKind::Object && self.kind != TypeKind::Void
    }

    /// Anything a variable can hold a reference to: arrays, boxed types, strings, classes.
    pub fn is_reference(&self) -> bool {
        self.is_array || self.kind == TypeKind::Object
    }

    fn is_class(&self, full_name: &str) -> bool {
        !self.is_array
            && self
                .reference
                .as_ref()
                .is_some_and(|r| r.generics().is_empty() && r.full_name() == full_name)
    }

    fn boxed_kind(&self) -> Option<TypeKind> {
        if self.is_array {
            return None;
        }
        let reference = self.reference.as_ref()?;
        if reference.package() != "java.lang" || !reference.enclosing_class_names().is_empty() {
            return None;
        }
        TypeKind::from_boxed_name(reference.name())
    }

    pub fn is_boxed(&self) -> bool {
        self.boxed_kind().is_some()
    }

    /// The primitive kind behind this node, seeing through boxing.
    pub fn unboxed_kind(&self) -> Option<TypeKind> {
        if self.is_primitive() {
            Some(self.kind)
        } else {
            self.boxed_kind()
        }
    }

    /// Numeric, primitive or boxed, of any width.
    pub fn is_numeric(&self) -> bool {
        self.unboxed_kind().is_some_and(|kind| kind.is_numeric())
    }

    /// `boolean` or `Boolean`.
    pub fn is_boolean(&self) -> bool {
        self.unboxed_kind() == Some(TypeKind::Boolean)
    }

    pub fn is_string(&self) -> bool {
        self.is_class("java.lang.String")
    }

    /// The universal top reference type.
    pub fn is_object(&self) -> bool {
        self.is_class(OBJECT_CLASS)
    }

    pub fn is_null(&self) -> bool {
        self.is_class(NULL_TYPE_CLASS)
    }

    pub fn is_exception_type(&self) -> bool {
        !self.is_array
            && self
                .reference
                .as_ref()
                .is_some_and(|r| r.is_subtype_of(EXCEPTION_CLASS))
    }
}

impl Display for TypeNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reference {
            Some(_) if self.is_null() => write!(f, "null")?,
            Some(reference) => write!(f, "{}", reference)?,
            None => write!(f, "{}", self.kind.keyword())?,
        }
        if self.is_array {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypeNodeBuilder {
    kind: Option<TypeKind>,
    is_array: bool,
    reference: Option<Reference>,
}

impl TypeNodeBuilder {
    pub fn kind(mut self, kind: TypeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn is_array(mut self, is_array: bool) -> Self {
        self.is_array = is_array;
        self
    }

    pub fn reference(mut self, reference: Reference) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn build(self) -> Result<TypeNode, Error> {
        let kind = match (self.kind, &self.reference) {
            (Some(kind), _) => kind,
            (None, Some(_)) => TypeKind::Object,
            (None, None) => return Err(Error::invalid_structure("type", "kind", "must be set")),
        };

        match (&kind, &self.reference) {
            (TypeKind::Object, None) => {
                return Err(Error::invalid_structure(
                    "type",
                    "reference",
                    "reference types must name a class",
                ))
            }
            (TypeKind::Object, Some(reference)) if reference.name().is_empty() => {
                return Err(Error::invalid_structure("type", "reference", "must have a name"))
            }
            (TypeKind::Object, Some(_)) => {}
            (_, Some(_)) => {
                return Err(Error::invalid_structure(
                    "type",
                    "reference",
                    format!("{} types carry no reference", kind.keyword()),
                ))
            }
            (_, None) => {}
        }

        if kind == TypeKind::Void && self.is_array {
            return Err(Error::invalid_structure("type", "is array", "void arrays do not exist"));
        }

        Ok(TypeNode {
            kind,
            is_array: self.is_array,
            reference: self.reference,
        })
    }
}

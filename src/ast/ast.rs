use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::errors::Error;

use super::types::TypeNode;

lazy_static! {
    static ref IDENTIFIER_PATTERN: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap();
    pub static ref RESERVED_WORDS: HashSet<&'static str> = {
        [
            "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
            "const", "continue", "default", "do", "double", "else", "enum", "extends", "final",
            "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
            "interface", "long", "native", "new", "package", "private", "protected", "public",
            "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
            "throw", "throws", "transient", "try", "void", "volatile", "while", "true", "false",
            "null",
        ]
        .into_iter()
        .collect()
    };
}

/// Whether `name` can be used verbatim as a Java identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER_PATTERN.is_match(name) && !RESERVED_WORDS.contains(name)
}

/// Identifier Node
/// A validated name for a variable, method or class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentifierNode {
    name: String,
}

impl IdentifierNode {
    pub fn new(name: &str) -> Result<Self, Error> {
        if name.is_empty() {
            return Err(Error::invalid_structure("identifier", "name", "must not be empty"));
        }
        if RESERVED_WORDS.contains(name) {
            return Err(Error::invalid_structure(
                "identifier",
                "name",
                format!("`{}` is a reserved word", name),
            ));
        }
        if !IDENTIFIER_PATTERN.is_match(name) {
            return Err(Error::invalid_structure(
                "identifier",
                "name",
                format!("`{}` is not a valid identifier", name),
            ));
        }
        Ok(IdentifierNode {
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Visibility of a declaration. `Local` is package-private and prints nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeNode {
    Public,
    Protected,
    Private,
    #[default]
    Local,
}

impl ScopeNode {
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            ScopeNode::Public => Some("public"),
            ScopeNode::Protected => Some("protected"),
            ScopeNode::Private => Some("private"),
            ScopeNode::Local => None,
        }
    }
}

/// Annotation Node
/// `@Type` or `@Type("description")`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationNode {
    type_: TypeNode,
    description: Option<String>,
}

impl AnnotationNode {
    pub fn with_type(type_: TypeNode) -> Result<Self, Error> {
        if !type_.is_reference() || type_.is_array() {
            return Err(Error::invalid_structure(
                "annotation",
                "type",
                format!("`{}` is not an annotation type", type_),
            ));
        }
        Ok(AnnotationNode {
            type_,
            description: None,
        })
    }

    pub fn with_type_and_description(type_: TypeNode, description: &str) -> Result<Self, Error> {
        let mut annotation = AnnotationNode::with_type(type_)?;
        annotation.description = Some(description.to_string());
        Ok(annotation)
    }

    pub fn override_() -> Self {
        AnnotationNode {
            type_: TypeNode::known_class("java.lang", "Override"),
            description: None,
        }
    }

    pub fn deprecated() -> Self {
        AnnotationNode {
            type_: TypeNode::known_class("java.lang", "Deprecated"),
            description: None,
        }
    }

    pub fn generated(description: &str) -> Self {
        AnnotationNode {
            type_: TypeNode::known_class("javax.annotation", "Generated"),
            description: Some(description.to_string()),
        }
    }

    pub fn type_(&self) -> &TypeNode {
        &self.type_
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Comments attached to declarations or standing alone as statements.
#[derive(Debug, Clone, PartialEq)]
pub enum Comment {
    /// `// text`, one marker per line.
    Line(String),
    /// `/* ... */`
    Block(String),
    /// `/** ... */`, one entry per paragraph line.
    JavaDoc(Vec<String>),
}

use std::fmt::Display;

use thiserror::Error;
use tracing::debug;

/// A construction failure, tagged with the kind of node whose builder raised it.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error} (while building {node})")]
pub struct Error {
    internal_error: ErrorImpl,
    node: &'static str,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, node: &'static str) -> Self {
        debug!(node, error = %error_impl, "rejected node");
        Error {
            internal_error: error_impl,
            node,
        }
    }

    pub fn invalid_structure(node: &'static str, field: &str, message: impl Into<String>) -> Self {
        Error::new(
            ErrorImpl::InvalidStructure {
                field: field.to_string(),
                message: message.into(),
            },
            node,
        )
    }

    pub fn get_node(&self) -> &'static str {
        self.node
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::InvalidStructure { .. } => "InvalidStructure",
            ErrorImpl::TypeIncompatible { .. } => "TypeIncompatible",
            ErrorImpl::UnsupportedFieldKind { .. } => "UnsupportedFieldKind",
            ErrorImpl::DuplicateDeclaration { .. } => "DuplicateDeclaration",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::InvalidStructure { field, message } => {
                ErrorTip::Suggestion(format!("Check the {} of this {}: {}", field, self.node, message))
            }
            ErrorImpl::TypeIncompatible {
                operator,
                left,
                right,
            } => ErrorTip::Suggestion(format!(
                "`{}` cannot be applied to `{}` and `{}`",
                operator, left, right
            )),
            ErrorImpl::UnsupportedFieldKind { field, type_ } => ErrorTip::Suggestion(format!(
                "No default value rule for field `{}` of type `{}`",
                field, type_
            )),
            ErrorImpl::DuplicateDeclaration { .. } => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("invalid {field}: {message}")]
    InvalidStructure { field: String, message: String },
    #[error("incompatible operand types for {operator:?}: {left} and {right}")]
    TypeIncompatible {
        operator: String,
        left: String,
        right: String,
    },
    #[error("default value for field {field:?} with type {type_} is not supported")]
    UnsupportedFieldKind { field: String, type_: String },
    #[error("{name:?} is already declared")]
    DuplicateDeclaration { name: String },
}

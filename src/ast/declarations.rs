use std::collections::HashSet;

use crate::{
    errors::errors::{Error, ErrorImpl},
    type_checker::validator::{check_no_null_elements, is_assignable},
};

use super::{
    ast::{is_valid_identifier, AnnotationNode, Comment, IdentifierNode, ScopeNode},
    expressions::{Expr, VariableExpr},
    statements::Statement,
    types::TypeNode,
};

fn duplicate(node: &'static str, name: impl Into<String>) -> Error {
    Error::new(ErrorImpl::DuplicateDeclaration { name: name.into() }, node)
}

/// Method Definition
///
/// A method or constructor. Abstract methods have no body and no return expression;
/// constructors take their name from the class they construct.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDefinition {
    header_comments: Vec<Comment>,
    annotations: Vec<AnnotationNode>,
    scope: ScopeNode,
    is_static: bool,
    is_final: bool,
    is_abstract: bool,
    is_constructor: bool,
    return_type: TypeNode,
    method_identifier: IdentifierNode,
    arguments: Vec<VariableExpr>,
    throws_exceptions: Vec<TypeNode>,
    body: Vec<Statement>,
    return_expr: Option<Expr>,
}

impl MethodDefinition {
    pub fn builder() -> MethodDefinitionBuilder {
        MethodDefinitionBuilder::default()
    }

    /// A constructor for `type_`; the method name is the class's simple name.
    pub fn constructor_builder(type_: TypeNode) -> MethodDefinitionBuilder {
        MethodDefinitionBuilder {
            is_constructor: true,
            return_type: Some(type_),
            ..MethodDefinitionBuilder::default()
        }
    }

    pub fn to_builder(&self) -> MethodDefinitionBuilder {
        MethodDefinitionBuilder {
            header_comments: self.header_comments.clone(),
            annotations: self.annotations.clone(),
            scope: self.scope,
            is_static: self.is_static,
            is_final: self.is_final,
            is_abstract: self.is_abstract,
            is_constructor: self.is_constructor,
            is_override: false,
            return_type: Some(self.return_type.clone()),
            name: Some(self.method_identifier.name().to_string()),
            arguments: self.arguments.iter().cloned().map(Some).collect(),
            throws_exceptions: self.throws_exceptions.clone(),
            body: self.body.iter().cloned().map(Some).collect(),
            return_expr: self.return_expr.clone(),
        }
    }

    pub fn name(&self) -> &str {
        self.method_identifier.name()
    }

    /// Name plus erased argument types, the identity used for duplicate detection.
    pub fn signature(&self) -> String {
        let arguments: Vec<String> = self.arguments.iter().map(|a| erased_name(a.type_())).collect();
        format!("{}({})", self.name(), arguments.join(", "))
    }

    pub fn header_comments(&self) -> &[Comment] {
        &self.header_comments
    }

    pub fn annotations(&self) -> &[AnnotationNode] {
        &self.annotations
    }

    pub fn scope(&self) -> ScopeNode {
        self.scope
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn is_constructor(&self) -> bool {
        self.is_constructor
    }

    pub fn return_type(&self) -> &TypeNode {
        &self.return_type
    }

    pub fn arguments(&self) -> &[VariableExpr] {
        &self.arguments
    }

    pub fn throws_exceptions(&self) -> &[TypeNode] {
        &self.throws_exceptions
    }

    pub fn body(&self) -> &[Statement] {
        &self.body
    }

    pub fn return_expr(&self) -> Option<&Expr> {
        self.return_expr.as_ref()
    }
}

/// `java.util.List` for `List<String>`; generics do not take part in overloading.
fn erased_name(type_: &TypeNode) -> String {
    let name = match type_.reference() {
        Some(reference) => reference.full_name(),
        None => type_.kind().keyword().to_string(),
    };
    if type_.is_array() {
        format!("{}[]", name)
    } else {
        name
    }
}

#[derive(Debug, Clone, Default)]
pub struct MethodDefinitionBuilder {
    header_comments: Vec<Comment>,
    annotations: Vec<AnnotationNode>,
    scope: ScopeNode,
    is_static: bool,
    is_final: bool,
    is_abstract: bool,
    is_constructor: bool,
    is_override: bool,
    return_type: Option<TypeNode>,
    name: Option<String>,
    arguments: Vec<Option<VariableExpr>>,
    throws_exceptions: Vec<TypeNode>,
    body: Vec<Option<Statement>>,
    return_expr: Option<Expr>,
}

impl MethodDefinitionBuilder {
    pub fn header_comments(mut self, comments: Vec<Comment>) -> Self {
        self.header_comments = comments;
        self
    }

    pub fn annotations(mut self, annotations: Vec<AnnotationNode>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn scope(mut self, scope: ScopeNode) -> Self {
        self.scope = scope;
        self
    }

    pub fn is_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn is_final(mut self, is_final: bool) -> Self {
        self.is_final = is_final;
        self
    }

    pub fn is_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn is_override(mut self, is_override: bool) -> Self {
        self.is_override = is_override;
        self
    }

    pub fn return_type(mut self, type_: TypeNode) -> Self {
        self.return_type = Some(type_);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn arguments<I, V>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Option<VariableExpr>>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    pub fn throws_exceptions(mut self, exceptions: Vec<TypeNode>) -> Self {
        self.throws_exceptions = exceptions;
        self
    }

    pub fn body<I, S>(mut self, body: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Option<Statement>>,
    {
        self.body = body.into_iter().map(Into::into).collect();
        self
    }

    pub fn return_expr(mut self, expr: impl Into<Expr>) -> Self {
        self.return_expr = Some(expr.into());
        self
    }

    pub fn build(self) -> Result<MethodDefinition, Error> {
        const NODE: &str = "method definition";

        let return_type = self.return_type.unwrap_or_else(TypeNode::void);

        let name = match (self.is_constructor, self.name) {
            (_, Some(name)) => name,
            (true, None) => return_type
                .reference()
                .map(|r| r.name().to_string())
                .ok_or_else(|| Error::invalid_structure(NODE, "return type", "constructors must return a class"))?,
            (false, None) => return Err(Error::invalid_structure(NODE, "name", "must be set")),
        };
        let method_identifier = IdentifierNode::new(&name)?;

        if self.is_constructor {
            if self.is_abstract || self.is_static {
                return Err(Error::invalid_structure(
                    NODE,
                    "modifiers",
                    format!("constructor `{}` cannot be abstract or static", name),
                ));
            }
            if self.return_expr.is_some() {
                return Err(Error::invalid_structure(
                    NODE,
                    "return expression",
                    format!("constructor `{}` cannot return a value", name),
                ));
            }
            if return_type.reference().map(|r| r.name()) != Some(name.as_str()) {
                return Err(Error::invalid_structure(
                    NODE,
                    "name",
                    format!("constructor `{}` must be named after `{}`", name, return_type),
                ));
            }
        } else if self.is_abstract {
            if self.is_static || self.is_final {
                return Err(Error::invalid_structure(
                    NODE,
                    "modifiers",
                    format!("abstract method `{}` cannot be static or final", name),
                ));
            }
            if !self.body.is_empty() || self.return_expr.is_some() {
                return Err(Error::invalid_structure(
                    NODE,
                    "body",
                    format!("abstract method `{}` cannot have a body", name),
                ));
            }
        } else if return_type.is_void() {
            if self.return_expr.is_some() {
                return Err(Error::invalid_structure(
                    NODE,
                    "return expression",
                    format!("void method `{}` cannot return a value", name),
                ));
            }
        } else {
            let return_expr = self.return_expr.as_ref().ok_or_else(|| {
                Error::invalid_structure(
                    NODE,
                    "return expression",
                    format!("method `{}` must return a `{}`", name, return_type),
                )
            })?;
            let actual = return_expr.type_();
            if !is_assignable(&return_type, &actual) {
                return Err(Error::new(
                    ErrorImpl::TypeIncompatible {
                        operator: String::from("return"),
                        left: return_type.to_string(),
                        right: actual.to_string(),
                    },
                    NODE,
                ));
            }
        }

        let arguments = check_no_null_elements(self.arguments, "arguments", NODE)?;
        let mut argument_names = HashSet::new();
        for argument in &arguments {
            if !argument.is_decl() {
                return Err(Error::invalid_structure(
                    NODE,
                    "arguments",
                    format!("argument `{}` must be a declaration", argument.name()),
                ));
            }
            if !argument_names.insert(argument.name()) {
                return Err(duplicate(NODE, argument.name()));
            }
        }

        if let Some(type_) = self.throws_exceptions.iter().find(|t| !t.is_exception_type()) {
            return Err(Error::invalid_structure(
                NODE,
                "throws",
                format!("`{}` is not an exception type", type_),
            ));
        }

        let mut annotations = self.annotations;
        let override_ = AnnotationNode::override_();
        if self.is_override && !annotations.contains(&override_) {
            annotations.insert(0, override_);
        }

        Ok(MethodDefinition {
            header_comments: self.header_comments,
            annotations,
            scope: self.scope,
            is_static: self.is_static,
            is_final: self.is_final,
            is_abstract: self.is_abstract,
            is_constructor: self.is_constructor,
            return_type,
            method_identifier,
            arguments,
            throws_exceptions: self.throws_exceptions,
            body: check_no_null_elements(self.body, "body", NODE)?,
            return_expr: self.return_expr,
        })
    }
}

/// Class Definition
///
/// A top-level class (with a package) or a nested class (without one). Members are
/// kept in declaration order: fields and initializers, then methods, then nested classes.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDefinition {
    header_comments: Vec<Comment>,
    annotations: Vec<AnnotationNode>,
    package: String,
    scope: ScopeNode,
    is_static: bool,
    is_final: bool,
    is_abstract: bool,
    is_nested: bool,
    class_identifier: IdentifierNode,
    extends_type: Option<TypeNode>,
    implements_types: Vec<TypeNode>,
    statements: Vec<Statement>,
    methods: Vec<MethodDefinition>,
    nested_classes: Vec<ClassDefinition>,
}

impl ClassDefinition {
    pub fn builder() -> ClassDefinitionBuilder {
        ClassDefinitionBuilder::default()
    }

    pub fn to_builder(&self) -> ClassDefinitionBuilder {
        ClassDefinitionBuilder {
            header_comments: self.header_comments.clone(),
            annotations: self.annotations.clone(),
            package: Some(self.package.clone()).filter(|p| !p.is_empty()),
            scope: self.scope,
            is_static: self.is_static,
            is_final: self.is_final,
            is_abstract: self.is_abstract,
            is_nested: self.is_nested,
            name: Some(self.class_identifier.name().to_string()),
            extends_type: self.extends_type.clone(),
            implements_types: self.implements_types.clone(),
            statements: self.statements.iter().cloned().map(Some).collect(),
            methods: self.methods.iter().cloned().map(Some).collect(),
            nested_classes: self.nested_classes.iter().cloned().map(Some).collect(),
        }
    }

    pub fn name(&self) -> &str {
        self.class_identifier.name()
    }

    pub fn header_comments(&self) -> &[Comment] {
        &self.header_comments
    }

    pub fn annotations(&self) -> &[AnnotationNode] {
        &self.annotations
    }

    /// Empty for nested classes.
    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn scope(&self) -> ScopeNode {
        self.scope
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn is_nested(&self) -> bool {
        self.is_nested
    }

    pub fn extends_type(&self) -> Option<&TypeNode> {
        self.extends_type.as_ref()
    }

    pub fn implements_types(&self) -> &[TypeNode] {
        &self.implements_types
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn methods(&self) -> &[MethodDefinition] {
        &self.methods
    }

    pub fn nested_classes(&self) -> &[ClassDefinition] {
        &self.nested_classes
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClassDefinitionBuilder {
    header_comments: Vec<Comment>,
    annotations: Vec<AnnotationNode>,
    package: Option<String>,
    scope: ScopeNode,
    is_static: bool,
    is_final: bool,
    is_abstract: bool,
    is_nested: bool,
    name: Option<String>,
    extends_type: Option<TypeNode>,
    implements_types: Vec<TypeNode>,
    statements: Vec<Option<Statement>>,
    methods: Vec<Option<MethodDefinition>>,
    nested_classes: Vec<Option<ClassDefinition>>,
}

impl ClassDefinitionBuilder {
    pub fn header_comments(mut self, comments: Vec<Comment>) -> Self {
        self.header_comments = comments;
        self
    }

    pub fn annotations(mut self, annotations: Vec<AnnotationNode>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn package(mut self, package: &str) -> Self {
        self.package = Some(package.to_string());
        self
    }

    pub fn scope(mut self, scope: ScopeNode) -> Self {
        self.scope = scope;
        self
    }

    pub fn is_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn is_final(mut self, is_final: bool) -> Self {
        self.is_final = is_final;
        self
    }

    pub fn is_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn is_nested(mut self, is_nested: bool) -> Self {
        self.is_nested = is_nested;
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn extends_type(mut self, type_: TypeNode) -> Self {
        self.extends_type = Some(type_);
        self
    }

    pub fn implements_types(mut self, types: Vec<TypeNode>) -> Self {
        self.implements_types = types;
        self
    }

    pub fn statements<I, S>(mut self, statements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Option<Statement>>,
    {
        self.statements = statements.into_iter().map(Into::into).collect();
        self
    }

    pub fn methods<I, M>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Option<MethodDefinition>>,
    {
        self.methods = methods.into_iter().map(Into::into).collect();
        self
    }

    pub fn nested_classes<I, C>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Option<ClassDefinition>>,
    {
        self.nested_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<ClassDefinition, Error> {
        const NODE: &str = "class definition";

        let name = self
            .name
            .ok_or_else(|| Error::invalid_structure(NODE, "name", "must be set"))?;
        let class_identifier = IdentifierNode::new(&name)?;

        let package = match (self.is_nested, self.package) {
            (true, Some(_)) => {
                return Err(Error::invalid_structure(
                    NODE,
                    "package",
                    format!("nested class `{}` cannot declare a package", name),
                ))
            }
            (true, None) => String::new(),
            (false, None) => {
                return Err(Error::invalid_structure(
                    NODE,
                    "package",
                    format!("top-level class `{}` must have a package", name),
                ))
            }
            (false, Some(package)) => {
                if package.is_empty() || !package.split('.').all(is_valid_identifier) {
                    return Err(Error::invalid_structure(
                        NODE,
                        "package",
                        format!("`{}` is not a valid package name", package),
                    ));
                }
                package
            }
        };

        if !self.is_nested {
            if self.is_static {
                return Err(Error::invalid_structure(
                    NODE,
                    "modifiers",
                    format!("top-level class `{}` cannot be static", name),
                ));
            }
            if matches!(self.scope, ScopeNode::Private | ScopeNode::Protected) {
                return Err(Error::invalid_structure(
                    NODE,
                    "scope",
                    format!("top-level class `{}` must be public or package-private", name),
                ));
            }
        }
        if self.is_abstract && self.is_final {
            return Err(Error::invalid_structure(
                NODE,
                "modifiers",
                format!("class `{}` cannot be both abstract and final", name),
            ));
        }

        if let Some(type_) = &self.extends_type {
            if !type_.is_reference() || type_.is_array() || type_.is_boxed() || type_.is_null() {
                return Err(Error::invalid_structure(
                    NODE,
                    "extends",
                    format!("cannot extend `{}`", type_),
                ));
            }
        }
        if let Some(type_) = self
            .implements_types
            .iter()
            .find(|t| !t.is_reference() || t.is_array() || t.is_null())
        {
            return Err(Error::invalid_structure(
                NODE,
                "implements",
                format!("cannot implement `{}`", type_),
            ));
        }

        let statements = check_no_null_elements(self.statements, "statements", NODE)?;
        let methods = check_no_null_elements(self.methods, "methods", NODE)?;
        let nested_classes = check_no_null_elements(self.nested_classes, "nested classes", NODE)?;

        check_class_body(NODE, &statements, &methods, self.is_abstract)?;
        for method in &methods {
            if method.is_constructor && method.name() != name {
                return Err(Error::invalid_structure(
                    NODE,
                    "methods",
                    format!("constructor `{}` does not construct `{}`", method.name(), name),
                ));
            }
        }

        let mut class_names = HashSet::new();
        for nested in &nested_classes {
            if !nested.is_nested {
                return Err(Error::invalid_structure(
                    NODE,
                    "nested classes",
                    format!("`{}` must be marked as nested", nested.name()),
                ));
            }
            if nested.name() == name || !class_names.insert(nested.name()) {
                return Err(duplicate(NODE, nested.name()));
            }
        }

        Ok(ClassDefinition {
            header_comments: self.header_comments,
            annotations: self.annotations,
            package,
            scope: self.scope,
            is_static: self.is_static,
            is_final: self.is_final,
            is_abstract: self.is_abstract,
            is_nested: self.is_nested,
            class_identifier,
            extends_type: self.extends_type,
            implements_types: self.implements_types,
            statements,
            methods,
            nested_classes,
        })
    }
}

/// Member rules shared by named and anonymous class bodies: only field
/// declarations, initializer blocks and comments as statements, no duplicate
/// fields or method signatures, and abstract methods only in abstract classes.
pub(crate) fn check_class_body(
    node: &'static str,
    statements: &[Statement],
    methods: &[MethodDefinition],
    is_abstract: bool,
) -> Result<(), Error> {
    let mut field_names = HashSet::new();
    for statement in statements {
        if let Some(field) = field_name(node, statement)? {
            if !field_names.insert(field) {
                return Err(duplicate(node, field));
            }
        }
    }

    let mut signatures = HashSet::new();
    for method in methods {
        let signature = method.signature();
        if signatures.contains(&signature) {
            return Err(duplicate(node, signature));
        }
        signatures.insert(signature);
        if method.is_abstract && !is_abstract {
            return Err(Error::invalid_structure(
                node,
                "methods",
                format!("abstract method `{}` in a concrete class", method.name()),
            ));
        }
    }
    Ok(())
}

/// The field a class-level statement declares, if any. Rejects statements
/// that cannot appear directly in a class body.
fn field_name<'a>(node: &'static str, statement: &'a Statement) -> Result<Option<&'a str>, Error> {
    let not_a_member = |kind: &str| {
        Error::invalid_structure(
            node,
            "statements",
            format!("{} statements cannot appear in a class body", kind),
        )
    };

    match statement {
        Statement::Expr(statement) => match statement.expr() {
            Expr::Variable(variable) if variable.is_decl() => Ok(Some(variable.name())),
            Expr::Assignment(assignment) if assignment.variable_expr().is_decl() => {
                Ok(Some(assignment.variable_expr().name()))
            }
            expr => Err(not_a_member(&format!("{:?}", expr.get_expr_type()))),
        },
        Statement::Block(_) | Statement::Comment(_) | Statement::EmptyLine => Ok(None),
        Statement::If(_) => Err(not_a_member("if")),
        Statement::For(_) => Err(not_a_member("for")),
        Statement::While(_) => Err(not_a_member("while")),
        Statement::TryCatch(_) => Err(not_a_member("try-catch")),
    }
}

use crate::{
    errors::errors::{Error, ErrorImpl},
    type_checker::{
        relational::check_comparable,
        validator::{check_condition, check_no_null_elements, is_assignable},
    },
};

use super::{
    ast::{AnnotationNode, IdentifierNode, ScopeNode},
    declarations::{check_class_body, MethodDefinition},
    reference::Reference,
    statements::Statement,
    types::TypeNode,
    values::Value,
};

/// Expression Types
///
/// Tags for the expression variants, used in diagnostics and statement checks.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum ExprType {
    Value,
    Variable,
    Ternary,
    Assignment,
    MethodInvocation,
    NewObject,
    Cast,
    InstanceOf,
    RelationalOperation,
    AnonymousClass,
    ReferenceConstructor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Value(ValueExpr),
    Variable(VariableExpr),
    Ternary(TernaryExpr),
    Assignment(AssignmentExpr),
    MethodInvocation(MethodInvocationExpr),
    NewObject(NewObjectExpr),
    Cast(CastExpr),
    InstanceOf(InstanceOfExpr),
    RelationalOperation(RelationalOperationExpr),
    AnonymousClass(AnonymousClassExpr),
    ReferenceConstructor(ReferenceConstructorExpr),
}

impl Expr {
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expr::Value(_) => ExprType::Value,
            Expr::Variable(_) => ExprType::Variable,
            Expr::Ternary(_) => ExprType::Ternary,
            Expr::Assignment(_) => ExprType::Assignment,
            Expr::MethodInvocation(_) => ExprType::MethodInvocation,
            Expr::NewObject(_) => ExprType::NewObject,
            Expr::Cast(_) => ExprType::Cast,
            Expr::InstanceOf(_) => ExprType::InstanceOf,
            Expr::RelationalOperation(_) => ExprType::RelationalOperation,
            Expr::AnonymousClass(_) => ExprType::AnonymousClass,
            Expr::ReferenceConstructor(_) => ExprType::ReferenceConstructor,
        }
    }

    /// The type this expression evaluates to; `void` for calls with no value.
    pub fn type_(&self) -> TypeNode {
        match self {
            Expr::Value(value) => value.value.type_(),
            Expr::Variable(variable) => variable.variable.type_.clone(),
            Expr::Ternary(ternary) => ternary.type_(),
            Expr::Assignment(assignment) => assignment.variable_expr.variable.type_.clone(),
            Expr::MethodInvocation(invocation) => invocation.return_type.clone(),
            Expr::NewObject(new_object) => new_object.type_.clone(),
            Expr::Cast(cast) => cast.type_.clone(),
            Expr::InstanceOf(_) | Expr::RelationalOperation(_) => TypeNode::boolean(),
            Expr::AnonymousClass(anonymous) => anonymous.type_.clone(),
            Expr::ReferenceConstructor(_) => TypeNode::void(),
        }
    }

    pub fn is_declaration(&self) -> bool {
        matches!(self, Expr::Variable(variable) if variable.is_decl)
    }
}

macro_rules! impl_into_expr {
    ($($node:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$node> for Expr {
                fn from(node: $node) -> Self {
                    Expr::$variant(node)
                }
            }
        )*
    };
}

impl_into_expr!(
    ValueExpr => Value,
    VariableExpr => Variable,
    TernaryExpr => Ternary,
    AssignmentExpr => Assignment,
    MethodInvocationExpr => MethodInvocation,
    NewObjectExpr => NewObject,
    CastExpr => Cast,
    InstanceOfExpr => InstanceOf,
    RelationalOperationExpr => RelationalOperation,
    AnonymousClassExpr => AnonymousClass,
    ReferenceConstructorExpr => ReferenceConstructor,
);

/// Receivers must hold an object; primitives and `void` have no members.
fn check_receiver(node: &'static str, receiver: &Expr) -> Result<(), Error> {
    let type_ = receiver.type_();
    if type_.is_void() || type_.is_primitive() {
        return Err(Error::invalid_structure(
            node,
            "receiver",
            format!("cannot dereference a value of type `{}`", type_),
        ));
    }
    Ok(())
}

fn check_static_receiver(node: &'static str, type_: &TypeNode) -> Result<(), Error> {
    if !type_.is_reference() || type_.is_array() || type_.is_null() {
        return Err(Error::invalid_structure(
            node,
            "static reference type",
            format!("`{}` is not a class type", type_),
        ));
    }
    Ok(())
}

// VALUES

/// Value Expression
/// Wraps a literal or keyword value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueExpr {
    value: Value,
}

impl ValueExpr {
    pub fn with_value(value: Value) -> Self {
        ValueExpr { value }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// A named, typed slot. Shared by declarations and later references to them.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    identifier: IdentifierNode,
    type_: TypeNode,
}

impl Variable {
    pub fn new(name: &str, type_: TypeNode) -> Result<Self, Error> {
        if type_.is_void() {
            return Err(Error::invalid_structure(
                "variable",
                "type",
                format!("`{}` cannot have type void", name),
            ));
        }
        Ok(Variable {
            identifier: IdentifierNode::new(name)?,
            type_,
        })
    }

    pub fn name(&self) -> &str {
        self.identifier.name()
    }

    pub fn type_(&self) -> &TypeNode {
        &self.type_
    }
}

/// Variable Expression
/// Either a declaration (`final String name`) or a use (`this.name`, `Foo.NAME`, `name`).
#[derive(Debug, Clone, PartialEq)]
pub struct VariableExpr {
    variable: Variable,
    is_decl: bool,
    scope: ScopeNode,
    is_static: bool,
    is_final: bool,
    annotations: Vec<AnnotationNode>,
    expr_reference: Option<Box<Expr>>,
    static_reference_type: Option<TypeNode>,
}

impl VariableExpr {
    /// A plain use of `variable`, with no receiver.
    pub fn with_variable(variable: Variable) -> Self {
        VariableExpr {
            variable,
            is_decl: false,
            scope: ScopeNode::Local,
            is_static: false,
            is_final: false,
            annotations: vec![],
            expr_reference: None,
            static_reference_type: None,
        }
    }

    /// A local declaration of `variable`.
    pub fn declaration(variable: Variable) -> Self {
        VariableExpr {
            is_decl: true,
            ..VariableExpr::with_variable(variable)
        }
    }

    pub fn builder() -> VariableExprBuilder {
        VariableExprBuilder::default()
    }

    pub fn to_builder(&self) -> VariableExprBuilder {
        VariableExprBuilder {
            variable: Some(self.variable.clone()),
            is_decl: self.is_decl,
            scope: self.scope,
            is_static: self.is_static,
            is_final: self.is_final,
            annotations: self.annotations.clone(),
            expr_reference: self.expr_reference.as_deref().cloned(),
            static_reference_type: self.static_reference_type.clone(),
        }
    }

    pub fn name(&self) -> &str {
        self.variable.name()
    }

    pub fn type_(&self) -> &TypeNode {
        &self.variable.type_
    }

    pub fn variable(&self) -> &Variable {
        &self.variable
    }

    pub fn is_decl(&self) -> bool {
        self.is_decl
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

    pub fn annotations(&self) -> &[AnnotationNode] {
        &self.annotations
    }

    pub fn expr_reference(&self) -> Option<&Expr> {
        self.expr_reference.as_deref()
    }

    pub fn static_reference_type(&self) -> Option<&TypeNode> {
        self.static_reference_type.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct VariableExprBuilder {
    variable: Option<Variable>,
    is_decl: bool,
    scope: ScopeNode,
    is_static: bool,
    is_final: bool,
    annotations: Vec<AnnotationNode>,
    expr_reference: Option<Expr>,
    static_reference_type: Option<TypeNode>,
}

impl VariableExprBuilder {
    pub fn variable(mut self, variable: Variable) -> Self {
        self.variable = Some(variable);
        self
    }

    pub fn is_decl(mut self, is_decl: bool) -> Self {
        self.is_decl = is_decl;
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

    pub fn annotations(mut self, annotations: Vec<AnnotationNode>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn expr_reference(mut self, receiver: impl Into<Expr>) -> Self {
        self.expr_reference = Some(receiver.into());
        self
    }

    pub fn static_reference_type(mut self, type_: TypeNode) -> Self {
        self.static_reference_type = Some(type_);
        self
    }

    pub fn build(self) -> Result<VariableExpr, Error> {
        const NODE: &str = "variable expression";

        let variable = self
            .variable
            .ok_or_else(|| Error::invalid_structure(NODE, "variable", "must be set"))?;

        if self.expr_reference.is_some() && self.static_reference_type.is_some() {
            return Err(Error::invalid_structure(
                NODE,
                "receiver",
                "only one of an expression or a static type can qualify a variable",
            ));
        }

        if self.is_decl {
            if self.expr_reference.is_some() || self.static_reference_type.is_some() {
                return Err(Error::invalid_structure(
                    NODE,
                    "receiver",
                    format!("declaration of `{}` cannot be qualified", variable.name()),
                ));
            }
        } else {
            if self.scope != ScopeNode::Local {
                return Err(Error::invalid_structure(
                    NODE,
                    "scope",
                    format!("only declarations of `{}` may carry a scope", variable.name()),
                ));
            }
            if self.is_static || self.is_final {
                return Err(Error::invalid_structure(
                    NODE,
                    "modifiers",
                    format!("only declarations of `{}` may be static or final", variable.name()),
                ));
            }
            if !self.annotations.is_empty() {
                return Err(Error::invalid_structure(
                    NODE,
                    "annotations",
                    format!("only declarations of `{}` may be annotated", variable.name()),
                ));
            }
        }

        if let Some(receiver) = &self.expr_reference {
            check_receiver(NODE, receiver)?;
        }
        if let Some(type_) = &self.static_reference_type {
            check_static_receiver(NODE, type_)?;
        }

        Ok(VariableExpr {
            variable,
            is_decl: self.is_decl,
            scope: self.scope,
            is_static: self.is_static,
            is_final: self.is_final,
            annotations: self.annotations,
            expr_reference: self.expr_reference.map(Box::new),
            static_reference_type: self.static_reference_type,
        })
    }
}

// OPERATIONS

/// Ternary Expression
/// `condition ? then : else`
#[derive(Debug, Clone, PartialEq)]
pub struct TernaryExpr {
    condition: Box<Expr>,
    then_expr: Box<Expr>,
    else_expr: Box<Expr>,
}

impl TernaryExpr {
    pub fn new(condition: impl Into<Expr>, then_expr: impl Into<Expr>, else_expr: impl Into<Expr>) -> Result<Self, Error> {
        const NODE: &str = "ternary expression";

        let condition = condition.into();
        let then_expr = then_expr.into();
        let else_expr = else_expr.into();

        check_condition(NODE, &condition)?;

        let then_type = then_expr.type_();
        let else_type = else_expr.type_();
        if !is_assignable(&then_type, &else_type) && !is_assignable(&else_type, &then_type) {
            return Err(Error::new(
                ErrorImpl::TypeIncompatible {
                    operator: String::from("?:"),
                    left: then_type.to_string(),
                    right: else_type.to_string(),
                },
                NODE,
            ));
        }

        Ok(TernaryExpr {
            condition: Box::new(condition),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        })
    }

    pub fn condition(&self) -> &Expr {
        &self.condition
    }

    pub fn then_expr(&self) -> &Expr {
        &self.then_expr
    }

    pub fn else_expr(&self) -> &Expr {
        &self.else_expr
    }

    fn type_(&self) -> TypeNode {
        let then_type = self.then_expr.type_();
        if then_type.is_null() {
            self.else_expr.type_()
        } else {
            then_type
        }
    }
}

/// Assignment Expression
/// `target = value`, where the target is a declaration or an existing variable.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    variable_expr: VariableExpr,
    value_expr: Box<Expr>,
}

impl AssignmentExpr {
    pub fn new(variable_expr: VariableExpr, value_expr: impl Into<Expr>) -> Result<Self, Error> {
        let value_expr = value_expr.into();
        let target_type = variable_expr.type_();
        let value_type = value_expr.type_();

        if !is_assignable(target_type, &value_type) {
            return Err(Error::new(
                ErrorImpl::TypeIncompatible {
                    operator: String::from("="),
                    left: target_type.to_string(),
                    right: value_type.to_string(),
                },
                "assignment expression",
            ));
        }

        Ok(AssignmentExpr {
            variable_expr,
            value_expr: Box::new(value_expr),
        })
    }

    pub fn variable_expr(&self) -> &VariableExpr {
        &self.variable_expr
    }

    pub fn value_expr(&self) -> &Expr {
        &self.value_expr
    }
}

/// Method Invocation Expression
/// `receiver.<T>name(args)`, `Type.name(args)` or `name(args)`.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodInvocationExpr {
    method_name: IdentifierNode,
    expr_reference: Option<Box<Expr>>,
    static_reference_type: Option<TypeNode>,
    arguments: Vec<Expr>,
    generics: Vec<Reference>,
    return_type: TypeNode,
}

impl MethodInvocationExpr {
    pub fn builder() -> MethodInvocationExprBuilder {
        MethodInvocationExprBuilder::default()
    }

    pub fn to_builder(&self) -> MethodInvocationExprBuilder {
        MethodInvocationExprBuilder {
            method_name: Some(self.method_name.name().to_string()),
            expr_reference: self.expr_reference.as_deref().cloned(),
            static_reference_type: self.static_reference_type.clone(),
            arguments: self.arguments.iter().cloned().map(Some).collect(),
            generics: self.generics.clone(),
            return_type: Some(self.return_type.clone()),
        }
    }

    pub fn method_name(&self) -> &str {
        self.method_name.name()
    }

    pub fn expr_reference(&self) -> Option<&Expr> {
        self.expr_reference.as_deref()
    }

    pub fn static_reference_type(&self) -> Option<&TypeNode> {
        self.static_reference_type.as_ref()
    }

    pub fn arguments(&self) -> &[Expr] {
        &self.arguments
    }

    pub fn generics(&self) -> &[Reference] {
        &self.generics
    }

    pub fn return_type(&self) -> &TypeNode {
        &self.return_type
    }
}

#[derive(Debug, Clone, Default)]
pub struct MethodInvocationExprBuilder {
    method_name: Option<String>,
    expr_reference: Option<Expr>,
    static_reference_type: Option<TypeNode>,
    arguments: Vec<Option<Expr>>,
    generics: Vec<Reference>,
    return_type: Option<TypeNode>,
}

impl MethodInvocationExprBuilder {
    pub fn method_name(mut self, name: &str) -> Self {
        self.method_name = Some(name.to_string());
        self
    }

    pub fn expr_reference(mut self, receiver: impl Into<Expr>) -> Self {
        self.expr_reference = Some(receiver.into());
        self
    }

    pub fn static_reference_type(mut self, type_: TypeNode) -> Self {
        self.static_reference_type = Some(type_);
        self
    }

    pub fn arguments<I, E>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Option<Expr>>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    pub fn generics(mut self, generics: Vec<Reference>) -> Self {
        self.generics = generics;
        self
    }

    pub fn return_type(mut self, type_: TypeNode) -> Self {
        self.return_type = Some(type_);
        self
    }

    pub fn build(self) -> Result<MethodInvocationExpr, Error> {
        const NODE: &str = "method invocation";

        let method_name = self
            .method_name
            .ok_or_else(|| Error::invalid_structure(NODE, "method name", "must be set"))?;
        let method_name = IdentifierNode::new(&method_name)?;

        if self.expr_reference.is_some() && self.static_reference_type.is_some() {
            return Err(Error::invalid_structure(
                NODE,
                "receiver",
                "only one of an expression or a static type can be the receiver",
            ));
        }
        if let Some(receiver) = &self.expr_reference {
            check_receiver(NODE, receiver)?;
        }
        if let Some(type_) = &self.static_reference_type {
            check_static_receiver(NODE, type_)?;
        }
        let has_receiver = self.expr_reference.is_some() || self.static_reference_type.is_some();
        if !self.generics.is_empty() && !has_receiver {
            return Err(Error::invalid_structure(
                NODE,
                "generics",
                format!("explicit generics on `{}` need a receiver", method_name.name()),
            ));
        }

        let arguments = check_no_null_elements(self.arguments, "arguments", NODE)?;
        if let Some(argument) = arguments.iter().find(|a| a.type_().is_void()) {
            return Err(Error::invalid_structure(
                NODE,
                "arguments",
                format!("a void {:?} cannot be passed as an argument", argument.get_expr_type()),
            ));
        }

        Ok(MethodInvocationExpr {
            method_name,
            expr_reference: self.expr_reference.map(Box::new),
            static_reference_type: self.static_reference_type,
            arguments,
            generics: self.generics,
            return_type: self.return_type.unwrap_or_else(TypeNode::void),
        })
    }
}

/// New Object Expression
/// `new Type(args)`, or `new Type<>(args)` when the diamond flag is set.
#[derive(Debug, Clone, PartialEq)]
pub struct NewObjectExpr {
    type_: TypeNode,
    arguments: Vec<Expr>,
    is_generic: bool,
}

impl NewObjectExpr {
    pub fn with_type(type_: TypeNode) -> Result<Self, Error> {
        NewObjectExpr::builder().type_(type_).build()
    }

    pub fn builder() -> NewObjectExprBuilder {
        NewObjectExprBuilder::default()
    }

    pub fn type_(&self) -> &TypeNode {
        &self.type_
    }

    pub fn arguments(&self) -> &[Expr] {
        &self.arguments
    }

    pub fn is_generic(&self) -> bool {
        self.is_generic
    }

    /// Whether this constructs a bare instance of the top reference type.
    pub fn is_top_type_instance(&self) -> bool {
        self.type_.is_object()
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewObjectExprBuilder {
    type_: Option<TypeNode>,
    arguments: Vec<Option<Expr>>,
    is_generic: bool,
}

impl NewObjectExprBuilder {
    pub fn type_(mut self, type_: TypeNode) -> Self {
        self.type_ = Some(type_);
        self
    }

    pub fn arguments<I, E>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Option<Expr>>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_generic(mut self, is_generic: bool) -> Self {
        self.is_generic = is_generic;
        self
    }

    pub fn build(self) -> Result<NewObjectExpr, Error> {
        const NODE: &str = "new object expression";

        let type_ = self
            .type_
            .ok_or_else(|| Error::invalid_structure(NODE, "type", "must be set"))?;
        if !type_.is_reference() || type_.is_array() || type_.is_null() {
            return Err(Error::invalid_structure(
                NODE,
                "type",
                format!("cannot instantiate `{}`", type_),
            ));
        }

        Ok(NewObjectExpr {
            type_,
            arguments: check_no_null_elements(self.arguments, "arguments", NODE)?,
            is_generic: self.is_generic,
        })
    }
}

/// Cast Expression
/// `((Type) expr)`
#[derive(Debug, Clone, PartialEq)]
pub struct CastExpr {
    type_: TypeNode,
    expr: Box<Expr>,
}

impl CastExpr {
    pub fn new(type_: TypeNode, expr: impl Into<Expr>) -> Result<Self, Error> {
        const NODE: &str = "cast expression";

        let expr = expr.into();
        let from = expr.type_();

        if type_.is_void() || from.is_void() {
            return Err(Error::invalid_structure(NODE, "type", "void values cannot be cast"));
        }
        let boolean_to_numeric = from.is_primitive()
            && type_.is_primitive()
            && (from.is_boolean() != type_.is_boolean());
        if boolean_to_numeric {
            return Err(Error::new(
                ErrorImpl::TypeIncompatible {
                    operator: String::from("cast"),
                    left: type_.to_string(),
                    right: from.to_string(),
                },
                NODE,
            ));
        }

        Ok(CastExpr {
            type_,
            expr: Box::new(expr),
        })
    }

    pub fn type_(&self) -> &TypeNode {
        &self.type_
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

/// InstanceOf Expression
/// `expr instanceof Type`
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceOfExpr {
    expr: Box<Expr>,
    check_type: TypeNode,
}

impl InstanceOfExpr {
    pub fn new(expr: impl Into<Expr>, check_type: TypeNode) -> Result<Self, Error> {
        const NODE: &str = "instanceof expression";

        let expr = expr.into();
        if !expr.type_().is_reference() {
            return Err(Error::invalid_structure(
                NODE,
                "expression",
                format!("`{}` values are not objects", expr.type_()),
            ));
        }
        if !check_type.is_reference() || check_type.is_null() {
            return Err(Error::invalid_structure(
                NODE,
                "check type",
                format!("`{}` is not a reference type", check_type),
            ));
        }

        Ok(InstanceOfExpr {
            expr: Box::new(expr),
            check_type,
        })
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn check_type(&self) -> &TypeNode {
        &self.check_type
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationalOperator {
    EqualTo,
    NotEqualTo,
}

impl RelationalOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            RelationalOperator::EqualTo => "==",
            RelationalOperator::NotEqualTo => "!=",
        }
    }
}

/// Relational Operation Expression
/// `lhs == rhs` or `lhs != rhs`, only for operand types the target language can compare.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationalOperationExpr {
    operator: RelationalOperator,
    lhs: Box<Expr>,
    rhs: Box<Expr>,
}

impl RelationalOperationExpr {
    pub fn new(operator: RelationalOperator, lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Result<Self, Error> {
        let lhs = lhs.into();
        let rhs = rhs.into();
        check_comparable(operator, &lhs, &rhs)?;

        Ok(RelationalOperationExpr {
            operator,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    pub fn equal_to(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Result<Self, Error> {
        RelationalOperationExpr::new(RelationalOperator::EqualTo, lhs, rhs)
    }

    pub fn not_equal_to(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Result<Self, Error> {
        RelationalOperationExpr::new(RelationalOperator::NotEqualTo, lhs, rhs)
    }

    pub fn operator(&self) -> RelationalOperator {
        self.operator
    }

    pub fn lhs(&self) -> &Expr {
        &self.lhs
    }

    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }
}

// DECLARATION-LIKE

/// Anonymous Class Expression
/// `new Type() { fields; methods }`
#[derive(Debug, Clone, PartialEq)]
pub struct AnonymousClassExpr {
    type_: TypeNode,
    statements: Vec<Statement>,
    methods: Vec<MethodDefinition>,
}

impl AnonymousClassExpr {
    pub fn builder() -> AnonymousClassExprBuilder {
        AnonymousClassExprBuilder::default()
    }

    pub fn type_(&self) -> &TypeNode {
        &self.type_
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn methods(&self) -> &[MethodDefinition] {
        &self.methods
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnonymousClassExprBuilder {
    type_: Option<TypeNode>,
    statements: Vec<Option<Statement>>,
    methods: Vec<Option<MethodDefinition>>,
}

impl AnonymousClassExprBuilder {
    pub fn type_(mut self, type_: TypeNode) -> Self {
        self.type_ = Some(type_);
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

    pub fn build(self) -> Result<AnonymousClassExpr, Error> {
        const NODE: &str = "anonymous class";

        let type_ = self
            .type_
            .ok_or_else(|| Error::invalid_structure(NODE, "type", "must be set"))?;
        if !type_.is_reference() || type_.is_array() || type_.is_null() {
            return Err(Error::invalid_structure(
                NODE,
                "type",
                format!("cannot subclass `{}`", type_),
            ));
        }

        let statements = check_no_null_elements(self.statements, "statements", NODE)?;
        let methods = check_no_null_elements(self.methods, "methods", NODE)?;
        if let Some(constructor) = methods.iter().find(|m| m.is_constructor()) {
            return Err(Error::invalid_structure(
                NODE,
                "methods",
                format!("anonymous classes cannot declare constructor `{}`", constructor.name()),
            ));
        }
        check_class_body(NODE, &statements, &methods, false)?;

        Ok(AnonymousClassExpr {
            type_,
            statements,
            methods,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceConstructorKind {
    This,
    Super,
}

/// Reference Constructor Expression
/// `this(args)` or `super(args)` inside a constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceConstructorExpr {
    kind: ReferenceConstructorKind,
    type_: TypeNode,
    arguments: Vec<Expr>,
}

impl ReferenceConstructorExpr {
    pub fn new<I, E>(kind: ReferenceConstructorKind, type_: TypeNode, arguments: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = E>,
        E: Into<Option<Expr>>,
    {
        const NODE: &str = "reference constructor";

        check_static_receiver(NODE, &type_)?;
        let arguments = arguments.into_iter().map(Into::into).collect();

        Ok(ReferenceConstructorExpr {
            kind,
            type_,
            arguments: check_no_null_elements(arguments, "arguments", NODE)?,
        })
    }

    pub fn this_constructor<I, E>(type_: TypeNode, arguments: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = E>,
        E: Into<Option<Expr>>,
    {
        ReferenceConstructorExpr::new(ReferenceConstructorKind::This, type_, arguments)
    }

    pub fn super_constructor<I, E>(type_: TypeNode, arguments: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = E>,
        E: Into<Option<Expr>>,
    {
        ReferenceConstructorExpr::new(ReferenceConstructorKind::Super, type_, arguments)
    }

    pub fn kind(&self) -> ReferenceConstructorKind {
        self.kind
    }

    pub fn type_(&self) -> &TypeNode {
        &self.type_
    }

    pub fn arguments(&self) -> &[Expr] {
        &self.arguments
    }
}

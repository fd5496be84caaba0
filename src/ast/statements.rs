use crate::{
    errors::errors::Error,
    type_checker::validator::{check_condition, check_no_null_elements},
};

use super::{
    ast::Comment,
    expressions::{AssignmentExpr, Expr, ExprType, VariableExpr},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expr(ExprStatement),
    Block(BlockStatement),
    If(IfStatement),
    For(ForStatement),
    While(WhileStatement),
    TryCatch(TryCatchStatement),
    Comment(Comment),
    /// Formatting only: a blank line between siblings.
    EmptyLine,
}

impl Statement {
    pub fn expr(expr: impl Into<Expr>) -> Result<Self, Error> {
        Ok(Statement::Expr(ExprStatement::with_expr(expr)?))
    }

    pub fn line_comment(text: &str) -> Self {
        Statement::Comment(Comment::Line(text.to_string()))
    }

    pub fn block_comment(text: &str) -> Self {
        Statement::Comment(Comment::Block(text.to_string()))
    }
}

impl From<ExprStatement> for Statement {
    fn from(statement: ExprStatement) -> Self {
        Statement::Expr(statement)
    }
}

impl From<BlockStatement> for Statement {
    fn from(statement: BlockStatement) -> Self {
        Statement::Block(statement)
    }
}

impl From<IfStatement> for Statement {
    fn from(statement: IfStatement) -> Self {
        Statement::If(statement)
    }
}

impl From<ForStatement> for Statement {
    fn from(statement: ForStatement) -> Self {
        Statement::For(statement)
    }
}

impl From<WhileStatement> for Statement {
    fn from(statement: WhileStatement) -> Self {
        Statement::While(statement)
    }
}

impl From<TryCatchStatement> for Statement {
    fn from(statement: TryCatchStatement) -> Self {
        Statement::TryCatch(statement)
    }
}

impl From<Comment> for Statement {
    fn from(comment: Comment) -> Self {
        Statement::Comment(comment)
    }
}

/// Expression Statement
/// An expression evaluated for its effect, terminated by `;`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprStatement {
    expr: Expr,
}

impl ExprStatement {
    pub fn with_expr(expr: impl Into<Expr>) -> Result<Self, Error> {
        let expr = expr.into();
        let allowed = match expr.get_expr_type() {
            ExprType::MethodInvocation
            | ExprType::Assignment
            | ExprType::NewObject
            | ExprType::ReferenceConstructor => true,
            ExprType::Variable => expr.is_declaration(),
            _ => false,
        };
        if !allowed {
            return Err(Error::invalid_structure(
                "expression statement",
                "expression",
                format!("{:?} expressions cannot stand alone as statements", expr.get_expr_type()),
            ));
        }
        Ok(ExprStatement { expr })
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

/// Block Statement
/// `{ ... }`, or `static { ... }` for class initializers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStatement {
    body: Vec<Statement>,
    is_static: bool,
}

impl BlockStatement {
    pub fn new<I, S>(body: I, is_static: bool) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<Option<Statement>>,
    {
        let body = body.into_iter().map(Into::into).collect();
        Ok(BlockStatement {
            body: check_no_null_elements(body, "body", "block")?,
            is_static,
        })
    }

    pub fn body(&self) -> &[Statement] {
        &self.body
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }
}

/// If Statement
/// `if (c) { } else if (c) { } else { }`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    condition: Expr,
    body: Vec<Statement>,
    else_ifs: Vec<(Expr, Vec<Statement>)>,
    else_body: Vec<Statement>,
}

impl IfStatement {
    pub fn builder() -> IfStatementBuilder {
        IfStatementBuilder::default()
    }

    pub fn to_builder(&self) -> IfStatementBuilder {
        IfStatementBuilder {
            condition: Some(self.condition.clone()),
            body: self.body.iter().cloned().map(Some).collect(),
            else_ifs: self
                .else_ifs
                .iter()
                .map(|(condition, body)| (condition.clone(), body.iter().cloned().map(Some).collect()))
                .collect(),
            else_body: self.else_body.iter().cloned().map(Some).collect(),
        }
    }

    pub fn condition(&self) -> &Expr {
        &self.condition
    }

    pub fn body(&self) -> &[Statement] {
        &self.body
    }

    pub fn else_ifs(&self) -> &[(Expr, Vec<Statement>)] {
        &self.else_ifs
    }

    pub fn else_body(&self) -> &[Statement] {
        &self.else_body
    }
}

#[derive(Debug, Clone, Default)]
pub struct IfStatementBuilder {
    condition: Option<Expr>,
    body: Vec<Option<Statement>>,
    else_ifs: Vec<(Expr, Vec<Option<Statement>>)>,
    else_body: Vec<Option<Statement>>,
}

impl IfStatementBuilder {
    pub fn condition(mut self, condition: impl Into<Expr>) -> Self {
        self.condition = Some(condition.into());
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

    pub fn add_else_if<I, S>(mut self, condition: impl Into<Expr>, body: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Option<Statement>>,
    {
        self.else_ifs
            .push((condition.into(), body.into_iter().map(Into::into).collect()));
        self
    }

    pub fn else_body<I, S>(mut self, body: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Option<Statement>>,
    {
        self.else_body = body.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<IfStatement, Error> {
        const NODE: &str = "if statement";

        let condition = self
            .condition
            .ok_or_else(|| Error::invalid_structure(NODE, "condition", "must be set"))?;
        check_condition(NODE, &condition)?;

        let mut else_ifs = Vec::with_capacity(self.else_ifs.len());
        for (condition, body) in self.else_ifs {
            check_condition(NODE, &condition)?;
            else_ifs.push((condition, check_no_null_elements(body, "else-if body", NODE)?));
        }

        Ok(IfStatement {
            condition,
            body: check_no_null_elements(self.body, "body", NODE)?,
            else_ifs,
            else_body: check_no_null_elements(self.else_body, "else body", NODE)?,
        })
    }
}

/// For Statement
/// The enhanced form, `for (T item : collection) { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    local_variable_expr: VariableExpr,
    collection_expr: Expr,
    body: Vec<Statement>,
}

impl ForStatement {
    pub fn new<I, S>(local_variable_expr: VariableExpr, collection_expr: impl Into<Expr>, body: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<Option<Statement>>,
    {
        const NODE: &str = "for statement";

        if !local_variable_expr.is_decl() {
            return Err(Error::invalid_structure(
                NODE,
                "local variable",
                format!("`{}` must be declared by the loop", local_variable_expr.name()),
            ));
        }

        let collection_expr = collection_expr.into();
        let collection_type = collection_expr.type_();
        if !collection_type.is_reference()
            || collection_type.is_null()
            || collection_type.is_boxed()
            || collection_type.is_string()
        {
            return Err(Error::invalid_structure(
                NODE,
                "collection",
                format!("cannot iterate over `{}`", collection_type),
            ));
        }

        let body = body.into_iter().map(Into::into).collect();
        Ok(ForStatement {
            local_variable_expr,
            collection_expr,
            body: check_no_null_elements(body, "body", NODE)?,
        })
    }

    pub fn local_variable_expr(&self) -> &VariableExpr {
        &self.local_variable_expr
    }

    pub fn collection_expr(&self) -> &Expr {
        &self.collection_expr
    }

    pub fn body(&self) -> &[Statement] {
        &self.body
    }
}

/// While Statement
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    condition: Expr,
    body: Vec<Statement>,
}

impl WhileStatement {
    pub fn new<I, S>(condition: impl Into<Expr>, body: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<Option<Statement>>,
    {
        let condition = condition.into();
        check_condition("while statement", &condition)?;

        let body = body.into_iter().map(Into::into).collect();
        Ok(WhileStatement {
            condition,
            body: check_no_null_elements(body, "body", "while statement")?,
        })
    }

    pub fn condition(&self) -> &Expr {
        &self.condition
    }

    pub fn body(&self) -> &[Statement] {
        &self.body
    }
}

/// Try-Catch Statement
///
/// `Executable` blocks are real code and always carry a declared exception variable.
/// `Illustrative` blocks only appear in documentation samples and may omit it.
#[derive(Debug, Clone, PartialEq)]
pub enum TryCatchStatement {
    Executable(ExecutableTryCatch),
    Illustrative(IllustrativeTryCatch),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutableTryCatch {
    try_resource_expr: Option<AssignmentExpr>,
    try_body: Vec<Statement>,
    catch_variable_expr: VariableExpr,
    catch_body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IllustrativeTryCatch {
    try_resource_expr: Option<AssignmentExpr>,
    try_body: Vec<Statement>,
    catch_variable_expr: Option<VariableExpr>,
    catch_body: Vec<Statement>,
}

impl TryCatchStatement {
    pub fn builder() -> TryCatchStatementBuilder {
        TryCatchStatementBuilder::default()
    }

    pub fn to_builder(&self) -> TryCatchStatementBuilder {
        TryCatchStatementBuilder {
            try_resource_expr: self.try_resource_expr().cloned(),
            try_body: self.try_body().iter().cloned().map(Some).collect(),
            catch_variable_expr: self.catch_variable_expr().cloned(),
            catch_body: self.catch_body().iter().cloned().map(Some).collect(),
            is_sample_code: self.is_sample_code(),
        }
    }

    pub fn is_sample_code(&self) -> bool {
        matches!(self, TryCatchStatement::Illustrative(_))
    }

    pub fn try_resource_expr(&self) -> Option<&AssignmentExpr> {
        match self {
            TryCatchStatement::Executable(t) => t.try_resource_expr.as_ref(),
            TryCatchStatement::Illustrative(t) => t.try_resource_expr.as_ref(),
        }
    }

    pub fn try_body(&self) -> &[Statement] {
        match self {
            TryCatchStatement::Executable(t) => &t.try_body,
            TryCatchStatement::Illustrative(t) => &t.try_body,
        }
    }

    pub fn catch_variable_expr(&self) -> Option<&VariableExpr> {
        match self {
            TryCatchStatement::Executable(t) => Some(&t.catch_variable_expr),
            TryCatchStatement::Illustrative(t) => t.catch_variable_expr.as_ref(),
        }
    }

    pub fn catch_body(&self) -> &[Statement] {
        match self {
            TryCatchStatement::Executable(t) => &t.catch_body,
            TryCatchStatement::Illustrative(t) => &t.catch_body,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TryCatchStatementBuilder {
    try_resource_expr: Option<AssignmentExpr>,
    try_body: Vec<Option<Statement>>,
    catch_variable_expr: Option<VariableExpr>,
    catch_body: Vec<Option<Statement>>,
    is_sample_code: bool,
}

impl TryCatchStatementBuilder {
    pub fn try_resource_expr(mut self, resource: AssignmentExpr) -> Self {
        self.try_resource_expr = Some(resource);
        self
    }

    pub fn try_body<I, S>(mut self, body: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Option<Statement>>,
    {
        self.try_body = body.into_iter().map(Into::into).collect();
        self
    }

    pub fn catch_variable_expr(mut self, variable: VariableExpr) -> Self {
        self.catch_variable_expr = Some(variable);
        self
    }

    pub fn catch_body<I, S>(mut self, body: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Option<Statement>>,
    {
        self.catch_body = body.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_sample_code(mut self, is_sample_code: bool) -> Self {
        self.is_sample_code = is_sample_code;
        self
    }

    pub fn build(self) -> Result<TryCatchStatement, Error> {
        const NODE: &str = "try-catch";

        let try_body = check_no_null_elements(self.try_body, "try body", NODE)?;
        let catch_body = check_no_null_elements(self.catch_body, "catch body", NODE)?;

        if let Some(resource) = &self.try_resource_expr {
            if !resource.variable_expr().is_decl() {
                return Err(Error::invalid_structure(
                    NODE,
                    "try resource",
                    format!("`{}` must be declared by the resource binding", resource.variable_expr().name()),
                ));
            }
        }

        if self.is_sample_code {
            if self.catch_variable_expr.is_none() && !catch_body.is_empty() {
                return Err(Error::invalid_structure(
                    NODE,
                    "catch body",
                    "a catch body needs a catch variable",
                ));
            }
            return Ok(TryCatchStatement::Illustrative(IllustrativeTryCatch {
                try_resource_expr: self.try_resource_expr,
                try_body,
                catch_variable_expr: self.catch_variable_expr,
                catch_body,
            }));
        }

        let catch_variable_expr = self
            .catch_variable_expr
            .ok_or_else(|| Error::invalid_structure(NODE, "catch variable", "must be set"))?;
        if !catch_variable_expr.is_decl() {
            return Err(Error::invalid_structure(
                NODE,
                "catch variable",
                format!("`{}` must be a declaration", catch_variable_expr.name()),
            ));
        }
        if !catch_variable_expr.type_().is_exception_type() {
            return Err(Error::invalid_structure(
                NODE,
                "catch variable",
                format!("`{}` is not an exception type", catch_variable_expr.type_()),
            ));
        }

        Ok(TryCatchStatement::Executable(ExecutableTryCatch {
            try_resource_expr: self.try_resource_expr,
            try_body,
            catch_variable_expr,
            catch_body,
        }))
    }
}

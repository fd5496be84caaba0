use crate::ast::{
    expressions::{
        AnonymousClassExpr, Expr, MethodInvocationExpr, NewObjectExpr, ReferenceConstructorKind, VariableExpr,
    },
    values::Value,
};

use super::writer::{gen_members, JavaWriter};

/// Java string literal for `text`.
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Writes `expression` inline, with no indentation or terminator.
pub fn gen_expression(writer: &mut JavaWriter, expression: &Expr) {
    match expression {
        Expr::Value(value) => gen_value(writer, value.value()),
        Expr::Variable(variable) => gen_variable(writer, variable),
        Expr::Ternary(ternary) => {
            gen_operand(writer, ternary.condition());
            writer.write(" ? ");
            gen_operand(writer, ternary.then_expr());
            writer.write(" : ");
            gen_operand(writer, ternary.else_expr());
        }
        Expr::Assignment(assignment) => {
            gen_variable(writer, assignment.variable_expr());
            writer.write(" = ");
            gen_expression(writer, assignment.value_expr());
        }
        Expr::MethodInvocation(invocation) => gen_method_invocation(writer, invocation),
        Expr::NewObject(new_object) => gen_new_object(writer, new_object),
        Expr::Cast(cast) => {
            writer.write("((");
            writer.write_type(cast.type_());
            writer.write(") ");
            gen_operand(writer, cast.expr());
            writer.write(")");
        }
        Expr::InstanceOf(instance_of) => {
            gen_operand(writer, instance_of.expr());
            writer.write(" instanceof ");
            writer.write_raw_type(instance_of.check_type());
        }
        Expr::RelationalOperation(operation) => {
            gen_operand(writer, operation.lhs());
            writer.write(" ");
            writer.write(operation.operator().symbol());
            writer.write(" ");
            gen_operand(writer, operation.rhs());
        }
        Expr::AnonymousClass(anonymous) => gen_anonymous_class(writer, anonymous),
        Expr::ReferenceConstructor(constructor) => {
            writer.write(match constructor.kind() {
                ReferenceConstructorKind::This => "this",
                ReferenceConstructorKind::Super => "super",
            });
            gen_arguments(writer, constructor.arguments());
        }
    }
}

/// Operands that bind looser than their context get parentheses.
fn gen_operand(writer: &mut JavaWriter, expression: &Expr) {
    let needs_parens = matches!(
        expression,
        Expr::Ternary(_) | Expr::Assignment(_) | Expr::InstanceOf(_) | Expr::RelationalOperation(_)
    );
    if needs_parens {
        writer.write("(");
        gen_expression(writer, expression);
        writer.write(")");
    } else {
        gen_expression(writer, expression);
    }
}

fn gen_value(writer: &mut JavaWriter, value: &Value) {
    match value {
        Value::Primitive(primitive) => writer.write(primitive.literal()),
        Value::String(text) => writer.write(&quote(text)),
        Value::Null => writer.write("null"),
        Value::This(_) => writer.write("this"),
        Value::Super(_) => writer.write("super"),
        Value::EnumConstant { type_, name } => {
            writer.write_raw_type(type_);
            writer.write(".");
            writer.write(name.name());
        }
    }
}

pub fn gen_variable(writer: &mut JavaWriter, variable: &VariableExpr) {
    if variable.is_decl() {
        for annotation in variable.annotations() {
            writer.write_annotation(annotation);
            writer.write(" ");
        }
        writer.write_modifiers(variable.scope(), false, variable.is_static(), variable.is_final());
        writer.write_type(variable.type_());
        writer.write(" ");
    } else if let Some(receiver) = variable.expr_reference() {
        gen_operand(writer, receiver);
        writer.write(".");
    } else if let Some(type_) = variable.static_reference_type() {
        writer.write_raw_type(type_);
        writer.write(".");
    }
    writer.write(variable.name());
}

fn gen_method_invocation(writer: &mut JavaWriter, invocation: &MethodInvocationExpr) {
    let has_receiver = if let Some(receiver) = invocation.expr_reference() {
        gen_operand(writer, receiver);
        writer.write(".");
        true
    } else if let Some(type_) = invocation.static_reference_type() {
        writer.write_raw_type(type_);
        writer.write(".");
        true
    } else {
        false
    };

    if has_receiver && !invocation.generics().is_empty() {
        writer.write("<");
        for (i, generic) in invocation.generics().iter().enumerate() {
            if i > 0 {
                writer.write(", ");
            }
            let name = writer.imports.register(generic);
            writer.write(&name);
        }
        writer.write(">");
    }

    writer.write(invocation.method_name());
    gen_arguments(writer, invocation.arguments());
}

fn gen_new_object(writer: &mut JavaWriter, new_object: &NewObjectExpr) {
    writer.write("new ");
    let has_generics = new_object
        .type_()
        .reference()
        .is_some_and(|reference| !reference.generics().is_empty());
    if new_object.is_generic() && !has_generics {
        writer.write_raw_type(new_object.type_());
        writer.write("<>");
    } else {
        writer.write_type(new_object.type_());
    }
    gen_arguments(writer, new_object.arguments());
}

fn gen_anonymous_class(writer: &mut JavaWriter, anonymous: &AnonymousClassExpr) {
    writer.write("new ");
    writer.write_type(anonymous.type_());
    writer.write("() {\n");

    writer.indent_level += 1;
    gen_members(writer, anonymous.statements(), anonymous.methods(), &[]);
    writer.indent_level -= 1;

    writer.write_indent();
    writer.write("}");
}

pub fn gen_arguments(writer: &mut JavaWriter, arguments: &[Expr]) {
    writer.write("(");
    for (i, argument) in arguments.iter().enumerate() {
        if i > 0 {
            writer.write(", ");
        }
        gen_expression(writer, argument);
    }
    writer.write(")");
}

use crate::ast::{
    ast::Comment,
    statements::{IfStatement, Statement, TryCatchStatement},
};

use super::{
    expr::{gen_expression, gen_variable},
    writer::JavaWriter,
};

/// Writes one statement on its own indented line(s).
pub fn gen_statement(writer: &mut JavaWriter, statement: &Statement) {
    match statement {
        Statement::Expr(statement) => {
            writer.write_indent();
            gen_expression(writer, statement.expr());
            writer.write(";\n");
        }
        Statement::Block(block) => {
            writer.write_indent();
            if block.is_static() {
                writer.write("static ");
            }
            writer.write("{\n");
            gen_nested_body(writer, block.body());
            writer.write_line("}");
        }
        Statement::If(if_statement) => gen_if(writer, if_statement),
        Statement::For(for_statement) => {
            writer.write_indent();
            writer.write("for (");
            gen_variable(writer, for_statement.local_variable_expr());
            writer.write(" : ");
            gen_expression(writer, for_statement.collection_expr());
            writer.write(") {\n");
            gen_nested_body(writer, for_statement.body());
            writer.write_line("}");
        }
        Statement::While(while_statement) => {
            writer.write_indent();
            writer.write("while (");
            gen_expression(writer, while_statement.condition());
            writer.write(") {\n");
            gen_nested_body(writer, while_statement.body());
            writer.write_line("}");
        }
        Statement::TryCatch(try_catch) => gen_try_catch(writer, try_catch),
        Statement::Comment(comment) => gen_comment(writer, comment),
        Statement::EmptyLine => writer.write("\n"),
    }
}

/// Statements at the current indentation.
pub fn gen_body(writer: &mut JavaWriter, body: &[Statement]) {
    for statement in body {
        gen_statement(writer, statement);
    }
}

fn gen_nested_body(writer: &mut JavaWriter, body: &[Statement]) {
    writer.indent_level += 1;
    gen_body(writer, body);
    writer.indent_level -= 1;
}

fn gen_if(writer: &mut JavaWriter, if_statement: &IfStatement) {
    writer.write_indent();
    writer.write("if (");
    gen_expression(writer, if_statement.condition());
    writer.write(") {\n");
    gen_nested_body(writer, if_statement.body());

    for (condition, body) in if_statement.else_ifs() {
        writer.write_indent();
        writer.write("} else if (");
        gen_expression(writer, condition);
        writer.write(") {\n");
        gen_nested_body(writer, body);
    }

    if !if_statement.else_body().is_empty() {
        writer.write_line("} else {");
        gen_nested_body(writer, if_statement.else_body());
    }
    writer.write_line("}");
}

fn gen_try_catch(writer: &mut JavaWriter, try_catch: &TryCatchStatement) {
    writer.write_indent();
    writer.write("try ");
    if let Some(resource) = try_catch.try_resource_expr() {
        writer.write("(");
        gen_variable(writer, resource.variable_expr());
        writer.write(" = ");
        gen_expression(writer, resource.value_expr());
        writer.write(") ");
    }
    writer.write("{\n");
    gen_nested_body(writer, try_catch.try_body());

    match try_catch.catch_variable_expr() {
        Some(catch_variable) => {
            writer.write_indent();
            writer.write("} catch (");
            gen_variable(writer, catch_variable);
            writer.write(") {\n");
            gen_nested_body(writer, try_catch.catch_body());
            writer.write_line("}");
        }
        None => writer.write_line("}"),
    }
}

pub fn gen_comment(writer: &mut JavaWriter, comment: &Comment) {
    match comment {
        Comment::Line(text) if text.is_empty() => writer.write_line("//"),
        Comment::Line(text) => {
            for line in text.lines() {
                if line.is_empty() {
                    writer.write_line("//");
                } else {
                    writer.write_line(&format!("// {}", line));
                }
            }
        }
        Comment::Block(text) => gen_block_comment(writer, "/*", text.lines()),
        Comment::JavaDoc(lines) => gen_block_comment(writer, "/**", lines.iter().map(String::as_str)),
    }
}

fn gen_block_comment<'a>(writer: &mut JavaWriter, opening: &str, lines: impl Iterator<Item = &'a str>) {
    writer.write_line(opening);
    for line in lines {
        if line.is_empty() {
            writer.write_line(" *");
        } else {
            writer.write_line(&format!(" * {}", escape_comment_end(line)));
        }
    }
    writer.write_line(" */");
}

/// `*/` inside comment text would close the comment early.
fn escape_comment_end(line: &str) -> String {
    line.replace("*/", "&#42;/")
}

//! Unit tests for source emission.

use pretty_assertions::assert_eq;

use crate::{
    ast::{
        ast::{AnnotationNode, Comment, ScopeNode},
        declarations::{ClassDefinition, MethodDefinition},
        expressions::{
            AnonymousClassExpr, AssignmentExpr, CastExpr, Expr, InstanceOfExpr, MethodInvocationExpr,
            NewObjectExpr, ReferenceConstructorExpr, RelationalOperationExpr, TernaryExpr, ValueExpr, Variable,
            VariableExpr,
        },
        reference::{ConcreteReference, Reference, VaporReference},
        statements::{BlockStatement, ForStatement, IfStatement, Statement, TryCatchStatement, WhileStatement},
        types::TypeNode,
        values::{PrimitiveValue, Value},
    },
    writer::{
        imports::ImportTable,
        writer::{Emitted, JavaWriter, WriterOptions},
    },
};

const PACKAGE: &str = "com.google.showcase.v1beta1";

fn variable(name: &str, type_: TypeNode) -> VariableExpr {
    VariableExpr::with_variable(Variable::new(name, type_).unwrap())
}

fn declaration(name: &str, type_: TypeNode) -> VariableExpr {
    VariableExpr::declaration(Variable::new(name, type_).unwrap())
}

fn class_type(full_name: &str) -> TypeNode {
    TypeNode::with_reference(ConcreteReference::with_class(full_name).unwrap())
}

fn generated_type(name: &str) -> TypeNode {
    TypeNode::with_reference(VaporReference::builder().package(PACKAGE).name(name).build().unwrap())
}

fn string_value(text: &str) -> Expr {
    ValueExpr::with_value(Value::string(text)).into()
}

fn call(name: &str) -> Statement {
    Statement::expr(MethodInvocationExpr::builder().method_name(name).build().unwrap()).unwrap()
}

fn assign(target: VariableExpr, value: impl Into<Expr>) -> Statement {
    Statement::expr(AssignmentExpr::new(target, value).unwrap()).unwrap()
}

fn write(statements: Vec<Statement>) -> Emitted {
    JavaWriter::new().write_statements(&statements)
}

#[test]
fn test_write_try_catch_with_resource() {
    let client_type = generated_type("EchoClient");
    let create = MethodInvocationExpr::builder()
        .static_reference_type(client_type.clone())
        .method_name("create")
        .return_type(client_type.clone())
        .build()
        .unwrap();
    let echo = MethodInvocationExpr::builder()
        .expr_reference(variable("client", client_type.clone()))
        .method_name("echo")
        .build()
        .unwrap();

    let try_catch = TryCatchStatement::builder()
        .try_resource_expr(AssignmentExpr::new(declaration("client", client_type), create).unwrap())
        .try_body(vec![Statement::expr(echo).unwrap()])
        .catch_variable_expr(declaration("e", class_type("java.io.IOException")))
        .catch_body(vec![Statement::line_comment("Handle the error.")])
        .build()
        .unwrap();

    let emitted = write(vec![try_catch.into()]);

    assert_eq!(
        emitted.source,
        "try (EchoClient client = EchoClient.create()) {\n  client.echo();\n} catch (IOException e) {\n  // Handle the error.\n}\n"
    );
    assert_eq!(
        emitted.imports,
        vec![
            "import com.google.showcase.v1beta1.EchoClient;".to_string(),
            "import java.io.IOException;".to_string(),
        ]
    );
}

#[test]
fn test_write_illustrative_try_without_catch() {
    let try_catch = TryCatchStatement::builder()
        .try_body(vec![call("run")])
        .is_sample_code(true)
        .build()
        .unwrap();

    assert_eq!(write(vec![try_catch.into()]).source, "try {\n  run();\n}\n");
}

#[test]
fn test_write_generics_and_diamond() {
    let string_list = TypeNode::with_reference(
        ConcreteReference::builder()
            .class_name("java.util.List")
            .generics(vec![ConcreteReference::with_class("java.lang.String").unwrap()])
            .build()
            .unwrap(),
    );
    let new_list = NewObjectExpr::builder()
        .type_(class_type("java.util.ArrayList"))
        .is_generic(true)
        .build()
        .unwrap();

    let emitted = write(vec![assign(declaration("names", string_list), new_list)]);

    assert_eq!(emitted.source, "List<String> names = new ArrayList<>();\n");
    assert_eq!(
        emitted.imports,
        vec!["import java.util.ArrayList;".to_string(), "import java.util.List;".to_string()]
    );
}

#[test]
fn test_write_operators() {
    let count = variable("count", TypeNode::int());
    let total = variable("total", TypeNode::long());
    let same = RelationalOperationExpr::equal_to(CastExpr::new(TypeNode::long(), count).unwrap(), total).unwrap();

    let label = TernaryExpr::new(
        variable("flag", TypeNode::boolean()),
        string_value("yes"),
        string_value("no"),
    )
    .unwrap();

    let is_string = InstanceOfExpr::new(variable("value", TypeNode::object()), TypeNode::string()).unwrap();

    let differs = RelationalOperationExpr::not_equal_to(
        variable("request", generated_type("EchoRequest")),
        ValueExpr::with_value(Value::Null),
    )
    .unwrap();

    let emitted = write(vec![
        assign(declaration("same", TypeNode::boolean()), same),
        assign(declaration("label", TypeNode::string()), label),
        assign(declaration("isString", TypeNode::boolean()), is_string),
        assign(declaration("present", TypeNode::boolean()), differs),
    ]);

    assert_eq!(
        emitted.source,
        "boolean same = ((long) count) == total;\n\
         String label = flag ? \"yes\" : \"no\";\n\
         boolean isString = value instanceof String;\n\
         boolean present = request != null;\n"
    );
}

#[test]
fn test_write_control_flow() {
    let if_statement = IfStatement::builder()
        .condition(variable("ready", TypeNode::boolean()))
        .body(vec![call("start")])
        .add_else_if(variable("waiting", TypeNode::boolean()), vec![call("poll")])
        .else_body(vec![call("stop")])
        .build()
        .unwrap();
    let for_statement = ForStatement::new(
        declaration("item", TypeNode::string()),
        variable("items", TypeNode::string().to_array().unwrap()),
        vec![call("process")],
    )
    .unwrap();
    let while_statement = WhileStatement::new(variable("running", TypeNode::boolean()), vec![call("tick")]).unwrap();

    let emitted = write(vec![if_statement.into(), for_statement.into(), while_statement.into()]);

    assert_eq!(
        emitted.source,
        "if (ready) {\n  start();\n} else if (waiting) {\n  poll();\n} else {\n  stop();\n}\n\
         for (String item : items) {\n  process();\n}\n\
         while (running) {\n  tick();\n}\n"
    );
}

#[test]
fn test_write_comments_and_blocks() {
    let block = BlockStatement::new(vec![call("init")], true).unwrap();

    let emitted = write(vec![
        Statement::line_comment("First line.\nSecond line."),
        Statement::EmptyLine,
        Statement::block_comment("Block."),
        Statement::from(Comment::JavaDoc(vec!["Summary.".to_string(), String::new(), "Details.".to_string()])),
        block.into(),
    ]);

    assert_eq!(
        emitted.source,
        "// First line.\n// Second line.\n\n/*\n * Block.\n */\n/**\n * Summary.\n *\n * Details.\n */\nstatic {\n  init();\n}\n"
    );
}

#[test]
fn test_write_empty_line_comment() {
    let emitted = write(vec![Statement::line_comment(""), Statement::line_comment("Top.\n\nBottom.")]);

    assert_eq!(emitted.source, "//\n// Top.\n//\n// Bottom.\n");
}

#[test]
fn test_comment_text_cannot_close_the_comment() {
    let emitted = write(vec![
        Statement::block_comment("see a/*.txt */ end"),
        Statement::from(Comment::JavaDoc(vec!["Matches `*/` literally.".to_string()])),
    ]);

    assert_eq!(
        emitted.source,
        "/*\n * see a/*.txt &#42;/ end\n */\n/**\n * Matches `&#42;/` literally.\n */\n"
    );
}

#[test]
fn test_write_values() {
    let code_type = class_type("io.grpc.Status.Code");
    let ok = ValueExpr::with_value(Value::enum_constant(code_type.clone(), "OK").unwrap());
    let size = ValueExpr::with_value(Value::Primitive(PrimitiveValue::new(TypeNode::long(), "10L").unwrap()));

    let emitted = write(vec![
        assign(declaration("code", code_type), ok),
        assign(declaration("size", TypeNode::long()), size),
        assign(declaration("message", TypeNode::string()), string_value("say \"hi\"\n")),
    ]);

    assert_eq!(
        emitted.source,
        "Status.Code code = Status.Code.OK;\nlong size = 10L;\nString message = \"say \\\"hi\\\"\\n\";\n"
    );
    assert_eq!(emitted.imports, vec!["import io.grpc.Status;".to_string()]);
}

#[test]
fn test_write_receivers_and_constructor_calls() {
    let settings_type = generated_type("EchoSettings");
    let settings = MethodInvocationExpr::builder()
        .static_reference_type(settings_type.clone())
        .method_name("newBuilder")
        .return_type(settings_type.clone())
        .build()
        .unwrap();
    let empty_list = MethodInvocationExpr::builder()
        .static_reference_type(class_type("java.util.Collections"))
        .generics(vec![ConcreteReference::with_class("java.lang.String").unwrap()])
        .method_name("emptyList")
        .return_type(class_type("java.util.List"))
        .build()
        .unwrap();
    let super_call = ReferenceConstructorExpr::super_constructor(settings_type.clone(), vec![Expr::from(settings)])
        .unwrap();
    let constant = VariableExpr::builder()
        .variable(Variable::new("DEFAULT_HOST", TypeNode::string()).unwrap())
        .static_reference_type(settings_type)
        .build()
        .unwrap();

    let emitted = write(vec![
        Statement::expr(super_call).unwrap(),
        assign(declaration("values", class_type("java.util.List")), empty_list),
        assign(declaration("host", TypeNode::string()), constant),
    ]);

    assert_eq!(
        emitted.source,
        "super(EchoSettings.newBuilder());\n\
         List values = Collections.<String>emptyList();\n\
         String host = EchoSettings.DEFAULT_HOST;\n"
    );
}

#[test]
fn test_write_anonymous_class() {
    let runnable = class_type("java.lang.Runnable");
    let run = MethodDefinition::builder()
        .name("run")
        .scope(ScopeNode::Public)
        .is_override(true)
        .body(vec![call("work")])
        .build()
        .unwrap();
    let task = AnonymousClassExpr::builder()
        .type_(runnable.clone())
        .methods(vec![run])
        .build()
        .unwrap();

    let emitted = write(vec![assign(declaration("task", runnable), task)]);

    assert_eq!(
        emitted.source,
        "Runnable task = new Runnable() {\n  @Override\n  public void run() {\n    work();\n  }\n};\n"
    );
    assert!(emitted.imports.is_empty());
}

#[test]
fn test_simple_name_collisions_are_qualified() {
    let emitted = write(vec![
        Statement::expr(declaration("first", class_type("com.google.rpc.Status"))).unwrap(),
        Statement::expr(declaration("second", class_type("io.grpc.Status"))).unwrap(),
        Statement::expr(declaration("third", class_type("com.google.rpc.Status"))).unwrap(),
    ]);

    assert_eq!(
        emitted.source,
        "Status first;\nio.grpc.Status second;\nStatus third;\n"
    );
    assert_eq!(emitted.imports, vec!["import com.google.rpc.Status;".to_string()]);
}

#[test]
fn test_static_imports() {
    let paged_response = TypeNode::with_reference(
        VaporReference::builder()
            .package(PACKAGE)
            .enclosing_class_names(vec!["EchoClient"])
            .name("PagedExpandPagedResponse")
            .is_static_import(true)
            .build()
            .unwrap(),
    );

    let emitted = write(vec![Statement::expr(declaration("response", paged_response)).unwrap()]);

    assert_eq!(emitted.source, "PagedExpandPagedResponse response;\n");
    assert_eq!(
        emitted.imports,
        vec!["import static com.google.showcase.v1beta1.EchoClient.PagedExpandPagedResponse;".to_string()]
    );
}

#[test]
fn test_import_table_references() {
    let list = ConcreteReference::with_class("java.util.List").unwrap();
    let string_list = list.with_generics(vec![ConcreteReference::with_class("java.lang.String").unwrap()]);

    let mut table = ImportTable::new(PACKAGE);
    assert_eq!(table.register(&list), "List");
    assert_eq!(table.register(&string_list), "List");
    assert_eq!(table.register(&list), "List");
    assert_eq!(table.register(&Reference::wildcard()), "?");

    let own = VaporReference::builder().package(PACKAGE).name("EchoRequest").build().unwrap();
    assert_eq!(table.register(&own), "EchoRequest");

    let lang = ConcreteReference::with_class("java.lang.Integer").unwrap();
    assert_eq!(table.register(&lang), "Integer");

    assert_eq!(table.references().len(), 4);
    assert_eq!(table.import_statements(), vec!["import java.util.List;".to_string()]);
}

fn echo_client() -> ClassDefinition {
    let client_type = generated_type("EchoClient");
    let name_field = Variable::new("name", TypeNode::string()).unwrap();

    let field = VariableExpr::builder()
        .variable(name_field.clone())
        .is_decl(true)
        .scope(ScopeNode::Private)
        .is_final(true)
        .build()
        .unwrap();
    let this_name = VariableExpr::builder()
        .variable(name_field.clone())
        .expr_reference(ValueExpr::with_value(Value::this(client_type.clone()).unwrap()))
        .build()
        .unwrap();

    let constructor = MethodDefinition::constructor_builder(client_type)
        .scope(ScopeNode::Public)
        .arguments(vec![VariableExpr::declaration(name_field.clone())])
        .body(vec![assign(this_name, VariableExpr::with_variable(name_field.clone()))])
        .build()
        .unwrap();
    let get_name = MethodDefinition::builder()
        .name("getName")
        .scope(ScopeNode::Public)
        .return_type(TypeNode::string())
        .return_expr(VariableExpr::with_variable(name_field))
        .build()
        .unwrap();
    let close = MethodDefinition::builder()
        .name("close")
        .scope(ScopeNode::Public)
        .is_override(true)
        .throws_exceptions(vec![class_type("java.io.IOException")])
        .build()
        .unwrap();

    ClassDefinition::builder()
        .header_comments(vec![Comment::JavaDoc(vec!["Client for the Echo service.".to_string()])])
        .annotations(vec![AnnotationNode::generated("by gapic-generator-java")])
        .package(PACKAGE)
        .scope(ScopeNode::Public)
        .is_final(true)
        .name("EchoClient")
        .implements_types(vec![class_type("java.lang.AutoCloseable")])
        .statements(vec![Statement::expr(field).unwrap()])
        .methods(vec![constructor, get_name, close])
        .build()
        .unwrap()
}

const ECHO_CLIENT_SOURCE: &str = "/**
 * Client for the Echo service.
 */
@Generated(\"by gapic-generator-java\")
public final class EchoClient implements AutoCloseable {
  private final String name;

  public EchoClient(String name) {
    this.name = name;
  }

  public String getName() {
    return name;
  }

  @Override
  public void close() throws IOException {
  }
}
";

#[test]
fn test_write_class() {
    let emitted = JavaWriter::new().write_class(&echo_client());

    assert_eq!(emitted.source, ECHO_CLIENT_SOURCE);
    assert_eq!(emitted.package, Some(PACKAGE.to_string()));
    assert_eq!(
        emitted.imports,
        vec![
            "import java.io.IOException;".to_string(),
            "import javax.annotation.Generated;".to_string(),
        ]
    );
    assert_eq!(
        emitted.to_file_contents(),
        format!(
            "package {};\n\nimport java.io.IOException;\nimport javax.annotation.Generated;\n\n{}",
            PACKAGE, ECHO_CLIENT_SOURCE
        )
    );
}

#[test]
fn test_write_nested_class() {
    let inner = ClassDefinition::builder()
        .name("Builder")
        .scope(ScopeNode::Public)
        .is_static(true)
        .is_nested(true)
        .build()
        .unwrap();
    let outer = ClassDefinition::builder()
        .name("EchoSettings")
        .package(PACKAGE)
        .scope(ScopeNode::Public)
        .is_abstract(true)
        .extends_type(class_type("java.lang.Object"))
        .nested_classes(vec![inner])
        .build()
        .unwrap();

    let emitted = JavaWriter::new().write_class(&outer);

    assert_eq!(
        emitted.source,
        "public abstract class EchoSettings extends Object {\n  public static class Builder {\n  }\n}\n"
    );
}

#[test]
fn test_nested_class_names_are_reserved() {
    let builder = ClassDefinition::builder()
        .name("Builder")
        .scope(ScopeNode::Public)
        .is_static(true)
        .is_nested(true)
        .build()
        .unwrap();
    let foo = ClassDefinition::builder()
        .name("Foo")
        .package(PACKAGE)
        .scope(ScopeNode::Public)
        .statements(vec![
            Statement::expr(declaration("other", class_type("com.google.other.Builder"))).unwrap(),
        ])
        .nested_classes(vec![builder])
        .build()
        .unwrap();

    let emitted = JavaWriter::new().write_class(&foo);

    assert_eq!(
        emitted.source,
        "public class Foo {\n  com.google.other.Builder other;\n\n  public static class Builder {\n  }\n}\n"
    );
    assert!(emitted.imports.is_empty());
}

#[test]
fn test_writer_is_deterministic() {
    let class = echo_client();
    let mut writer = JavaWriter::new();

    let first = writer.write_class(&class);
    let second = writer.write_class(&class);
    let fresh = JavaWriter::new().write_class(&class);

    assert_eq!(first, second);
    assert_eq!(first, fresh);
}

#[test]
fn test_writer_options() {
    let options = WriterOptions {
        indent_width: 4,
        emit_package: false,
    };
    let if_statement = IfStatement::builder()
        .condition(variable("ready", TypeNode::boolean()))
        .body(vec![call("start")])
        .build()
        .unwrap();

    let mut writer = JavaWriter::with_options(options);
    assert_eq!(writer.write_statements(&[if_statement.into()]).source, "if (ready) {\n    start();\n}\n");

    let emitted = writer.write_class(&echo_client());
    assert_eq!(emitted.package, None);
    assert!(emitted.to_file_contents().starts_with("import java.io.IOException;\n"));
    assert!(emitted.source.contains("    private final String name;\n"));
}

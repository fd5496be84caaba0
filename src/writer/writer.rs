use tracing::debug;

use crate::ast::{
    ast::{AnnotationNode, ScopeNode},
    declarations::{ClassDefinition, MethodDefinition},
    statements::Statement,
    types::TypeNode,
};

use super::{
    expr::{gen_expression, gen_variable, quote},
    imports::ImportTable,
    stmt::{gen_body, gen_comment, gen_statement},
};

/// Formatting knobs for emitted source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    /// Spaces per indentation level.
    pub indent_width: usize,
    /// Whether `write_class` records the package line for `to_file_contents`.
    pub emit_package: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        WriterOptions {
            indent_width: 2,
            emit_package: true,
        }
    }
}

/// Source text plus the imports it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitted {
    pub package: Option<String>,
    pub imports: Vec<String>,
    pub source: String,
}

impl Emitted {
    /// Package line, imports and source, as one compilation unit.
    pub fn to_file_contents(&self) -> String {
        let mut contents = String::new();
        if let Some(package) = &self.package {
            contents.push_str(&format!("package {};\n\n", package));
        }
        if !self.imports.is_empty() {
            for import in &self.imports {
                contents.push_str(import);
                contents.push('\n');
            }
            contents.push('\n');
        }
        contents.push_str(&self.source);
        contents
    }
}

/// Java Writer
///
/// Walks a finished tree depth-first and renders it. Every call to `write_class` or
/// `write_statements` starts from a clean buffer and import table, so writing the same
/// tree twice produces the same text.
pub struct JavaWriter {
    pub options: WriterOptions,
    pub imports: ImportTable,
    pub buffer: String,
    pub indent_level: usize,
}

impl Default for JavaWriter {
    fn default() -> Self {
        JavaWriter::new()
    }
}

impl JavaWriter {
    pub fn new() -> Self {
        JavaWriter::with_options(WriterOptions::default())
    }

    pub fn with_options(options: WriterOptions) -> Self {
        JavaWriter {
            options,
            imports: ImportTable::default(),
            buffer: String::new(),
            indent_level: 0,
        }
    }

    fn reset(&mut self, package: &str) {
        self.imports = ImportTable::new(package);
        self.buffer.clear();
        self.indent_level = 0;
    }

    fn take(&mut self, package: Option<String>) -> Emitted {
        Emitted {
            package,
            imports: self.imports.import_statements(),
            source: std::mem::take(&mut self.buffer),
        }
    }

    /// Renders a top-level class and collects its imports.
    pub fn write_class(&mut self, class: &ClassDefinition) -> Emitted {
        debug!(class = class.name(), package = class.package(), "writing class");

        self.reset(class.package());
        reserve_class_names(&mut self.imports, class.package(), class);
        gen_class(self, class);

        debug!(
            class = class.name(),
            references = self.imports.references().len(),
            "finished class"
        );

        let package = Some(class.package().to_string()).filter(|p| self.options.emit_package && !p.is_empty());
        self.take(package)
    }

    /// Renders a statement sequence, e.g. a sample snippet, at indentation zero.
    pub fn write_statements(&mut self, statements: &[Statement]) -> Emitted {
        self.reset("");
        for statement in statements {
            gen_statement(self, statement);
        }
        self.take(None)
    }

    pub(crate) fn write(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub(crate) fn write_indent(&mut self) {
        let width = self.indent_level * self.options.indent_width;
        self.buffer.extend(std::iter::repeat(' ').take(width));
    }

    /// Writes one indented line.
    pub(crate) fn write_line(&mut self, text: &str) {
        self.write_indent();
        self.write(text);
        self.write("\n");
    }

    pub(crate) fn write_type(&mut self, type_: &TypeNode) {
        self.write_type_name(type_, true);
    }

    /// Writes the erased type: no generic arguments.
    pub(crate) fn write_raw_type(&mut self, type_: &TypeNode) {
        self.write_type_name(type_, false);
    }

    fn write_type_name(&mut self, type_: &TypeNode, with_generics: bool) {
        match type_.reference() {
            Some(reference) => {
                let name = self.imports.register(reference);
                self.write(&name);
                if with_generics && !reference.generics().is_empty() {
                    self.write("<");
                    for (i, generic) in reference.generics().iter().enumerate() {
                        if i > 0 {
                            self.write(", ");
                        }
                        self.write_type(&TypeNode::with_reference(generic.clone()));
                    }
                    self.write(">");
                }
            }
            None => self.write(type_.kind().keyword()),
        }
        if type_.is_array() {
            self.write("[]");
        }
    }

    pub(crate) fn write_annotation(&mut self, annotation: &AnnotationNode) {
        self.write("@");
        self.write_raw_type(annotation.type_());
        if let Some(description) = annotation.description() {
            self.write("(");
            self.write(&quote(description));
            self.write(")");
        }
    }

    /// Modifiers in `scope abstract static final` order, each followed by a space.
    pub(crate) fn write_modifiers(&mut self, scope: ScopeNode, is_abstract: bool, is_static: bool, is_final: bool) {
        if let Some(keyword) = scope.keyword() {
            self.write(keyword);
            self.write(" ");
        }
        if is_abstract {
            self.write("abstract ");
        }
        if is_static {
            self.write("static ");
        }
        if is_final {
            self.write("final ");
        }
    }
}

/// Claims the simple names of `class` and every class nested in it, so outside
/// classes that share one are written fully qualified.
fn reserve_class_names(imports: &mut ImportTable, enclosing: &str, class: &ClassDefinition) {
    imports.reserve(enclosing, class.name());
    let qualified = if enclosing.is_empty() {
        class.name().to_string()
    } else {
        format!("{}.{}", enclosing, class.name())
    };
    for nested in class.nested_classes() {
        reserve_class_names(imports, &qualified, nested);
    }
}

pub(crate) fn gen_method(writer: &mut JavaWriter, method: &MethodDefinition) {
    for comment in method.header_comments() {
        gen_comment(writer, comment);
    }
    for annotation in method.annotations() {
        writer.write_indent();
        writer.write_annotation(annotation);
        writer.write("\n");
    }

    writer.write_indent();
    writer.write_modifiers(method.scope(), method.is_abstract(), method.is_static(), method.is_final());
    if !method.is_constructor() {
        writer.write_type(method.return_type());
        writer.write(" ");
    }
    writer.write(method.name());

    writer.write("(");
    for (i, argument) in method.arguments().iter().enumerate() {
        if i > 0 {
            writer.write(", ");
        }
        gen_variable(writer, argument);
    }
    writer.write(")");

    if !method.throws_exceptions().is_empty() {
        writer.write(" throws ");
        for (i, exception) in method.throws_exceptions().iter().enumerate() {
            if i > 0 {
                writer.write(", ");
            }
            writer.write_type(exception);
        }
    }

    if method.is_abstract() {
        writer.write(";\n");
        return;
    }

    writer.write(" {\n");
    writer.indent_level += 1;
    for statement in method.body() {
        gen_statement(writer, statement);
    }
    if let Some(return_expr) = method.return_expr() {
        writer.write_indent();
        writer.write("return ");
        gen_expression(writer, return_expr);
        writer.write(";\n");
    }
    writer.indent_level -= 1;
    writer.write_line("}");
}

pub(crate) fn gen_class(writer: &mut JavaWriter, class: &ClassDefinition) {
    for comment in class.header_comments() {
        gen_comment(writer, comment);
    }
    for annotation in class.annotations() {
        writer.write_indent();
        writer.write_annotation(annotation);
        writer.write("\n");
    }

    writer.write_indent();
    writer.write_modifiers(class.scope(), class.is_abstract(), class.is_static(), class.is_final());
    writer.write("class ");
    writer.write(class.name());
    if let Some(extends_type) = class.extends_type() {
        writer.write(" extends ");
        writer.write_type(extends_type);
    }
    if !class.implements_types().is_empty() {
        writer.write(" implements ");
        for (i, type_) in class.implements_types().iter().enumerate() {
            if i > 0 {
                writer.write(", ");
            }
            writer.write_type(type_);
        }
    }
    writer.write(" {\n");

    writer.indent_level += 1;
    gen_members(writer, class.statements(), class.methods(), class.nested_classes());
    writer.indent_level -= 1;

    writer.write_line("}");
}

/// Class body: field statements, then methods, then nested classes, one blank line apart.
pub(crate) fn gen_members(
    writer: &mut JavaWriter,
    statements: &[Statement],
    methods: &[MethodDefinition],
    nested_classes: &[ClassDefinition],
) {
    let mut first = true;
    let mut separate = |writer: &mut JavaWriter| {
        if !first {
            writer.write("\n");
        }
        first = false;
    };

    if !statements.is_empty() {
        separate(writer);
        gen_body(writer, statements);
    }
    for method in methods {
        separate(writer);
        gen_method(writer, method);
    }
    for nested in nested_classes {
        separate(writer);
        gen_class(writer, nested);
    }
}

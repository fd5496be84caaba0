//! Named type references.
//!
//! A reference either points at a class that already exists outside this run
//! (`ConcreteReference`) or at one the run is generating (`VaporReference`).
//! References are plain values: no back-pointers to the declarations that use them.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::errors::errors::Error;

use super::ast::is_valid_identifier;

pub const OBJECT_CLASS: &str = "java.lang.Object";
pub const EXCEPTION_CLASS: &str = "java.lang.Exception";

lazy_static! {
    /// Ancestry of the runtime classes generated code leans on, keyed by full name.
    static ref KNOWN_CLASSES: HashMap<&'static str, &'static [&'static str]> = {
        const THROWABLE: &[&str] = &["java.lang.Throwable", OBJECT_CLASS];
        const EXCEPTION: &[&str] = &[EXCEPTION_CLASS, "java.lang.Throwable", OBJECT_CLASS];
        const RUNTIME_EXCEPTION: &[&str] = &[
            "java.lang.RuntimeException",
            EXCEPTION_CLASS,
            "java.lang.Throwable",
            OBJECT_CLASS,
        ];
        const NUMBER: &[&str] = &["java.lang.Number", "java.lang.Comparable", OBJECT_CLASS];
        const ANNOTATION: &[&str] = &["java.lang.annotation.Annotation", OBJECT_CLASS];
        const OBJECT: &[&str] = &[OBJECT_CLASS];

        let mut map: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
        map.insert(OBJECT_CLASS, &[]);
        map.insert("javax.lang.model.type.NullType", &[]);
        map.insert("java.lang.String", &["java.lang.CharSequence", "java.lang.Comparable", OBJECT_CLASS]);
        map.insert("java.lang.Byte", NUMBER);
        map.insert("java.lang.Short", NUMBER);
        map.insert("java.lang.Integer", NUMBER);
        map.insert("java.lang.Long", NUMBER);
        map.insert("java.lang.Float", NUMBER);
        map.insert("java.lang.Double", NUMBER);
        map.insert("java.lang.Character", &["java.lang.Comparable", OBJECT_CLASS]);
        map.insert("java.lang.Boolean", &["java.lang.Comparable", OBJECT_CLASS]);
        map.insert("java.lang.Throwable", OBJECT);
        map.insert(EXCEPTION_CLASS, THROWABLE);
        map.insert("java.lang.RuntimeException", EXCEPTION);
        map.insert("java.lang.IllegalArgumentException", RUNTIME_EXCEPTION);
        map.insert("java.lang.IllegalStateException", RUNTIME_EXCEPTION);
        map.insert("java.lang.UnsupportedOperationException", RUNTIME_EXCEPTION);
        map.insert("java.lang.NullPointerException", RUNTIME_EXCEPTION);
        map.insert("java.lang.InterruptedException", EXCEPTION);
        map.insert("java.io.IOException", EXCEPTION);
        map.insert("java.util.concurrent.ExecutionException", EXCEPTION);
        map.insert("java.util.concurrent.TimeoutException", EXCEPTION);
        map.insert("java.lang.AutoCloseable", OBJECT);
        map.insert("java.lang.Iterable", OBJECT);
        map.insert("java.util.Collection", &["java.lang.Iterable", OBJECT_CLASS]);
        map.insert("java.util.List", &["java.util.Collection", "java.lang.Iterable", OBJECT_CLASS]);
        map.insert(
            "java.util.ArrayList",
            &["java.util.AbstractList", "java.util.List", "java.util.Collection", "java.lang.Iterable", OBJECT_CLASS],
        );
        map.insert("java.util.Map", OBJECT);
        map.insert("java.util.HashMap", &["java.util.AbstractMap", "java.util.Map", OBJECT_CLASS]);
        map.insert("java.util.Arrays", OBJECT);
        map.insert("java.util.Collections", OBJECT);
        map.insert("java.util.Objects", OBJECT);
        map.insert("java.lang.Override", ANNOTATION);
        map.insert("java.lang.Deprecated", ANNOTATION);
        map.insert("javax.annotation.Generated", ANNOTATION);
        map.insert("com.google.protobuf.ByteString", OBJECT);
        map
    };
}

/// A reference to a named type.
#[derive(Debug, Clone)]
pub enum Reference {
    Concrete(ConcreteReference),
    Vapor(VaporReference),
}

impl Reference {
    /// The unbounded wildcard `?`, only meaningful as a generic argument.
    pub fn wildcard() -> Self {
        Reference::Concrete(ConcreteReference {
            package: String::new(),
            enclosing_class_names: vec![],
            name: String::from("?"),
            generics: vec![],
            supertypes: vec![],
            is_static_import: false,
        })
    }

    /// Builds a reference to one of the classes in the known-class table.
    ///
    /// Only called with literal names from this crate.
    pub(crate) fn known(package: &str, name: &str) -> Self {
        let full_name = format!("{}.{}", package, name);
        Reference::Concrete(ConcreteReference {
            package: package.to_string(),
            enclosing_class_names: vec![],
            name: name.to_string(),
            generics: vec![],
            supertypes: known_ancestors(&full_name),
            is_static_import: false,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Reference::Concrete(concrete) => &concrete.name,
            Reference::Vapor(vapor) => &vapor.name,
        }
    }

    pub fn package(&self) -> &str {
        match self {
            Reference::Concrete(concrete) => &concrete.package,
            Reference::Vapor(vapor) => &vapor.package,
        }
    }

    pub fn enclosing_class_names(&self) -> &[String] {
        match self {
            Reference::Concrete(concrete) => &concrete.enclosing_class_names,
            Reference::Vapor(vapor) => &vapor.enclosing_class_names,
        }
    }

    pub fn generics(&self) -> &[Reference] {
        match self {
            Reference::Concrete(concrete) => &concrete.generics,
            Reference::Vapor(vapor) => &vapor.generics,
        }
    }

    pub fn is_static_import(&self) -> bool {
        match self {
            Reference::Concrete(concrete) => concrete.is_static_import,
            Reference::Vapor(vapor) => vapor.is_static_import,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.package().is_empty() && self.name() == "?"
    }

    /// The name as written after imports are resolved, e.g. `Map.Entry`.
    pub fn simple_name(&self) -> String {
        let mut parts: Vec<&str> = self
            .enclosing_class_names()
            .iter()
            .map(String::as_str)
            .collect();
        parts.push(self.name());
        parts.join(".")
    }

    /// The outermost class name, i.e. what an import statement names.
    pub fn top_level_name(&self) -> &str {
        self.enclosing_class_names()
            .first()
            .map(String::as_str)
            .unwrap_or_else(|| self.name())
    }

    pub fn full_name(&self) -> String {
        if self.package().is_empty() {
            self.simple_name()
        } else {
            format!("{}.{}", self.package(), self.simple_name())
        }
    }

    /// Every fully qualified supertype of this reference, nearest first.
    pub fn ancestors(&self) -> Vec<String> {
        match self {
            Reference::Concrete(concrete) => concrete.supertypes.clone(),
            Reference::Vapor(vapor) => match &vapor.supertype {
                Some(supertype) => {
                    let mut ancestors = vec![supertype.full_name()];
                    ancestors.extend(supertype.ancestors());
                    ancestors
                }
                None => vec![OBJECT_CLASS.to_string()],
            },
        }
    }

    /// Whether this reference is `full_name` or inherits from it.
    pub fn is_subtype_of(&self, full_name: &str) -> bool {
        self.full_name() == full_name || self.ancestors().iter().any(|a| a == full_name)
    }

    pub fn with_generics(&self, generics: Vec<Reference>) -> Reference {
        let mut copy = self.clone();
        match &mut copy {
            Reference::Concrete(concrete) => concrete.generics = generics,
            Reference::Vapor(vapor) => vapor.generics = generics,
        }
        copy
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.package() == other.package()
            && self.name() == other.name()
            && self.enclosing_class_names() == other.enclosing_class_names()
            && self.generics() == other.generics()
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.simple_name())?;
        if !self.generics().is_empty() {
            let generics: Vec<String> = self.generics().iter().map(|g| g.to_string()).collect();
            write!(f, "<{}>", generics.join(", "))?;
        }
        Ok(())
    }
}

fn known_ancestors(full_name: &str) -> Vec<String> {
    match KNOWN_CLASSES.get(full_name) {
        Some(ancestors) => ancestors.iter().map(|a| a.to_string()).collect(),
        None => vec![OBJECT_CLASS.to_string()],
    }
}

/// Splits `java.util.Map.Entry` into (`java.util`, [`Map`], `Entry`).
///
/// Package segments start lowercase; the first capitalised segment starts the class chain.
fn split_class_name(full_name: &str) -> Option<(String, Vec<String>, String)> {
    let segments: Vec<&str> = full_name.split('.').collect();
    if segments.iter().any(|s| !is_valid_identifier(s)) {
        return None;
    }
    let class_start = segments
        .iter()
        .position(|s| s.starts_with(|c: char| c.is_ascii_uppercase()))?;
    let package = segments[..class_start].join(".");
    let mut chain: Vec<String> = segments[class_start..].iter().map(|s| s.to_string()).collect();
    let name = chain.pop()?;
    Some((package, chain, name))
}

/// A class compiled outside this generator run.
#[derive(Debug, Clone)]
pub struct ConcreteReference {
    package: String,
    enclosing_class_names: Vec<String>,
    name: String,
    generics: Vec<Reference>,
    supertypes: Vec<String>,
    is_static_import: bool,
}

impl ConcreteReference {
    pub fn builder() -> ConcreteReferenceBuilder {
        ConcreteReferenceBuilder::default()
    }

    /// Shorthand for a reference to a class by its fully qualified name.
    pub fn with_class(full_name: &str) -> Result<Reference, Error> {
        ConcreteReference::builder().class_name(full_name).build()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConcreteReferenceBuilder {
    class_name: Option<String>,
    generics: Vec<Reference>,
    supertypes: Option<Vec<String>>,
    is_static_import: bool,
}

impl ConcreteReferenceBuilder {
    pub fn class_name(mut self, full_name: &str) -> Self {
        self.class_name = Some(full_name.to_string());
        self
    }

    pub fn generics(mut self, generics: Vec<Reference>) -> Self {
        self.generics = generics;
        self
    }

    /// Declared supertypes for classes missing from the known-class table.
    /// Known ancestors of each supertype are filled in automatically.
    pub fn supertypes(mut self, supertypes: Vec<&str>) -> Self {
        self.supertypes = Some(supertypes.into_iter().map(String::from).collect());
        self
    }

    pub fn is_static_import(mut self, is_static_import: bool) -> Self {
        self.is_static_import = is_static_import;
        self
    }

    pub fn build(self) -> Result<Reference, Error> {
        let full_name = self
            .class_name
            .ok_or_else(|| Error::invalid_structure("concrete reference", "class name", "must be set"))?;
        let (package, enclosing_class_names, name) = split_class_name(&full_name).ok_or_else(|| {
            Error::invalid_structure(
                "concrete reference",
                "class name",
                format!("`{}` is not a fully qualified class name", full_name),
            )
        })?;

        let supertypes = match self.supertypes {
            Some(declared) => {
                let mut ancestors: Vec<String> = vec![];
                for supertype in declared {
                    for ancestor in std::iter::once(supertype.clone()).chain(known_ancestors(&supertype)) {
                        if !ancestors.contains(&ancestor) {
                            ancestors.push(ancestor);
                        }
                    }
                }
                ancestors
            }
            None => known_ancestors(&full_name),
        };

        Ok(Reference::Concrete(ConcreteReference {
            package,
            enclosing_class_names,
            name,
            generics: self.generics,
            supertypes,
            is_static_import: self.is_static_import,
        }))
    }
}

/// A class that is being generated in this run.
#[derive(Debug, Clone)]
pub struct VaporReference {
    package: String,
    enclosing_class_names: Vec<String>,
    name: String,
    generics: Vec<Reference>,
    supertype: Option<Box<Reference>>,
    is_static_import: bool,
}

impl VaporReference {
    pub fn builder() -> VaporReferenceBuilder {
        VaporReferenceBuilder::default()
    }

    pub fn to_builder(&self) -> VaporReferenceBuilder {
        VaporReferenceBuilder {
            package: Some(self.package.clone()),
            enclosing_class_names: self.enclosing_class_names.clone(),
            name: Some(self.name.clone()),
            generics: self.generics.clone(),
            supertype: self.supertype.as_deref().cloned(),
            is_static_import: self.is_static_import,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VaporReferenceBuilder {
    package: Option<String>,
    enclosing_class_names: Vec<String>,
    name: Option<String>,
    generics: Vec<Reference>,
    supertype: Option<Reference>,
    is_static_import: bool,
}

impl VaporReferenceBuilder {
    pub fn package(mut self, package: &str) -> Self {
        self.package = Some(package.to_string());
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn enclosing_class_names(mut self, names: Vec<&str>) -> Self {
        self.enclosing_class_names = names.into_iter().map(String::from).collect();
        self
    }

    pub fn generics(mut self, generics: Vec<Reference>) -> Self {
        self.generics = generics;
        self
    }

    pub fn supertype(mut self, supertype: Reference) -> Self {
        self.supertype = Some(supertype);
        self
    }

    pub fn is_static_import(mut self, is_static_import: bool) -> Self {
        self.is_static_import = is_static_import;
        self
    }

    pub fn build(self) -> Result<Reference, Error> {
        let name = self
            .name
            .ok_or_else(|| Error::invalid_structure("vapor reference", "name", "must be set"))?;
        let package = self
            .package
            .ok_or_else(|| Error::invalid_structure("vapor reference", "package", "must be set"))?;

        if !is_valid_identifier(&name) {
            return Err(Error::invalid_structure(
                "vapor reference",
                "name",
                format!("`{}` is not a valid class name", name),
            ));
        }
        if package.is_empty() || package.split('.').any(|s| !is_valid_identifier(s)) {
            return Err(Error::invalid_structure(
                "vapor reference",
                "package",
                format!("`{}` is not a valid package", package),
            ));
        }
        if let Some(enclosing) = self.enclosing_class_names.iter().find(|n| !is_valid_identifier(n)) {
            return Err(Error::invalid_structure(
                "vapor reference",
                "enclosing class names",
                format!("`{}` is not a valid class name", enclosing),
            ));
        }

        Ok(Reference::Vapor(VaporReference {
            package,
            enclosing_class_names: self.enclosing_class_names,
            name,
            generics: self.generics,
            supertype: self.supertype.map(Box::new),
            is_static_import: self.is_static_import,
        }))
    }
}

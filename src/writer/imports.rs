use std::collections::{hash_map::Entry, BTreeSet, HashMap, HashSet};

use tracing::trace;

use crate::ast::reference::Reference;

/// Import side table filled while a tree is written.
///
/// The first reference to use a simple name claims it; later references with the same
/// simple name from another package are written fully qualified and get no import.
#[derive(Debug, Clone, Default)]
pub struct ImportTable {
    package: String,
    references: Vec<Reference>,
    seen: HashSet<(String, String, usize)>,
    claimed: HashMap<String, String>,
    imports: BTreeSet<String>,
}

impl ImportTable {
    /// A table for a file in `package`. Classes from that package are never imported.
    pub fn new(package: &str) -> Self {
        ImportTable {
            package: package.to_string(),
            ..ImportTable::default()
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Claims `name` for a class declared in the file itself.
    pub fn reserve(&mut self, package: &str, name: &str) {
        self.claimed
            .entry(name.to_string())
            .or_insert_with(|| qualify(package, name));
    }

    /// Records `reference` and returns the name to write for it, without generics.
    pub fn register(&mut self, reference: &Reference) -> String {
        if reference.is_wildcard() {
            return reference.name().to_string();
        }

        let key = (
            reference.package().to_string(),
            reference.simple_name(),
            reference.generics().len(),
        );
        if self.seen.insert(key) {
            trace!(reference = %reference.full_name(), arity = reference.generics().len(), "registered reference");
            self.references.push(reference.clone());
        }

        if reference.is_static_import() {
            let full_name = reference.full_name();
            return match self.claimed.entry(reference.name().to_string()) {
                Entry::Vacant(entry) => {
                    entry.insert(full_name.clone());
                    self.imports.insert(format!("import static {};", full_name));
                    reference.name().to_string()
                }
                Entry::Occupied(entry) if *entry.get() == full_name => reference.name().to_string(),
                Entry::Occupied(_) => full_name,
            };
        }

        let package = reference.package();
        let top_level_name = qualify(package, reference.top_level_name());
        match self.claimed.entry(reference.top_level_name().to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(top_level_name.clone());
                if !package.is_empty() && package != "java.lang" && package != self.package {
                    self.imports.insert(format!("import {};", top_level_name));
                }
                reference.simple_name()
            }
            Entry::Occupied(entry) if *entry.get() == top_level_name => reference.simple_name(),
            Entry::Occupied(_) => reference.full_name(),
        }
    }

    /// Every distinct (package, name, generic arity) seen, in visit order.
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Sorted, deduplicated import lines.
    pub fn import_statements(&self) -> Vec<String> {
        self.imports.iter().cloned().collect()
    }
}

fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", package, name)
    }
}

//! Registry of every scriptable declaration found in a run.
//!
//! The registry is immutable after construction. Declarations are added
//! through [`RegistryBuilder`], which keeps insertion order and resolves the
//! inheritance closure when it is built.
//!
//! # Example
//!
//! ```ignore
//! use scriptgen::registry::RegistryBuilder;
//!
//! let mut builder = RegistryBuilder::new();
//! for unit in &units {
//!     builder.add(PatternRecognizer.recognize(unit));
//! }
//!
//! let (registry, diagnostics) = builder.build()?;
//! for class in registry.classes() {
//!     println!("{} -> {:?}", class.qualified_name(), class.ancestors);
//! }
//! ```

pub mod graph;
mod types;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{GenError, Result};
use crate::parser::Recognized;

pub use graph::{CycleError, InheritanceGraph};
pub use types::{MethodOverload, Param, ScriptableClass, ScriptableEnum, SourceUnit};

impl From<CycleError> for GenError {
    fn from(err: CycleError) -> Self {
        GenError::InheritanceCycle {
            cycle: err.to_string(),
        }
    }
}

/// All classes, enums and namespaces of one run, in discovery order.
#[derive(Debug, Default, Serialize)]
pub struct Registry {
    classes: IndexMap<String, ScriptableClass>,
    enums: IndexMap<String, ScriptableEnum>,
    namespaces: IndexSet<String>,
}

impl Registry {
    /// Get a class by bare name.
    pub fn get_class(&self, name: &str) -> Option<&ScriptableClass> {
        self.classes.get(name)
    }

    /// Get an enum by qualified name.
    pub fn get_enum(&self, name: &str) -> Option<&ScriptableEnum> {
        self.enums.get(name)
    }

    /// Get all classes.
    pub fn classes(&self) -> impl Iterator<Item = &ScriptableClass> {
        self.classes.values()
    }

    /// Get all enums.
    pub fn enums(&self) -> impl Iterator<Item = &ScriptableEnum> {
        self.enums.values()
    }

    /// Namespace chains in first-seen order.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.iter().map(|s| s.as_str())
    }

    /// Include paths of every contributing header: classes first, then
    /// enums, each path once.
    pub fn includes(&self) -> Vec<&str> {
        let mut includes: IndexSet<&str> = IndexSet::new();
        includes.extend(self.classes.values().map(|c| c.include.as_str()));
        includes.extend(self.enums.values().map(|e| e.include.as_str()));
        includes.into_iter().collect()
    }

    /// Qualified name of a registered class, or the name unchanged when the
    /// class is not part of this run.
    pub fn resolve_class_name(&self, name: &str) -> String {
        match self.classes.get(name) {
            Some(class) => class.qualified_name(),
            None => name.to_string(),
        }
    }

    /// Get the total number of declarations.
    pub fn len(&self) -> usize {
        self.classes.len() + self.enums.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builder for constructing a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: Registry,
    diagnostics: Diagnostics,
}

impl RegistryBuilder {
    /// Create a new registry builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add everything recognized in one source unit.
    ///
    /// The unit's namespace is only recorded when the unit contributes a
    /// class or an enum.
    ///
    /// A class whose bare name is already registered replaces the earlier
    /// one in place; the same holds for enums with the same qualified name.
    /// Both cases are recorded as warnings.
    pub fn add(&mut self, recognized: Recognized) -> &mut Self {
        self.diagnostics.extend(recognized.diagnostics);

        if recognized.class.is_some() || !recognized.enums.is_empty() {
            if let Some(namespace) = recognized.namespace {
                self.registry.namespaces.insert(namespace);
            }
        }

        if let Some(class) = recognized.class {
            if let Some(previous) = self.registry.classes.get(&class.name) {
                self.diagnostics.push(
                    Diagnostic::warning(
                        "scriptgen::duplicate-class",
                        format!(
                            "class `{}` is also declared in {}; using this declaration",
                            class.name,
                            previous.path.display()
                        ),
                    )
                    .in_file(&class.path)
                    .with_help("Scriptable class names must be unique across the source tree"),
                );
            }
            self.registry.classes.insert(class.name.clone(), class);
        }

        for scriptable_enum in recognized.enums {
            let key = scriptable_enum.qualified_name();
            if let Some(previous) = self.registry.enums.get(&key) {
                self.diagnostics.push(
                    Diagnostic::warning(
                        "scriptgen::duplicate-enum",
                        format!(
                            "enum `{}` is also declared in {}; using this declaration",
                            key,
                            previous.path.display()
                        ),
                    )
                    .in_file(&scriptable_enum.path)
                    .with_help("Scriptable enum names must be unique within a namespace"),
                );
            }
            self.registry.enums.insert(key, scriptable_enum);
        }

        self
    }

    /// Add multiple recognition results.
    pub fn add_all(&mut self, all: impl IntoIterator<Item = Recognized>) -> &mut Self {
        for recognized in all {
            self.add(recognized);
        }
        self
    }

    /// Build the registry, resolving every class's ancestors.
    ///
    /// Bases that name no registered class are kept as written and noted.
    /// Circular bases are a fatal error.
    pub fn build(self) -> Result<(Registry, Diagnostics)> {
        let Self {
            mut registry,
            mut diagnostics,
        } = self;

        let mut graph = InheritanceGraph::new();
        for class in registry.classes.values() {
            graph.add_class(class.name.clone(), class.bases.clone());
        }

        for (class, base) in graph.unresolved_bases() {
            let mut note = Diagnostic::note(
                "scriptgen::unresolved-base",
                format!("base `{}` of `{}` is not a scriptable class", base, class),
            );
            if let Some(declared) = registry.classes.get(class) {
                note = note.in_file(&declared.path);
            }
            diagnostics.push(note);
        }

        let mut closure = graph.closure()?;
        for (name, class) in registry.classes.iter_mut() {
            class.ancestors = closure.swap_remove(name).unwrap_or_default();
        }

        Ok((registry, diagnostics))
    }
}

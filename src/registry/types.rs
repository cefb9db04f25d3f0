//! Declaration types collected from scriptable headers.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

/// A scriptable header: where it lives and everything it says.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// Path as discovered (used for diagnostics).
    pub path: PathBuf,
    /// Path relative to the source root with `/` separators, as it should
    /// appear in an `#include` line.
    pub include: String,
    /// Full file text.
    pub text: String,
}

impl SourceUnit {
    pub fn new(path: impl Into<PathBuf>, include: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            include: include.into(),
            text: text.into(),
        }
    }
}

/// One parameter of a method or constructor, default value already stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    /// Declaration text as written, e.g. `const std::string& name`.
    pub decl: String,
    /// Declaration without the parameter name, e.g. `const std::string&`.
    pub ty: String,
    /// Declared name, if the declaration has one.
    pub name: Option<String>,
}

impl Param {
    /// Split a declaration into type and name.
    ///
    /// The last token is taken as the name when it is a plain identifier and
    /// the declaration has more than one token, unless it is a builtin type
    /// keyword (`const int` has no name).
    pub fn parse(decl: &str) -> Self {
        let decl = decl.trim().to_string();
        let split = decl
            .rfind(|c: char| c.is_whitespace() || c == '&' || c == '*')
            .map(|i| i + decl[i..].chars().next().map_or(1, char::len_utf8));

        let (ty, name) = match split {
            Some(at) if at < decl.len() => {
                let candidate = &decl[at..];
                let ty = decl[..at].trim_end();
                if is_identifier(candidate) && !is_type_keyword(candidate) && !ty.is_empty() && ty != "const" {
                    (ty.to_string(), Some(candidate.to_string()))
                } else {
                    (decl.clone(), None)
                }
            }
            _ => (decl.clone(), None),
        };

        Self { decl, ty, name }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

fn is_type_keyword(s: &str) -> bool {
    matches!(
        s,
        "int" | "unsigned" | "signed" | "short" | "long" | "char" | "bool" | "float" | "double"
            | "void" | "auto" | "size_t" | "wchar_t" | "const" | "volatile"
    )
}

/// One overload of a method (or constructor) as found in the class body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodOverload {
    /// Return type with specifiers removed; empty for constructors.
    pub return_type: String,
    /// Parameters in declaration order.
    pub params: Vec<Param>,
    /// The name occurs more than once in the owning file.
    pub is_overloaded: bool,
    pub is_static: bool,
    /// Carries a trailing `const` qualifier.
    pub is_const: bool,
}

impl MethodOverload {
    pub fn is_constructor(&self) -> bool {
        self.return_type.is_empty()
    }
}

/// A class with a `BEGIN SCRIPTABLE` / `END SCRIPTABLE` region.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptableClass {
    /// Bare class name.
    pub name: String,
    /// Enclosing namespace chain (`A::B`), if any.
    pub namespace: Option<String>,
    /// Include path of the declaring header.
    pub include: String,
    /// Declaring header as discovered.
    pub path: PathBuf,
    /// Text strictly between the markers.
    #[serde(skip)]
    pub body: String,
    /// Bases listed on the `SCRIPTABLE BASES` line.
    pub bases: Vec<String>,
    /// Transitive closure of `bases`; filled in when the registry is built.
    pub ancestors: Vec<String>,
    /// Method name -> overloads in source order. Constructors are stored
    /// under the class name.
    pub methods: IndexMap<String, Vec<MethodOverload>>,
}

impl ScriptableClass {
    /// `Namespace::Name`, or the bare name in the global namespace.
    pub fn qualified_name(&self) -> String {
        qualify(self.namespace.as_deref(), &self.name)
    }

    /// All constructor overloads in source order.
    pub fn constructors(&self) -> impl Iterator<Item = &MethodOverload> {
        self.methods
            .values()
            .flatten()
            .filter(|overload| overload.is_constructor())
    }

    /// All non-constructor overloads with their method names, in source order.
    pub fn bound_methods(&self) -> impl Iterator<Item = (&str, &MethodOverload)> {
        self.methods.iter().flat_map(|(name, overloads)| {
            overloads
                .iter()
                .filter(|overload| !overload.is_constructor())
                .map(move |overload| (name.as_str(), overload))
        })
    }
}

/// An enum marked with `SCRIPTABLE ENUM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptableEnum {
    /// `Enum`, or `Class::Enum` when declared after a class.
    pub name: String,
    /// Enclosing namespace chain (`A::B`), if any.
    pub namespace: Option<String>,
    /// Include path of the declaring header.
    pub include: String,
    /// Declaring header as discovered.
    pub path: PathBuf,
    /// Declared as `enum class` / `enum struct`.
    pub scoped: bool,
    /// Enumerator names in declaration order.
    pub values: Vec<String>,
}

impl ScriptableEnum {
    /// Fully qualified type name, e.g. `Game::Sprite::State`.
    pub fn qualified_name(&self) -> String {
        qualify(self.namespace.as_deref(), &self.name)
    }

    /// Name used in the scripting runtime: `Class_Enum`.
    pub fn flat_name(&self) -> String {
        self.name.replace("::", "_")
    }

    /// Expression naming one enumerator from generated code.
    ///
    /// Scoped enums qualify with the enum type; unscoped enumerators live in
    /// the enclosing scope (class or namespace).
    pub fn value_expr(&self, value: &str) -> String {
        let qualified = self.qualified_name();
        if self.scoped {
            return format!("{}::{}", qualified, value);
        }
        match qualified.rsplit_once("::") {
            Some((scope, _)) => format!("{}::{}", scope, value),
            None => value.to_string(),
        }
    }
}

fn qualify(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(ns) => format!("{}::{}", ns, name),
        None => name.to_string(),
    }
}

//! ChaiScript registration code generation.
//!
//! Every class and enum in a [`Registry`](crate::registry::Registry) becomes
//! one routine returning a `chaiscript::ModulePtr`. The routines are
//! assembled into a single header whose `registerModules` adds each module
//! to the interpreter.

mod class;
mod enums;
mod file;

pub use class::class_module;
pub use enums::enum_module;
pub use file::render_header;

/// One generated routine and the expression that invokes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    /// Routine definition, indented for the `generated` namespace.
    pub source: String,
    /// Call expression, e.g. `getFooModule()`.
    pub call: String,
}

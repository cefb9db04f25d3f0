//! scriptgen - ChaiScript registration generator
//!
//! A library for turning C++ headers marked with `//=` comments into a single
//! header that registers their classes and enums with a ChaiScript
//! interpreter.

pub mod cli;
pub mod codegen;
pub mod diagnostics;
pub mod discovery;
pub mod error;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod registry;

pub use codegen::{render_header, GeneratedModule};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use discovery::{discover, load_config, Config};
pub use error::{GenError, Result};
pub use parser::{PatternRecognizer, Recognized, Recognizer};
pub use pipeline::{generate, generate_from_units, write_output, Generated};
pub use registry::{
    InheritanceGraph, MethodOverload, Param, Registry, RegistryBuilder, ScriptableClass,
    ScriptableEnum, SourceUnit,
};

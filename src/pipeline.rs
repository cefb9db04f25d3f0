//! The generation pipeline: discovery, recognition, registry, rendering.
//!
//! [`generate`] does every read and returns the finished header text without
//! touching the output path. [`write_output`] is the only write. A failure in
//! any stage therefore leaves an existing generated header untouched.

use std::fs;
use std::path::Path;

use crate::codegen::render_header;
use crate::diagnostics::Diagnostics;
use crate::discovery::{discover, Config};
use crate::error::{GenError, Result};
use crate::output::Printer;
use crate::parser::{PatternRecognizer, Recognizer};
use crate::registry::{Registry, RegistryBuilder, SourceUnit};

/// Result of a generation run.
#[derive(Debug)]
pub struct Generated {
    /// Complete header text.
    pub text: String,
    /// Everything skipped or partially read along the way.
    pub diagnostics: Diagnostics,
    /// The declarations the header was rendered from.
    pub registry: Registry,
}

/// Run discovery and generation for a config.
pub fn generate(config: &Config, printer: &Printer) -> Result<Generated> {
    let units = discover(config, printer)?;
    generate_from_units(&units, &PatternRecognizer, &config.guard)
}

/// Generate from already loaded source units.
pub fn generate_from_units(
    units: &[SourceUnit],
    recognizer: &dyn Recognizer,
    guard: &str,
) -> Result<Generated> {
    let mut builder = RegistryBuilder::new();
    builder.add_all(units.iter().map(|unit| recognizer.recognize(unit)));

    let (registry, diagnostics) = builder.build()?;
    let text = render_header(&registry, guard);

    Ok(Generated {
        text,
        diagnostics,
        registry,
    })
}

/// Write the header, creating the destination directory first.
pub fn write_output(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| GenError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    fs::write(path, text).map_err(|e| GenError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write generated header: {}", e),
    })
}

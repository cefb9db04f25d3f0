//! Scriptability filter: keeps only headers that opt in with `//= SCRIPTABLE`.

use std::path::{Component, Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{GenError, Result};
use crate::registry::SourceUnit;

use super::config::Config;

lazy_static! {
    /// A line holding nothing but the sentinel comment.
    static ref SENTINEL_RE: Regex = Regex::new(r"(?m)^[ \t]*//=[ \t]*SCRIPTABLE[ \t]*\r?$").unwrap();
}

/// Whether the text carries the sentinel line.
pub fn is_scriptable(text: &str) -> bool {
    SENTINEL_RE.is_match(text)
}

/// Read every header in `paths` and keep the scriptable ones.
///
/// Files without a configured header extension are never read. Headers that
/// cannot be read are a fatal error; invalid UTF-8 is replaced rather than
/// rejected.
pub fn load_scriptable(paths: &[PathBuf], root: &Path, config: &Config) -> Result<Vec<SourceUnit>> {
    let mut units = Vec::new();

    for path in paths {
        if !config.is_header(path) {
            continue;
        }

        let bytes = std::fs::read(path).map_err(|e| GenError::Io {
            path: path.clone(),
            message: format!("Failed to read header: {}", e),
        })?;
        let text = String::from_utf8_lossy(&bytes).into_owned();

        if !is_scriptable(&text) {
            continue;
        }

        units.push(SourceUnit::new(path.clone(), include_path(path, root), text));
    }

    Ok(units)
}

/// Path of `path` relative to `root`, joined with `/`, as written in an
/// `#include` directive.
pub fn include_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

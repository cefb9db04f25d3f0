//! Header discovery for scriptgen runs.
//!
//! This module finds every header under the source root and reads the ones
//! that opt in with a `//= SCRIPTABLE` line. Settings come from an optional
//! `scriptgen.yaml` config.
//!
//! # Example
//!
//! ```ignore
//! use scriptgen::discovery::{discover, load_config};
//!
//! let config = load_config(None)?;
//! let units = discover(&config, &printer)?;
//! println!("Found {} scriptable headers", units.len());
//! ```

mod config;
mod filter;
mod scanner;

use std::path::Path;

use crate::error::{GenError, Result};
use crate::output::{display_path, plural, Printer};
use crate::registry::SourceUnit;

pub use config::Config;
pub use filter::{include_path, is_scriptable, load_scriptable};
pub use scanner::scan_directory;

/// The name of the config file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "scriptgen.yaml";

/// Load the generator config.
///
/// An explicit `path` must exist. Without one, `scriptgen.yaml` in the
/// working directory is used when present, and the defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) if !path.is_file() => Err(GenError::Config {
            message: format!("config file {} not found", path.display()),
            help: None,
        }),
        Some(path) => Config::load(path),
        None => {
            let default = Path::new(CONFIG_FILENAME);
            if default.is_file() {
                Config::load(default)
            } else {
                Ok(Config::default())
            }
        }
    }
}

/// Scan the configured source root and load every scriptable header.
pub fn discover(config: &Config, printer: &Printer) -> Result<Vec<SourceUnit>> {
    let root = config.source.as_path();
    printer.status("Scanning", &display_path(root));

    let paths = scan_directory(root, config)?;
    let units = load_scriptable(&paths, root, config)?;

    printer.info(
        "Found",
        &format!(
            "{} in {}",
            plural(units.len(), "scriptable header", "scriptable headers"),
            plural(paths.len(), "file", "files")
        ),
    );

    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn config_for(root: &Path) -> Config {
        Config {
            source: root.to_path_buf(),
            output: root.join("generated/generated_registrations.h"),
            ..Default::default()
        }
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempdir().unwrap();
        let units = discover(&config_for(dir.path()), &Printer::quiet()).unwrap();
        assert!(units.is_empty());
    }

    #[test]
    fn test_discover_keeps_order() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        fs::create_dir_all(root.join("b")).unwrap();
        fs::write(root.join("b/second.h"), "//= SCRIPTABLE\n").unwrap();
        fs::write(root.join("a.hpp"), "//= SCRIPTABLE\n").unwrap();
        fs::write(root.join("c.h"), "// nothing here\n").unwrap();

        let units = discover(&config_for(root), &Printer::quiet()).unwrap();
        let includes: Vec<_> = units.iter().map(|u| u.include.as_str()).collect();
        assert_eq!(includes, vec!["a.hpp", "b/second.h"]);
    }

    #[test]
    fn test_discover_with_excludes() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        fs::create_dir_all(root.join("vendor")).unwrap();
        fs::write(root.join("player.h"), "//= SCRIPTABLE\n").unwrap();
        fs::write(root.join("vendor/lib.h"), "//= SCRIPTABLE\n").unwrap();

        let config = Config {
            excludes: vec!["**/vendor/*".to_string()],
            ..config_for(root)
        };
        let units = discover(&config, &Printer::quiet()).unwrap();

        assert_eq!(units.len(), 1);
        assert_eq!(units[0].include, "player.h");
    }

    #[test]
    fn test_discover_missing_root() {
        let dir = tempdir().unwrap();
        let err = discover(&config_for(&dir.path().join("missing")), &Printer::quiet()).unwrap_err();
        assert!(matches!(err, GenError::Discovery { .. }));
    }

    #[test]
    fn test_load_config_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(&path, "guard: CUSTOM_H\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.guard, "CUSTOM_H");
    }

    #[test]
    fn test_load_config_missing_explicit_path() {
        let dir = tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("nope.yaml"))).unwrap_err();
        assert!(matches!(err, GenError::Config { .. }));
    }
}

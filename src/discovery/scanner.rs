//! File system scanner for discovering header files.
//!
//! Recursively walks the source root in file-name order so that every run
//! visits files in the same sequence.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{GenError, Result};

use super::config::Config;

/// Scan a directory for candidate files.
///
/// Returns every non-directory entry under `root` that is not excluded by
/// the config and is not the generated output itself. Fails if `root` is
/// missing, is not a directory, or cannot be walked.
pub fn scan_directory(root: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        let message = if root.exists() {
            "not a directory"
        } else {
            "directory does not exist"
        };
        return Err(GenError::Discovery {
            path: root.to_path_buf(),
            message: message.to_string(),
            help: Some("Pass the header tree with --source or set `source` in scriptgen.yaml".to_string()),
        });
    }

    let output = std::fs::canonicalize(&config.output).ok();
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| GenError::Discovery {
            path: e.path().unwrap_or(root).to_path_buf(),
            message: e.to_string(),
            help: None,
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        if config.is_excluded(path) {
            continue;
        }

        if let Some(output) = &output {
            if std::fs::canonicalize(path).is_ok_and(|p| &p == output) {
                continue;
            }
        }

        files.push(path.to_path_buf());
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempdir().unwrap();
        let files = scan_directory(dir.path(), &Config::default()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_scan_is_sorted_and_recursive() {
        let dir = tempdir().unwrap();

        fs::create_dir_all(dir.path().join("ui/widgets")).unwrap();
        fs::write(dir.path().join("zeta.h"), "").unwrap();
        fs::write(dir.path().join("alpha.h"), "").unwrap();
        fs::write(dir.path().join("ui/widgets/button.h"), "").unwrap();
        fs::write(dir.path().join("ui/notes.txt"), "").unwrap();

        let files = scan_directory(dir.path(), &Config::default()).unwrap();
        let relative: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(
            relative,
            vec!["alpha.h", "ui/notes.txt", "ui/widgets/button.h", "zeta.h"]
        );
    }

    #[test]
    fn test_scan_with_excludes() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("player.h"), "").unwrap();
        fs::write(dir.path().join("config.in.h"), "").unwrap();

        let config = Config {
            excludes: vec!["*.in.h".to_string()],
            ..Default::default()
        };
        let files = scan_directory(dir.path(), &config).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].to_string_lossy().contains("player"));
    }

    #[test]
    fn test_scan_skips_output_file() {
        let dir = tempdir().unwrap();

        fs::create_dir_all(dir.path().join("generated")).unwrap();
        fs::write(dir.path().join("foo.h"), "").unwrap();
        let output = dir.path().join("generated/generated_registrations.h");
        fs::write(&output, "").unwrap();

        let config = Config {
            output,
            ..Default::default()
        };
        let files = scan_directory(dir.path(), &config).unwrap();

        assert_eq!(files, vec![dir.path().join("foo.h")]);
    }

    #[test]
    fn test_scan_nonexistent_directory() {
        let err = scan_directory(Path::new("/nonexistent/path"), &Config::default()).unwrap_err();
        assert!(matches!(err, GenError::Discovery { .. }));
    }

    #[test]
    fn test_scan_file_as_root() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("foo.h");
        fs::write(&file, "").unwrap();

        let err = scan_directory(&file, &Config::default()).unwrap_err();
        assert!(matches!(err, GenError::Discovery { ref message, .. } if message == "not a directory"));
    }
}

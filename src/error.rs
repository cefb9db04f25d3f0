use miette::Diagnostic;
use thiserror::Error;

/// Main error type for scriptgen operations
#[derive(Error, Diagnostic, Debug)]
pub enum GenError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(scriptgen::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Cannot scan {path}: {message}")]
    #[diagnostic(code(scriptgen::discovery))]
    Discovery {
        path: std::path::PathBuf,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(scriptgen::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Inheritance cycle detected: {cycle}")]
    #[diagnostic(
        code(scriptgen::inheritance_cycle),
        help("Remove one of the SCRIPTABLE BASES entries that closes the cycle")
    )]
    InheritanceCycle { cycle: String },

    #[error("Check failed: {message}")]
    #[diagnostic(code(scriptgen::check))]
    Check {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, GenError>;

//! Error types for the rpmname library.
//!
//! This module defines all error types used throughout the crate.
//! Uses `thiserror` for ergonomic error handling and automatic `Display` impl.
//!
//! # Error Hierarchy
//!
//! - [`RpmNameError`] - Top-level error enum, wraps all other errors
//! - [`VariantsError`] - Errors from [`NameVariants`](crate::NameVariants) operations
//! - [`CatalogError`] - Errors from catalog queries
//! - [`ConfigError`] - Errors from settings loading
//! - [`VenvError`] - Errors from virtualenv snapshots
//!
//! # Usage
//!
//! Name conversion itself never fails: a name that matches no prefix or
//! suffix pattern is simply left alone. Errors only come from the catalog,
//! configuration and filesystem layers.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the rpmname library.
#[derive(Error, Debug)]
pub enum RpmNameError {
    /// Error from name variant handling
    #[error("variants error: {0}")]
    Variants(#[from] VariantsError),

    /// Error from a catalog query
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Error from configuration loading
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Error from virtualenv scanning
    #[error("venv error: {0}")]
    Venv(#[from] VenvError),

    /// IO error (file operations)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from [`NameVariants`](crate::NameVariants) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VariantsError {
    /// Merge target is not a `NameVariants` instance.
    #[error("NameVariants can only be merged with another NameVariants, got {found}")]
    TypeMismatch {
        /// Type name of the rejected value
        found: String,
    },
}

/// Errors from [`Catalog`](crate::Catalog) backends.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("failed to read catalog {}: {source}", path.display())]
    Read {
        /// Catalog file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Catalog command line could not be parsed
    #[error("invalid catalog command '{command}': {reason}")]
    InvalidCommand {
        /// Command line as given
        command: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Catalog command failed to run or exited with an error
    #[error("catalog command failed: {command} (exit {code:?}): {stderr}")]
    Command {
        /// Command string
        command: String,
        /// Exit code (if available)
        code: Option<i32>,
        /// Captured stderr
        stderr: String,
    },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from [`config`](crate::config) loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`Settings`](crate::config::Settings)
    #[error("failed to parse {}: {reason}", path.display())]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Parser message
        reason: String,
    },
}

/// Errors from [`venv`](crate::venv) scanning.
#[derive(Error, Debug)]
pub enum VenvError {
    /// Virtualenv root does not exist
    #[error("virtualenv not found: {}", path.display())]
    NotFound {
        /// The missing root
        path: PathBuf,
    },

    /// Directory listing failed
    #[error("failed to list {}: {source}", path.display())]
    ReadDir {
        /// Directory path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using RpmNameError
pub type Result<T> = std::result::Result<T, RpmNameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = VariantsError::TypeMismatch {
            found: "alloc::string::String".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "NameVariants can only be merged with another NameVariants, got alloc::string::String"
        );
    }

    #[test]
    fn error_conversion() {
        let err = CatalogError::Command {
            command: "dnf repoquery".to_string(),
            code: Some(1),
            stderr: "no repos".to_string(),
        };
        let top: RpmNameError = err.into();
        assert!(matches!(top, RpmNameError::Catalog(_)));
        assert!(top.to_string().starts_with("catalog error: catalog command failed"));
    }

    #[test]
    fn question_mark_funnels_module_errors() {
        fn scan_missing() -> Result<()> {
            let scan: std::result::Result<(), VenvError> = Err(VenvError::NotFound {
                path: PathBuf::from("/gone"),
            });
            scan?;
            Ok(())
        }
        fn bad_json() -> Result<serde_json::Value> {
            Ok(serde_json::from_str("{")?)
        }

        assert!(matches!(scan_missing(), Err(RpmNameError::Venv(_))));
        assert!(matches!(bad_json(), Err(RpmNameError::Json(_))));
        let io: RpmNameError = std::io::Error::from(std::io::ErrorKind::BrokenPipe).into();
        assert!(io.to_string().starts_with("io error: "));
    }
}

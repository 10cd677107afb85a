//! rpmname: Python to RPM package name conversion.
//!
//! A Rust library for turning upstream (PyPI) package names into the names
//! RPM distributions give them, and for checking those names against the
//! packages a distribution actually ships.
//!
//! # Overview
//!
//! rpmname provides:
//!
//! - **Name conversion** following the Python packaging guidelines
//! - **Versioned names** for parallel-installable runtimes (`python3-foo`)
//! - **Variant resolution** against a package catalog (`dnf repoquery`, file, memory)
//! - **Virtualenv deltas** listing what a package installs
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                            CLI                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CatalogNameConvertor  │   Catalog backends   │   Config    │
//! ├────────────────────────┴──────────────────────┴─────────────┤
//! │    NameConvertor     │    NameVariants    │    VirtualEnv   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use rpmname_lib::{CatalogNameConvertor, NameConvertor, StaticCatalog};
//!
//! let conv = NameConvertor::new("fedora");
//! assert_eq!(conv.rpm_name("python-foo", None), "python-foo");
//! assert_eq!(conv.rpm_name("foo", Some("3")), "python3-foo");
//!
//! let catalog = StaticCatalog::new(["python3-PyYAML"]);
//! let checked = CatalogNameConvertor::new(conv, catalog);
//! assert_eq!(checked.rpm_name("pyyaml", Some("3"))?, Some("python3-PyYAML".into()));
//! ```
//!
//! # Core Types
//!
//! - [`NameConvertor`] - Plain name conversion and versioning policy
//! - [`NameVariants`] - Candidate spellings matched against a catalog
//! - [`Catalog`] - Package catalog query capability
//! - [`CatalogNameConvertor`] - Conversion validated against a catalog
//! - [`DirsContent`] / [`VirtualEnv`] - Virtualenv snapshots and deltas
//!
//! # Modules
//!
//! - [`name`] - Name conversion
//! - [`variants`] - Name variants
//! - [`catalog`] - Catalog trait, backends and checked conversion
//! - [`config`] - Settings loading
//! - [`venv`] - Virtualenv snapshots
//! - [`error`] - Error types

pub mod catalog;
pub mod config;
pub mod error;
pub mod name;
pub mod variants;
pub mod venv;

// Re-exports for convenience
pub use catalog::{
    Catalog, CatalogBackend, CatalogNameConvertor, CommandCatalog, FileCatalog, Resolution,
    StaticCatalog,
};
pub use config::Settings;
pub use error::{CatalogError, ConfigError, Result, RpmNameError, VariantsError, VenvError};
pub use name::{canonical_form, NameConvertor};
pub use variants::{NameVariants, Variant};
pub use venv::{DirsContent, VirtualEnv};

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Catalog-backed name conversion.
//!
//! A [`Catalog`] answers one question: which package names in the active
//! repositories contain any of the given substrings. [`CatalogNameConvertor`]
//! uses it to check the name produced by [`NameConvertor`] and, when that
//! name does not exist, to look for the spelling the distribution really uses.
//!
//! Backends:
//!
//! - [`StaticCatalog`] - fixed in-memory list
//! - [`FileCatalog`] - newline-separated names in a file
//! - [`CommandCatalog`] - stdout of an external command (`dnf repoquery` by default)

use crate::config::CatalogSettings;
use crate::error::CatalogError;
use crate::name::{canonical_form, NameConvertor};
use crate::variants::NameVariants;
use log::{debug, info, trace, warn};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Default command listing all package names of the enabled repositories.
///
/// dnf5 needs the `\n` escape to separate entries. dnf4 ends every entry
/// with its own line break, so there each name is followed by a blank line.
/// Blank lines are skipped when parsing, both produce the same list.
pub const DEFAULT_CATALOG_COMMAND: &str = "dnf repoquery --quiet --queryformat '%{name}\\n'";

/// Package catalog query capability.
pub trait Catalog {
    /// Names of all packages containing at least one of `substrings`.
    fn search(&self, substrings: &BTreeSet<String>) -> Result<Vec<String>, CatalogError>;
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn search(&self, substrings: &BTreeSet<String>) -> Result<Vec<String>, CatalogError> {
        (**self).search(substrings)
    }
}

impl<C: Catalog + ?Sized> Catalog for Box<C> {
    fn search(&self, substrings: &BTreeSet<String>) -> Result<Vec<String>, CatalogError> {
        (**self).search(substrings)
    }
}

/// Keep names containing any of `substrings` (case-sensitive), first
/// occurrence only, in input order.
pub fn filter_names<I, S>(names: I, substrings: &BTreeSet<String>) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref();
            let hit = substrings.iter().any(|s| name.contains(s.as_str()));
            (hit && seen.insert(name.to_string())).then(|| name.to_string())
        })
        .collect()
}

// =============================================================================
// Backends
// =============================================================================

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    names: Vec<String>,
}

impl StaticCatalog {
    /// Create a catalog holding `names`.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of names in the catalog.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if the catalog holds no names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Catalog for StaticCatalog {
    fn search(&self, substrings: &BTreeSet<String>) -> Result<Vec<String>, CatalogError> {
        Ok(filter_names(&self.names, substrings))
    }
}

/// Catalog read from a file with one package name per line.
///
/// Blank lines and lines starting with `#` are skipped. The file is read
/// on every search so it may be refreshed between calls.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    /// Create a catalog backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Catalog for FileCatalog {
    fn search(&self, substrings: &BTreeSet<String>) -> Result<Vec<String>, CatalogError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Read {
            path: self.path.clone(),
            source,
        })?;
        debug!("Catalog: read {}", self.path.display());
        Ok(filter_names(parse_names(&content), substrings))
    }
}

/// Catalog listed by an external command, one name per stdout line.
#[derive(Debug, Clone)]
pub struct CommandCatalog {
    command: String,
    argv: Vec<String>,
}

impl CommandCatalog {
    /// Parse `command` with shell quoting rules.
    pub fn new(command: &str) -> Result<Self, CatalogError> {
        let argv = shell_words::split(command).map_err(|e| CatalogError::InvalidCommand {
            command: command.to_string(),
            reason: e.to_string(),
        })?;
        if argv.is_empty() {
            return Err(CatalogError::InvalidCommand {
                command: command.to_string(),
                reason: "empty command".to_string(),
            });
        }
        Ok(Self {
            command: command.to_string(),
            argv,
        })
    }

    /// `dnf repoquery` over all enabled repositories.
    pub fn dnf() -> Result<Self, CatalogError> {
        Self::new(DEFAULT_CATALOG_COMMAND)
    }
}

impl Catalog for CommandCatalog {
    fn search(&self, substrings: &BTreeSet<String>) -> Result<Vec<String>, CatalogError> {
        info!("Catalog: running {}", self.command);
        let output = Command::new(&self.argv[0]).args(&self.argv[1..]).output()?;

        if !output.status.success() {
            return Err(CatalogError::Command {
                command: self.command.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(filter_names(parse_names(&stdout), substrings))
    }
}

fn parse_names(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

// =============================================================================
// Backend selection
// =============================================================================

/// Which catalog backend to query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogBackend {
    /// [`FileCatalog`] at this path
    File(PathBuf),
    /// [`CommandCatalog`] running this command line
    Command(String),
}

impl CatalogBackend {
    /// Pick a backend: explicit file, explicit command, settings file,
    /// settings command, then [`DEFAULT_CATALOG_COMMAND`].
    pub fn select(
        settings: &CatalogSettings,
        file: Option<&Path>,
        command: Option<&str>,
    ) -> Self {
        let backend = if let Some(path) = file {
            Self::File(path.to_path_buf())
        } else if let Some(cmd) = command {
            Self::Command(cmd.to_string())
        } else if let Some(path) = &settings.file {
            Self::File(path.clone())
        } else if let Some(cmd) = &settings.command {
            Self::Command(cmd.clone())
        } else {
            Self::Command(DEFAULT_CATALOG_COMMAND.to_string())
        };
        debug!("Catalog: {:?}", backend);
        backend
    }

    /// Instantiate the backend.
    pub fn open(&self) -> Result<Box<dyn Catalog>, CatalogError> {
        Ok(match self {
            Self::File(path) => Box::new(FileCatalog::new(path)),
            Self::Command(cmd) => Box::new(CommandCatalog::new(cmd)?),
        })
    }
}

// =============================================================================
// Catalog-backed convertor
// =============================================================================

/// Outcome of [`CatalogNameConvertor::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Name found in the catalog
    Catalog(String),
    /// Nothing matched, plain conversion used instead
    Fallback(String),
    /// Nothing matched and no fallback requested
    Unresolved,
}

impl Resolution {
    /// Resolved name, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Resolution::Catalog(name) | Resolution::Fallback(name) => Some(name),
            Resolution::Unresolved => None,
        }
    }

    /// Where the name came from: `catalog`, `fallback` or `none`.
    pub fn source(&self) -> &'static str {
        match self {
            Resolution::Catalog(_) => "catalog",
            Resolution::Fallback(_) => "fallback",
            Resolution::Unresolved => "none",
        }
    }
}

/// [`NameConvertor`] that checks its results against a [`Catalog`].
#[derive(Debug, Clone)]
pub struct CatalogNameConvertor<C> {
    convertor: NameConvertor,
    catalog: C,
}

impl<C: Catalog> CatalogNameConvertor<C> {
    /// Wrap `convertor` with `catalog`.
    pub fn new(convertor: NameConvertor, catalog: C) -> Self {
        Self { convertor, catalog }
    }

    /// The underlying plain convertor.
    pub fn convertor(&self) -> &NameConvertor {
        &self.convertor
    }

    /// The catalog being queried.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Convert `name` and confirm the result exists in the catalog.
    ///
    /// Returns the plain conversion if the catalog has it, otherwise the
    /// best matching name variant. `Ok(None)` means no catalog entry looked
    /// like this package; whether to fall back to
    /// [`NameConvertor::rpm_name`] is up to the caller.
    pub fn rpm_name(&self, name: &str, version: Option<&str>) -> Result<Option<String>, CatalogError> {
        let converted = self.convertor.rpm_name(name, version);
        let found = self.catalog.search(&search_terms(name))?;
        debug!("Catalog: {} candidates for {}", found.len(), name);

        if found.iter().any(|pkg| *pkg == converted) {
            debug!("Converted name {} exists in catalog", converted);
            return Ok(Some(converted));
        }

        debug!("Converted name {} not in catalog, searching variants", converted);
        let variants = self.variants_from(name, version, &found);
        let best = variants.best_matching().map(str::to_string);
        match &best {
            Some(best) => info!("Resolved {} to {}", name, best),
            None => info!("No catalog entry matches {}", name),
        }
        Ok(best)
    }

    /// [`rpm_name`](Self::rpm_name), optionally falling back to the plain
    /// conversion when the catalog has nothing.
    pub fn resolve(
        &self,
        name: &str,
        version: Option<&str>,
        fallback: bool,
    ) -> Result<Resolution, CatalogError> {
        Ok(match self.rpm_name(name, version)? {
            Some(found) => Resolution::Catalog(found),
            None if fallback => {
                warn!("No catalog match for {}, using plain conversion", name);
                Resolution::Fallback(self.convertor.rpm_name(name, version))
            }
            None => Resolution::Unresolved,
        })
    }

    /// Query the catalog and return the merged name variants of `name`.
    pub fn name_variants(&self, name: &str, version: Option<&str>) -> Result<NameVariants, CatalogError> {
        let found = self.catalog.search(&search_terms(name))?;
        Ok(self.variants_from(name, version, &found))
    }

    fn variants_from(&self, name: &str, version: Option<&str>, found: &[String]) -> NameVariants {
        let base = self.convertor.base_name(name);
        let mut versioned = NameVariants::new(base.clone(), version.unwrap_or(""));
        let mut unversioned = NameVariants::new(base, "");

        for pkg in found {
            versioned.find_match(pkg);
            unversioned.find_match(pkg);
        }
        trace!("Versioned variants: {:?}", versioned);
        trace!("Unversioned variants: {:?}", unversioned);

        versioned.merge(&unversioned)
    }
}

/// Substrings a catalog entry for `name` is expected to contain.
pub fn search_terms(name: &str) -> BTreeSet<String> {
    ["python".to_string(), "py".to_string(), name.to_string(), canonical_form(name)]
        .into_iter()
        .collect()
}

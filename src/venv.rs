//! Virtualenv content snapshots.
//!
//! Installing a package into a throwaway virtualenv and diffing the
//! `bin/` and `site-packages/` listings before and after tells which
//! modules and scripts the package ships.
//!
//! ```text
//! venv/
//! ├── bin/                         -> DirsContent::bindir
//! └── lib/python3.12/site-packages -> DirsContent::lib_sitepackages
//! ```

use crate::error::VenvError;
use crate::name::NameConvertor;
use log::{debug, trace};
use serde::Serialize;
use std::collections::BTreeSet;
use std::ops::Sub;
use std::path::{Path, PathBuf};

/// Entry names of a virtualenv's `bin/` and `site-packages/` directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirsContent {
    /// Entries of `bin/`
    pub bindir: BTreeSet<String>,
    /// Entries of `lib/python*/site-packages/`
    pub lib_sitepackages: BTreeSet<String>,
}

impl DirsContent {
    /// Create from explicit entry sets.
    pub fn new(bindir: BTreeSet<String>, lib_sitepackages: BTreeSet<String>) -> Self {
        Self {
            bindir,
            lib_sitepackages,
        }
    }

    /// List the directories of the virtualenv at `root`.
    ///
    /// Missing `bin/` or `site-packages/` directories count as empty.
    pub fn scan(root: &Path) -> Result<Self, VenvError> {
        if !root.is_dir() {
            return Err(VenvError::NotFound {
                path: root.to_path_buf(),
            });
        }

        let bindir = list_dir(&root.join("bin"))?;
        let lib_sitepackages = match find_site_packages(root)? {
            Some(dir) => list_dir(&dir)?,
            None => BTreeSet::new(),
        };
        debug!(
            "Venv {}: {} scripts, {} site-packages entries",
            root.display(),
            bindir.len(),
            lib_sitepackages.len()
        );

        Ok(Self {
            bindir,
            lib_sitepackages,
        })
    }
}

impl Sub for &DirsContent {
    type Output = DirsContent;

    fn sub(self, other: Self) -> DirsContent {
        DirsContent {
            bindir: &self.bindir - &other.bindir,
            lib_sitepackages: &self.lib_sitepackages - &other.lib_sitepackages,
        }
    }
}

impl Sub for DirsContent {
    type Output = DirsContent;

    fn sub(self, other: DirsContent) -> DirsContent {
        &self - &other
    }
}

/// Drop `*.dist-info` metadata directories, keep modules and `*.egg-info`.
pub fn site_packages_filter<I, S>(entries: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|e| e.as_ref().to_string())
        .filter(|e| !e.ends_with(".dist-info"))
        .collect()
}

/// Drop compiled `*.pyc` files, keep everything else in order.
pub fn scripts_filter<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|e| e.as_ref().to_string())
        .filter(|e| !e.ends_with(".pyc"))
        .collect()
}

/// Virtualenv used to discover what a package installs.
#[derive(Debug, Clone)]
pub struct VirtualEnv {
    /// Virtualenv root directory
    pub root: PathBuf,
    /// Convertor for naming the package being inspected
    pub name_convertor: NameConvertor,
    /// Runtime version the virtualenv was created for
    pub python_version: String,
}

impl VirtualEnv {
    /// Describe the virtualenv at `root`.
    pub fn new(
        root: impl Into<PathBuf>,
        name_convertor: NameConvertor,
        python_version: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            name_convertor,
            python_version: python_version.into(),
        }
    }

    /// Current directory listings.
    pub fn snapshot(&self) -> Result<DirsContent, VenvError> {
        DirsContent::scan(&self.root)
    }

    /// Modules and scripts present in `after` but not in `before`.
    ///
    /// Returns `(site-packages entries, scripts)`, both filtered.
    pub fn dirs_difference(
        &self,
        before: &DirsContent,
        after: &DirsContent,
    ) -> (BTreeSet<String>, Vec<String>) {
        let diff = after - before;
        trace!("Venv diff: {:?}", diff);
        (
            site_packages_filter(&diff.lib_sitepackages),
            scripts_filter(&diff.bindir),
        )
    }

    /// RPM name of `package` for this virtualenv's runtime version.
    pub fn rpm_name(&self, package: &str) -> String {
        self.name_convertor
            .rpm_name(package, Some(self.python_version.as_str()))
    }
}

/// First `lib/python*/site-packages` directory under `root`.
fn find_site_packages(root: &Path) -> Result<Option<PathBuf>, VenvError> {
    let lib = root.join("lib");
    let mut pythons: Vec<String> = list_dir(&lib)?
        .into_iter()
        .filter(|name| name.starts_with("python"))
        .collect();
    pythons.sort();

    Ok(pythons
        .into_iter()
        .map(|name| lib.join(name).join("site-packages"))
        .find(|dir| dir.is_dir()))
}

fn list_dir(dir: &Path) -> Result<BTreeSet<String>, VenvError> {
    if !dir.is_dir() {
        return Ok(BTreeSet::new());
    }
    let read_err = |source: std::io::Error| VenvError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = BTreeSet::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        names.insert(entry.file_name().to_string_lossy().to_string());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn site_packages_filter_cases() {
        assert_eq!(site_packages_filter(["foo", "foo-1.0.0.dist-info"]), set(&["foo"]));
        assert_eq!(
            site_packages_filter(["foo", "foo-1.0.0.dist-info", "foo2"]),
            set(&["foo", "foo2"])
        );
        assert_eq!(
            site_packages_filter(["foo", "foo-1.0.0.dist-info", "foo2-1.0.0-py2.7.egg-info"]),
            set(&["foo", "foo2-1.0.0-py2.7.egg-info"])
        );
        assert_eq!(site_packages_filter(Vec::<String>::new()), BTreeSet::new());
    }

    #[test]
    fn scripts_filter_cases() {
        assert_eq!(scripts_filter(["script", "script2"]), vec!["script", "script2"]);
        assert_eq!(scripts_filter(["script.py", "script2"]), vec!["script.py", "script2"]);
        assert_eq!(scripts_filter(["script.pyc", "script2"]), vec!["script2"]);
        assert!(scripts_filter(["script.pyc"]).is_empty());
    }

    #[test]
    fn sub_bindir() {
        let after = DirsContent::new(set(&["activate", "pip", "foo"]), BTreeSet::new());
        let before = DirsContent::new(set(&["activate", "pip"]), BTreeSet::new());
        assert_eq!((&after - &before).bindir, set(&["foo"]));
        assert!((&before - &before).bindir.is_empty());
    }

    #[test]
    fn sub_sitepackages() {
        let after = DirsContent::new(BTreeSet::new(), set(&["foo", "pip"]));
        let before = DirsContent::new(BTreeSet::new(), set(&["wheel", "pip"]));
        assert_eq!((after - before).lib_sitepackages, set(&["foo"]));
    }

    #[test]
    fn dirs_difference_filters() {
        let venv = VirtualEnv::new("/nonexistent", NameConvertor::default(), "3");
        let before = DirsContent::new(set(&["pip"]), set(&["pip"]));
        let after = DirsContent::new(
            set(&["pip", "foo", "foo.pyc"]),
            set(&["pip", "foo", "foo-1.0.dist-info"]),
        );
        let (packages, scripts) = venv.dirs_difference(&before, &after);
        assert_eq!(packages, set(&["foo"]));
        assert_eq!(scripts, vec!["foo"]);
    }

    #[test]
    fn scan_venv_layout() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let sp = root.join("lib").join("python3.12").join("site-packages");
        fs::create_dir_all(&sp).unwrap();
        fs::create_dir_all(root.join("bin")).unwrap();
        fs::write(root.join("bin").join("activate"), "").unwrap();
        fs::create_dir(sp.join("pip")).unwrap();

        let content = DirsContent::scan(root).unwrap();
        assert_eq!(content.bindir, set(&["activate"]));
        assert_eq!(content.lib_sitepackages, set(&["pip"]));
    }

    #[test]
    fn scan_missing_dirs_are_empty() {
        let dir = TempDir::new().unwrap();
        let content = DirsContent::scan(dir.path()).unwrap();
        assert_eq!(content, DirsContent::default());
    }

    #[test]
    fn scan_missing_root() {
        let dir = TempDir::new().unwrap();
        let err = DirsContent::scan(&dir.path().join("gone")).unwrap_err();
        assert!(matches!(err, VenvError::NotFound { .. }));
    }

    #[test]
    fn venv_rpm_name() {
        let venv = VirtualEnv::new("/tmp/venv", NameConvertor::with_default_version("fedora", "3"), "2");
        assert_eq!(venv.rpm_name("foo"), "python2-foo");
    }
}

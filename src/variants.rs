//! Name variants of a Python package in a distribution catalog.
//!
//! Distributions don't always follow the naming guidelines mechanically, so
//! a converted name may not exist while the package is still there under a
//! slightly different spelling. [`NameVariants`] generates the plausible
//! spellings and records which of them a catalog actually contains.
//!
//! # Variants
//!
//! For name `foo` and version `3`, in priority order:
//!
//! | Variant | Candidate |
//! |---------|-----------|
//! | [`Variant::PythonVerName`] | `python3-foo` |
//! | [`Variant::PyverName`] | `py3foo` (or `foo` as-is when it starts with `py`) |
//! | [`Variant::NamePythonVer`] | `foo-python3` |
//! | [`Variant::RawName`] | `foo` |
//!
//! Candidates are compared by [`canonical_form`], the stored value is the
//! catalog entry's own spelling.

use crate::error::VariantsError;
use crate::name::canonical_form;
use log::trace;
use serde::Serialize;
use std::any::Any;
use std::fmt;

/// Candidate spelling slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// `python{version}-{name}`
    PythonVerName,
    /// `py{version}{name}`, or `{name}` if it already starts with `py`
    PyverName,
    /// `{name}-python{version}`
    NamePythonVer,
    /// `{name}`
    RawName,
}

impl Variant {
    /// All variants, most specific first.
    pub const ALL: [Variant; 4] = [
        Variant::PythonVerName,
        Variant::PyverName,
        Variant::NamePythonVer,
        Variant::RawName,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Slot name as used in logs and JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::PythonVerName => "python_ver_name",
            Variant::PyverName => "pyver_name",
            Variant::NamePythonVer => "name_python_ver",
            Variant::RawName => "raw_name",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate spellings of one package name and the catalog entries matching them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameVariants {
    /// Name the candidates are built from
    pub name: String,

    /// Runtime version, empty for unversioned
    pub version: String,

    candidates: [String; 4],
    matches: [Option<String>; 4],
}

impl NameVariants {
    /// Build the candidate spellings for `name` and `version`.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        let version = version.into();

        let pyver_name = if name.starts_with("py") {
            name.clone()
        } else {
            format!("py{}{}", version, name)
        };

        let candidates = [
            format!("python{}-{}", version, name),
            pyver_name,
            format!("{}-python{}", name, version),
            name.clone(),
        ];

        Self {
            name,
            version,
            candidates,
            matches: Default::default(),
        }
    }

    /// Candidate spelling for `variant`.
    pub fn candidate(&self, variant: Variant) -> &str {
        &self.candidates[variant.index()]
    }

    /// Catalog entry recorded for `variant`, if any.
    pub fn get(&self, variant: Variant) -> Option<&str> {
        self.matches[variant.index()].as_deref()
    }

    /// Iterate over `(variant, matched entry)` in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Variant, Option<&str>)> + '_ {
        Variant::ALL.into_iter().map(move |v| (v, self.get(v)))
    }

    /// Record `entry` in every empty slot whose candidate has the same
    /// canonical form. A filled slot keeps its first entry.
    pub fn find_match(&mut self, entry: &str) {
        let key = canonical_form(entry);
        for variant in Variant::ALL {
            let slot = &mut self.matches[variant.index()];
            if slot.is_none() && canonical_form(&self.candidates[variant.index()]) == key {
                trace!("{} matches {} of {}", entry, variant, self.name);
                *slot = Some(entry.to_string());
            }
        }
    }

    /// Fill unset slots from `other`; slots already set are kept.
    pub fn merge(mut self, other: &NameVariants) -> Self {
        for (slot, theirs) in self.matches.iter_mut().zip(other.matches.iter()) {
            if slot.is_none() {
                *slot = theirs.clone();
            }
        }
        self
    }

    /// Like [`merge`](Self::merge) for a value of unknown type.
    ///
    /// Fails with [`VariantsError::TypeMismatch`] unless `other` is a
    /// `NameVariants`.
    pub fn merge_any<T: Any>(self, other: &T) -> Result<Self, VariantsError> {
        match (other as &dyn Any).downcast_ref::<NameVariants>() {
            Some(other) => Ok(self.merge(other)),
            None => Err(VariantsError::TypeMismatch {
                found: std::any::type_name::<T>().to_string(),
            }),
        }
    }

    /// Most specific matched entry, or `None` if nothing matched.
    pub fn best_matching(&self) -> Option<&str> {
        self.matches.iter().flatten().next().map(String::as_str)
    }

    /// True when no slot has been filled.
    pub fn is_empty(&self) -> bool {
        self.matches.iter().all(Option::is_none)
    }
}

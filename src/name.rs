//! Python to RPM package name conversion.
//!
//! Turns an upstream (PyPI) package name into the name the package should
//! carry in an RPM distribution, following the Python packaging guidelines.
//!
//! # Name Forms
//!
//! ```text
//! python{version}-{base}
//!       ^         ^
//!       |         |
//!       |         base name: upstream name without python prefix/suffix
//!       |
//!       optional runtime version ("2", "3", "26"), empty = default runtime
//! ```
//!
//! ## Conversion Rules
//!
//! 1. **Dots** become dashes (`zope.interface` -> `zope-interface`)
//! 2. **Prefix** `python{digits}-` is stripped (matched on the raw name)
//! 3. **Suffix** `-python{digits}` is stripped (matched case-insensitively, wins over 2)
//! 4. `python-` is prepended, lower-cased for Mageia
//! 5. Versioning policy is applied (see [`NameConvertor::rpm_versioned_name`])
//!
//! ## Examples
//!
//! | Input | version | Output (default version "2") |
//! |-------|---------|------------------------------|
//! | `foo` | - | `python-foo` |
//! | `python3-foo` | - | `python-foo` |
//! | `foo-python3` | - | `python-foo` |
//! | `foo.bar` | - | `python-foo-bar` |
//! | `foo` | `3` | `python3-foo` |
//! | `foo` | `2` | `python-foo` |
//!
//! # Usage
//!
//! ```ignore
//! use rpmname_lib::name::NameConvertor;
//!
//! let conv = NameConvertor::new("fedora");
//! assert_eq!(conv.rpm_name("Jinja2", None), "python-Jinja2");
//! assert_eq!(conv.rpm_name("Jinja2", Some("3")), "python3-Jinja2");
//! ```

use log::debug;
use regex::{NoExpand, Regex};
use std::sync::OnceLock;

/// Distribution that expects lower-cased package names.
pub const MAGEIA: &str = "mageia";

/// Default target distribution.
pub const DEFAULT_DISTRO: &str = "fedora";

/// Runtime version that needs no number in the package name.
pub const DEFAULT_PYTHON_VERSION: &str = "2";

/// Base name of the Python development headers package, never renamed.
const DEVEL: &str = "devel";

/// `python{digits}-{rest}` at the start of a name.
fn prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^python(\d*|)-(.*)").expect("static regex"))
}

/// `{rest}-python{digits}` at the end of a (lower-cased) name.
fn suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(.*)-(python)(\d*|)$").expect("static regex"))
}

/// Comparison key for package names: lower-cased, `-` replaced by `_`.
///
/// Only used for equality checks, never stored as a result.
pub fn canonical_form(name: &str) -> String {
    name.to_lowercase().replace('-', "_")
}

/// Converts Python package names to RPM package names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameConvertor {
    /// Target distribution (e.g. "fedora", "mageia")
    pub distro: String,

    /// Runtime version treated as "no number needed"
    pub default_python_version: String,
}

impl NameConvertor {
    /// Create a convertor for `distro` with the built-in default runtime version.
    pub fn new(distro: impl Into<String>) -> Self {
        Self::with_default_version(distro, DEFAULT_PYTHON_VERSION)
    }

    /// Create a convertor with an explicit default runtime version.
    pub fn with_default_version(
        distro: impl Into<String>,
        default_python_version: impl Into<String>,
    ) -> Self {
        Self {
            distro: distro.into(),
            default_python_version: default_python_version.into(),
        }
    }

    /// Build a convertor from loaded settings.
    pub fn from_settings(settings: &crate::config::Settings) -> Self {
        Self::with_default_version(&settings.distro, &settings.default_python_version)
    }

    /// Convert `name` to an RPM package name, optionally for a specific
    /// runtime `version`.
    pub fn rpm_name(&self, name: &str, version: Option<&str>) -> String {
        debug!("Converting name: {} to rpm name", name);
        let mut rpmized = format!("python-{}", self.base_name(name));

        if self.distro == MAGEIA {
            rpmized = rpmized.to_lowercase();
        }
        debug!("Rpmized name of {}: {}", name, rpmized);

        self.rpm_versioned_name(&rpmized, version, false)
    }

    /// Remove python prefixes or suffixes from `name` if present.
    ///
    /// ```text
    /// "python3-foo" -> "foo"
    /// "foo-python3" -> "foo"
    /// "Foo-Python"  -> "foo"   (suffix match works on the lower-cased name)
    /// "foo.bar"     -> "foo-bar"
    /// ```
    pub fn base_name(&self, name: &str) -> String {
        let mut base = name.replace('.', "-");

        if let Some(caps) = prefix_re().captures(name) {
            base = caps[2].to_string();
        }

        let lower = name.to_lowercase();
        if let Some(caps) = suffix_re().captures(&lower) {
            base = caps[1].to_string();
        }

        base
    }

    /// Apply the versioning policy to an already converted `name`.
    ///
    /// Without a version, or with the default version (unless
    /// `default_number` forces a number), any `python{digits}-` prefix is
    /// collapsed to `python-`. `python{digits}-devel` is left untouched so
    /// `python2-devel` never becomes `python-devel`.
    ///
    /// With any other version the prefix digits are rewritten, or a
    /// `python{version}-` prefix is prepended:
    ///
    /// ```text
    /// ("python-foo", "26") -> "python26-foo"
    /// ("pyfoo", "3")       -> "python3-pyfoo"   (when "3" is not the default)
    /// ```
    pub fn rpm_versioned_name(
        &self,
        name: &str,
        version: Option<&str>,
        default_number: bool,
    ) -> String {
        let version = version.unwrap_or("");

        if version.is_empty() || (version == self.default_python_version && !default_number) {
            return match prefix_re().captures(name) {
                Some(caps) if &caps[2] != DEVEL => format!("python-{}", &caps[2]),
                _ => name.to_string(),
            };
        }

        if prefix_re().is_match(name) {
            let prefix = format!("python{}-", version);
            versioned_prefix_re()
                .replace(name, NoExpand(&prefix))
                .into_owned()
        } else {
            format!("python{}-{}", version, name)
        }
    }
}

impl Default for NameConvertor {
    fn default() -> Self {
        Self::new(DEFAULT_DISTRO)
    }
}

/// `python{digits}-` prefix only, for in-place version rewriting.
fn versioned_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^python(\d*|)-").expect("static regex"))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn conv() -> NameConvertor {
        NameConvertor::with_default_version("fedora", "2")
    }

    // -------------------------------------------------------------------------
    // base_name
    // -------------------------------------------------------------------------

    #[test]
    fn base_name_prefix() {
        assert_eq!(conv().base_name("python3-foo"), "foo");
        assert_eq!(conv().base_name("python-foo"), "foo");
        assert_eq!(conv().base_name("python26-foo"), "foo");
    }

    #[test]
    fn base_name_suffix() {
        assert_eq!(conv().base_name("foo-python3"), "foo");
        assert_eq!(conv().base_name("foo-python"), "foo");
    }

    #[test]
    fn base_name_suffix_is_case_insensitive() {
        assert_eq!(conv().base_name("Foo-Python3"), "foo");
    }

    #[test]
    fn base_name_dots() {
        assert_eq!(conv().base_name("foo.bar"), "foo-bar");
        assert_eq!(conv().base_name("zope.interface"), "zope-interface");
    }

    #[test]
    fn base_name_prefix_keeps_dots() {
        // Prefix result replaces the dotted fallback entirely
        assert_eq!(conv().base_name("python-foo.bar"), "foo.bar");
    }

    #[test]
    fn base_name_suffix_overrides_prefix() {
        assert_eq!(conv().base_name("python3-foo-python2"), "python3-foo");
    }

    #[test]
    fn base_name_no_match() {
        assert_eq!(conv().base_name("Jinja2"), "Jinja2");
        assert_eq!(conv().base_name("pythonic"), "pythonic");
        assert_eq!(conv().base_name(""), "");
    }

    // -------------------------------------------------------------------------
    // rpm_versioned_name
    // -------------------------------------------------------------------------

    #[test]
    fn versioned_no_version() {
        assert_eq!(conv().rpm_versioned_name("python-foo", None, false), "python-foo");
        assert_eq!(conv().rpm_versioned_name("python3-foo", None, false), "python-foo");
        assert_eq!(conv().rpm_versioned_name("python3-foo", Some(""), false), "python-foo");
        assert_eq!(conv().rpm_versioned_name("foo", None, false), "foo");
    }

    #[test]
    fn versioned_devel_guard() {
        assert_eq!(conv().rpm_versioned_name("python2-devel", Some("2"), false), "python2-devel");
        assert_eq!(conv().rpm_versioned_name("python2-devel", None, false), "python2-devel");
        // Non-default version rewrites digits, which lands on the same name
        let conv3 = NameConvertor::with_default_version("fedora", "3");
        assert_eq!(conv3.rpm_versioned_name("python2-devel", Some("2"), false), "python2-devel");
    }

    #[test]
    fn versioned_rewrites_prefix() {
        assert_eq!(conv().rpm_versioned_name("python-foo", Some("3"), false), "python3-foo");
        assert_eq!(conv().rpm_versioned_name("python-foo", Some("26"), false), "python26-foo");
        assert_eq!(conv().rpm_versioned_name("python3-foo", Some("34"), false), "python34-foo");
    }

    #[test]
    fn versioned_prepends_prefix() {
        assert_eq!(conv().rpm_versioned_name("pyfoo", Some("3"), false), "python3-pyfoo");
    }

    #[test]
    fn versioned_default_version() {
        assert_eq!(conv().rpm_versioned_name("python2-foo", Some("2"), false), "python-foo");
        assert_eq!(conv().rpm_versioned_name("python-foo", Some("2"), true), "python2-foo");
    }

    #[test]
    fn versioned_prefix_with_dollar() {
        assert_eq!(conv().rpm_versioned_name("python-$foo", Some("3"), false), "python3-$foo");
    }

    // -------------------------------------------------------------------------
    // rpm_name
    // -------------------------------------------------------------------------

    #[test]
    fn rpm_name_basic() {
        assert_eq!(conv().rpm_name("foo", None), "python-foo");
        assert_eq!(conv().rpm_name("Jinja2", None), "python-Jinja2");
        assert_eq!(conv().rpm_name("python-foo", None), "python-foo");
        assert_eq!(conv().rpm_name("foo-python", None), "python-foo");
        assert_eq!(conv().rpm_name("foo.bar", None), "python-foo-bar");
    }

    #[test]
    fn rpm_name_versions() {
        assert_eq!(conv().rpm_name("foo", Some("3")), "python3-foo");
        assert_eq!(conv().rpm_name("foo", Some("2")), "python-foo");
        assert_eq!(conv().rpm_name("python3-foo", Some("35")), "python35-foo");
    }

    #[test]
    fn rpm_name_mageia_lowercases() {
        let mageia = NameConvertor::with_default_version(MAGEIA, "2");
        assert_eq!(mageia.rpm_name("Jinja2", None), "python-jinja2");
        assert_eq!(mageia.rpm_name("Jinja2", Some("3")), "python3-jinja2");
    }

    #[test]
    fn rpm_name_idempotent() {
        for name in ["python-foo", "python-Jinja2", "python-foo-bar", "python-devel"] {
            let once = conv().rpm_name(name, None);
            assert_eq!(conv().rpm_name(&once, None), once);
        }
    }

    #[test]
    fn canonical_form_equality() {
        assert_eq!(canonical_form("Foo-Bar"), "foo_bar");
        assert_eq!(canonical_form("foo_bar"), "foo_bar");
        assert_eq!(canonical_form("Foo-Bar"), canonical_form("foo_bar"));
    }

    #[test]
    fn default_convertor() {
        let c = NameConvertor::default();
        assert_eq!(c.distro, DEFAULT_DISTRO);
        assert_eq!(c.default_python_version, DEFAULT_PYTHON_VERSION);
        assert_eq!(c.rpm_name("foo", Some("2")), "python-foo");
        assert_eq!(c.rpm_name("foo", Some("3")), "python3-foo");
    }

    #[test]
    fn default_convertor_documented_examples() {
        let c = NameConvertor::default();
        assert_eq!(c.base_name("python3-foo"), "foo");
        assert_eq!(c.base_name("foo-python3"), "foo");
        assert_eq!(c.base_name("foo.bar"), "foo-bar");
        assert_eq!(c.rpm_versioned_name("python-foo", None, false), "python-foo");
        assert_eq!(c.rpm_versioned_name("python2-devel", Some("2"), false), "python2-devel");
        assert_eq!(c.rpm_versioned_name("python-foo", Some("3"), false), "python3-foo");
        assert_eq!(c.rpm_versioned_name("pyfoo", Some("3"), false), "python3-pyfoo");
        let once = c.rpm_name("python-foo", None);
        assert_eq!(c.rpm_name(&once, None), once);
    }
}

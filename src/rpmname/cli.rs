//! CLI definitions for rpmname command.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;
use std::path::PathBuf;

/// rpmname - Python to RPM package names
#[derive(Parser)]
#[command(name = "rpmname")]
#[command(author, version)]
#[command(help_template = "{about-section}\n{usage-heading} {usage}\n\n{all-args}\n\n{after-help}")]
#[command(about = "rpmname - Python to RPM package name conversion.\n\n\
    Converts PyPI package names to distribution package names and checks\n\
    them against the packages a distribution actually ships.\n\n\
    EXAMPLES:\n\
    \x20 rpmname convert Jinja2           python-Jinja2\n\
    \x20 rpmname convert -p 3 foo.bar     python3-foo-bar\n\
    \x20 rpmname base python3-foo         foo\n\
    \x20 rpmname resolve pyyaml -p 3      Look up the name in dnf repositories\n\
    \x20 rpmname venv-diff before after   Show what a package installed")]
#[command(after_help = "CONFIG:\n\
    \x20 Settings are read from --config, $RPMNAME_CONFIG or\n\
    \x20 <config dir>/rpmname/config.toml. $RPMNAME_DISTRO and\n\
    \x20 $RPMNAME_PYTHON_VERSION override the file. $RPMNAME_LOG takes\n\
    \x20 an env_logger filter (e.g. rpmname_lib::catalog=trace).")]
pub struct Cli {
    /// Verbosity: -v (info), -vv (debug), -vvv (trace)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log to file (default: <cache dir>/rpmname/rpmname.log)
    #[arg(short = 'l', long = "log", global = true)]
    pub log_file: Option<Option<PathBuf>>,

    /// Settings file
    #[arg(short = 'c', long = "config", global = true)]
    pub cfg: Option<PathBuf>,

    /// Target distribution (overrides settings)
    #[arg(short = 'd', long, global = true)]
    pub distro: Option<String>,

    /// Runtime version needing no number in names (overrides settings)
    #[arg(long = "default-python", global = true)]
    pub default_python: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert Python package names to RPM names
    Convert {
        /// Package names
        #[arg(required = true)]
        names: Vec<String>,
        /// Runtime version (e.g. 2, 3, 36)
        #[arg(short = 'p', long = "python")]
        python_version: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply the versioning policy to an RPM name
    Versioned {
        /// RPM package name
        name: String,
        /// Runtime version
        #[arg(short = 'p', long = "python")]
        python_version: Option<String>,
        /// Keep the number even for the default runtime version
        #[arg(long)]
        default_number: bool,
    },

    /// Strip python prefixes and suffixes from names
    Base {
        /// Package names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Convert a name and check it against the package catalog
    Resolve(CatalogArgs),

    /// Show which name variants exist in the package catalog
    Variants(CatalogArgs),

    /// Compare two virtualenv trees
    #[command(name = "venv-diff")]
    VenvDiff {
        /// Virtualenv before installation
        before: PathBuf,
        /// Virtualenv after installation
        after: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        shell: CompletionShell,
    },
}

/// Arguments shared by catalog-backed commands.
#[derive(Args)]
pub struct CatalogArgs {
    /// Package name
    pub name: String,
    /// Runtime version
    #[arg(short = 'p', long = "python")]
    pub python_version: Option<String>,
    /// Read catalog names from file (one per line)
    #[arg(long = "catalog-file", conflicts_with = "catalog_cmd")]
    pub catalog_file: Option<PathBuf>,
    /// Command printing catalog names (default: dnf repoquery)
    #[arg(long = "catalog-cmd")]
    pub catalog_cmd: Option<String>,
    /// resolve: print the plain conversion when nothing in the catalog matches
    #[arg(long)]
    pub fallback: bool,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

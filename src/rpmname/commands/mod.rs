//! Command implementations for rpmname CLI.

mod convert;
mod resolve;
mod venv_diff;

pub use convert::{cmd_base, cmd_convert, cmd_versioned};
pub use resolve::{cmd_resolve, cmd_variants};
pub use venv_diff::cmd_venv_diff;

//! Virtualenv delta command.

use rpmname_lib::{DirsContent, NameConvertor, Result, VirtualEnv};
use serde_json::json;
use std::path::Path;
use std::process::ExitCode;

/// Print modules and scripts present in `after` but not in `before`.
pub fn cmd_venv_diff(
    conv: NameConvertor,
    python_version: &str,
    before: &Path,
    after: &Path,
    json: bool,
) -> Result<ExitCode> {
    let before_content = DirsContent::scan(before)?;
    let after_content = DirsContent::scan(after)?;

    let venv = VirtualEnv::new(after, conv, python_version);
    let (packages, scripts) = venv.dirs_difference(&before_content, &after_content);

    if json {
        println!("{}", json!({ "packages": packages, "scripts": scripts }));
    } else {
        println!("Packages:");
        for pkg in &packages {
            println!("  - {} ({})", pkg, venv.rpm_name(pkg));
        }
        println!("Scripts:");
        for script in &scripts {
            println!("  - {}", script);
        }
    }

    Ok(ExitCode::SUCCESS)
}

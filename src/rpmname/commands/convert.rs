//! Plain name conversion commands.

use rpmname_lib::{NameConvertor, Result};
use serde_json::json;
use std::io::Write;
use std::process::ExitCode;

/// Convert each name and print the RPM name.
pub fn cmd_convert(
    conv: &NameConvertor,
    names: &[String],
    python_version: Option<&str>,
    json: bool,
) -> Result<ExitCode> {
    let converted: Vec<(&str, String)> = names
        .iter()
        .map(|name| (name.as_str(), conv.rpm_name(name, python_version)))
        .collect();

    let mut out = std::io::stdout().lock();
    if json {
        let items: Vec<_> = converted
            .iter()
            .map(|(name, rpm)| json!({ "name": name, "rpm_name": rpm }))
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&items)?)?;
    } else if let [(_, rpm)] = converted.as_slice() {
        writeln!(out, "{}", rpm)?;
    } else {
        for (name, rpm) in &converted {
            writeln!(out, "{} -> {}", name, rpm)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Apply the versioning policy to an RPM name.
pub fn cmd_versioned(
    conv: &NameConvertor,
    name: &str,
    python_version: Option<&str>,
    default_number: bool,
) -> Result<ExitCode> {
    let versioned = conv.rpm_versioned_name(name, python_version, default_number);
    writeln!(std::io::stdout().lock(), "{}", versioned)?;
    Ok(ExitCode::SUCCESS)
}

/// Print the base name of each package.
pub fn cmd_base(conv: &NameConvertor, names: &[String]) -> Result<ExitCode> {
    let mut out = std::io::stdout().lock();
    for name in names {
        writeln!(out, "{}", conv.base_name(name))?;
    }
    Ok(ExitCode::SUCCESS)
}

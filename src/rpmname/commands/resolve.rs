//! Catalog-backed commands.

use crate::cli::CatalogArgs;
use rpmname_lib::config::Settings;
use rpmname_lib::{Catalog, CatalogBackend, CatalogNameConvertor, NameConvertor, Result};
use serde_json::json;
use std::process::ExitCode;

/// Convert a name and check it against the catalog.
pub fn cmd_resolve(conv: NameConvertor, settings: &Settings, args: &CatalogArgs) -> Result<ExitCode> {
    let checked = CatalogNameConvertor::new(conv, open_catalog(settings, args)?);
    let resolution = checked.resolve(&args.name, args.python_version.as_deref(), args.fallback)?;

    if args.json {
        let out = json!({
            "name": args.name,
            "rpm_name": resolution.name(),
            "source": resolution.source(),
        });
        println!("{}", out);
    } else if let Some(rpm_name) = resolution.name() {
        println!("{}", rpm_name);
    }

    if resolution.name().is_some() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("No package matching {} found in catalog", args.name);
        Ok(ExitCode::FAILURE)
    }
}

/// Show every name variant and its catalog match.
pub fn cmd_variants(conv: NameConvertor, settings: &Settings, args: &CatalogArgs) -> Result<ExitCode> {
    let checked = CatalogNameConvertor::new(conv, open_catalog(settings, args)?);
    let variants = checked.name_variants(&args.name, args.python_version.as_deref())?;

    if args.json {
        let slots: serde_json::Map<String, serde_json::Value> = variants
            .iter()
            .map(|(variant, found)| (variant.to_string(), json!(found)))
            .collect();
        let out = json!({
            "name": args.name,
            "variants": slots,
            "best_matching": variants.best_matching(),
        });
        println!("{}", out);
    } else {
        for (variant, found) in variants.iter() {
            println!(
                "{:<16} {:<28} {}",
                variant.as_str(),
                variants.candidate(variant),
                found.unwrap_or("-")
            );
        }
        println!("best: {}", variants.best_matching().unwrap_or("-"));
    }

    Ok(ExitCode::SUCCESS)
}

fn open_catalog(settings: &Settings, args: &CatalogArgs) -> Result<Box<dyn Catalog>> {
    let backend = CatalogBackend::select(
        &settings.catalog,
        args.catalog_file.as_deref(),
        args.catalog_cmd.as_deref(),
    );
    Ok(backend.open()?)
}

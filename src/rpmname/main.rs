//! rpmname CLI - Command-line interface for Python to RPM name conversion.
//!
//! # Commands
//!
//! - `convert <names...>` - Convert names to RPM names
//! - `versioned <name>` - Apply the versioning policy to an RPM name
//! - `base <names...>` - Strip python prefixes/suffixes
//! - `resolve <name>` - Convert and check against the package catalog
//! - `variants <name>` - Show catalog matches for every name variant
//! - `venv-diff <before> <after>` - Compare two virtualenv trees

mod cli;
mod commands;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Commands};
use log::{debug, error, info, trace, LevelFilter};
use rpmname_lib::config::{self, Settings};
use rpmname_lib::{NameConvertor, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Environment variable with an `env_logger` filter overriding `-v`.
const LOG_ENV: &str = "RPMNAME_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, &cli.log_file);
    info!("rpmname v{} starting", rpmname_lib::VERSION);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let settings = effective_settings(config::init(cli.cfg.clone())?, &cli);
    trace!(
        "Settings: {:?} (from {:?})",
        settings,
        config::config_path()
    );

    // Show help if no command
    let Some(command) = cli.command else {
        print_usage();
        return Ok(ExitCode::SUCCESS);
    };

    let conv = NameConvertor::from_settings(&settings);

    match command {
        Commands::Convert {
            names,
            python_version,
            json,
        } => {
            debug!("cmd: convert names={:?} python={:?}", names, python_version);
            commands::cmd_convert(&conv, &names, python_version.as_deref(), json)
        }
        Commands::Versioned {
            name,
            python_version,
            default_number,
        } => {
            debug!("cmd: versioned name={} python={:?}", name, python_version);
            commands::cmd_versioned(&conv, &name, python_version.as_deref(), default_number)
        }
        Commands::Base { names } => {
            debug!("cmd: base names={:?}", names);
            commands::cmd_base(&conv, &names)
        }
        Commands::Resolve(args) => {
            debug!("cmd: resolve name={} python={:?}", args.name, args.python_version);
            commands::cmd_resolve(conv, &settings, &args)
        }
        Commands::Variants(args) => {
            debug!("cmd: variants name={} python={:?}", args.name, args.python_version);
            commands::cmd_variants(conv, &settings, &args)
        }
        Commands::VenvDiff {
            before,
            after,
            json,
        } => {
            debug!("cmd: venv-diff {} {}", before.display(), after.display());
            let python_version = settings.default_python_version.clone();
            commands::cmd_venv_diff(conv, &python_version, &before, &after, json)
        }
        Commands::Completions { shell } => Ok(cmd_completions(shell)),
    }
}

/// Loaded settings with CLI overrides applied.
fn effective_settings(loaded: &Settings, cli: &Cli) -> Settings {
    let mut settings = loaded.clone();
    if let Some(distro) = &cli.distro {
        settings.distro = distro.clone();
    }
    if let Some(version) = &cli.default_python {
        settings.default_python_version = version.clone();
    }
    settings
}

/// Level for a `-v` count: warn, info, debug, then trace.
fn level_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// `--log` without a file: `<cache dir>/rpmname/rpmname.log`, else cwd.
fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .map(|d| d.join("rpmname"))
        .filter(|d| std::fs::create_dir_all(d).is_ok())
        .map(|d| d.join("rpmname.log"))
        .unwrap_or_else(|| PathBuf::from("rpmname.log"))
}

/// Set up `env_logger`; `$RPMNAME_LOG` refines the `-v` level.
fn init_logging(verbosity: u8, log_file: &Option<Option<PathBuf>>) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_filter(verbosity))
        .parse_env(env_logger::Env::new().filter(LOG_ENV))
        .format(|buf, record| {
            writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args())
        });

    if let Some(requested) = log_file {
        let log_path = requested.clone().unwrap_or_else(default_log_path);
        match OpenOptions::new().create(true).append(true).open(&log_path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
                eprintln!("Logging to: {}", log_path.display());
            }
            Err(e) => eprintln!("Cannot open log {}: {}, logging to stderr", log_path.display(), e),
        }
    }

    builder.init();
}

/// Print usage help.
fn print_usage() {
    let _ = Cli::command().print_long_help();
}

fn cmd_completions(shell: clap_complete::Shell) -> ExitCode {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "rpmname", &mut std::io::stdout());
    ExitCode::SUCCESS
}

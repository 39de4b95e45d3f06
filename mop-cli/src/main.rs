//! Mop CLI - Command line interface
//!
//! Project-based loading - all configuration from project.json

use clap::Parser;
use mop_api::{config_or_default, init, ErrorReport, Loader, Runtime};
use mop_cache::DirectoryArchives;
use std::path::PathBuf;
use std::process;

mod config;
mod logging;
mod project;

use crate::config::LogConfig;
use crate::logging::{LogFormat, TARGET_CLI};
use crate::project::{answer, build_run_config, read_project, resolve_archive_root};

#[derive(Parser)]
#[command(
    name = "mop",
    about = "Load compiled class and method definitions and answer type queries",
    version = "0.1.0"
)]
struct Cli {
    /// Project file path (default: ./project.json)
    #[arg(value_name = "PROJECT", default_value = "project.json")]
    project: PathBuf,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Also append logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let project = match read_project(&cli.project) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let log_config = match LogConfig::from_project(project.log_level.as_deref(), &project.log) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    if let Err(e) = logging::init_with_file(&log_config, cli.log_format, cli.log_file.as_ref()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let archive_root = resolve_archive_root(&cli.project, &project.archive_root);
    if init(build_run_config(&project)).is_err() {
        tracing::warn!(target: TARGET_CLI, "run configuration already initialized");
    }
    let run_config = config_or_default();
    tracing::info!(
        target: TARGET_CLI,
        root = %archive_root.display(),
        units = project.units.len(),
        "loading project"
    );

    let archives = DirectoryArchives::with_config(archive_root, run_config.cache.clone());
    let loader = Loader::new(archives, run_config.clone());
    if let Err(e) = loader.load_all(project.units.as_slice()) {
        print_error(&e.to_report(), cli.log_format);
        process::exit(1);
    }

    print_classes(loader.runtime());

    let mut failed = false;
    for query in &project.queries {
        match answer(loader.runtime(), query) {
            Ok(line) => println!("{}", line),
            Err(e) => {
                eprintln!("Error: query {}: {}", query.value, e);
                failed = true;
            }
        }
    }
    if failed {
        process::exit(1);
    }
}

/// Print every class the project defined or referenced, in name order
fn print_classes(runtime: &Runtime) {
    for name in runtime.registry().names() {
        let Some(class) = runtime.find_class(&name) else {
            continue;
        };
        if class.snapshot().is_sealed() {
            continue;
        }
        println!("{}", class.describe());
    }
}

fn print_error(report: &ErrorReport, format: LogFormat) {
    match format {
        LogFormat::Json => eprintln!("{}", report.to_json()),
        _ => eprintln!("Error: {}", report),
    }
}

mod commands;
mod error;

use anyhow::{Context as _, Result};
use clap::Parser;
use phonedb_config::{self as config, AppConfig, DatabaseConfig};
use phonedb_core::domain::PhoneRecord;
use phonedb_store::{paths, Store, StoreOptions};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{print_json, reconcile, seed, Context};
use crate::error::{exit_code_for, report_error};

#[derive(Debug, Parser)]
#[command(
    name = "phonedb",
    version,
    about = "Seed a phone number table and normalize it"
)]
struct Cli {
    /// (Re)create the database on startup
    #[arg(short = 'r', long = "reset")]
    reset: bool,
    /// Run the normalization pass and roll it back
    #[arg(long)]
    dry_run: bool,
    #[arg(long)]
    db_path: Option<PathBuf>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    json: bool,
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct RunReport {
    seed: seed::SeedReport,
    reconcile: reconcile::ReconcileSummary,
    records: Vec<PhoneRecord>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    let result = config::load(cli.config.clone())
        .with_context(|| "load config")
        .and_then(|app_config| run(cli, app_config));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli, app_config: AppConfig) -> Result<()> {
    let Cli {
        reset,
        dry_run,
        db_path,
        config: config_path,
        json,
        verbose,
    } = cli;

    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) if path.exists() => debug!(path = %path.display(), "config resolved"),
            Ok(path) => debug!(path = %path.display(), "config missing, using defaults"),
            Err(err) => debug!(error = %err, "config unavailable"),
        }
    }

    let db_path =
        resolve_db_path(db_path, &app_config.database).with_context(|| "resolve database path")?;
    debug!(path = %db_path.display(), "database path resolved");

    if reset {
        Store::destroy(&db_path)
            .with_context(|| format!("reset database {}", db_path.display()))?;
        debug!(path = %db_path.display(), "database removed");
    }

    let options = StoreOptions {
        busy_timeout_ms: app_config.database.busy_timeout_ms,
    };
    let store = Store::open(&db_path, &options)
        .with_context(|| format!("open database {}", db_path.display()))?;
    store.migrate().with_context(|| "create phone table")?;

    let ctx = Context {
        store: &store,
        json,
        config: &app_config,
    };

    let seeded = seed::seed(&ctx)?;
    let reconciled = reconcile::reconcile(&ctx, reconcile::ReconcileArgs { dry_run })?;

    if json {
        let records = store.phones().list().with_context(|| "list phones")?;
        print_json(&RunReport {
            seed: seeded,
            reconcile: reconciled,
            records,
        })?;
    }
    Ok(())
}

fn resolve_db_path(custom: Option<PathBuf>, database: &DatabaseConfig) -> Result<PathBuf> {
    match custom.or_else(|| database.path.clone()) {
        Some(path) => {
            paths::ensure_parent_dir(&path)?;
            Ok(path)
        }
        None => Ok(paths::db_path_for(&database.name)?),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}

//! colbind - bind, order and deduplicate delimited tables
//!
//! This tool loads CSV files into in-memory columnar tables, runs one table
//! operation on them and prints the result as CSV.
//!
//! # Program Flow
//!
//! 1. Parse command-line arguments
//! 2. Build the configuration and install logging
//! 3. Load the input files
//! 4. Run the requested operation
//! 5. Write the result to stdout

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;

use colbind::cli::{self, Command};
use colbind::config::AppConfig;
use colbind::csv_handler::CsvHandler;
use colbind::engine::Engine;
use colbind::table::Table;

/// Main entry point for the colbind utility
///
/// # Returns
/// * `Ok(())` if all operations completed successfully
/// * `Err` with context if any step fails
fn main() -> Result<()> {
    // Step 1: Parse command-line arguments
    let args = cli::parse_args()?;

    // Step 2: Centralized configuration, then logging at the matching level
    let config = AppConfig::new(
        args.verbose,
        args.field_separator.clone(),
        args.factor.clone(),
        args.command.group_by().to_vec(),
    );
    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();
    debug!("Arguments: {:?}", args);

    let handler = CsvHandler::new(config.field_separator(), config.factor_columns().to_vec())
        .context("Invalid field separator")?;
    let engine = Engine::from_config(&config);

    // Steps 3 and 4: load inputs and run the operation
    let result = match &args.command {
        Command::Rbind { files } => {
            let tables = load_all(&handler, files)?;
            engine.row_bind(&tables).context("Failed to bind rows")?
        }
        Command::Cbind { files } => {
            let tables = load_all(&handler, files)?;
            engine.column_bind(&tables).context("Failed to bind columns")?
        }
        Command::Arrange { file, keys, .. } => {
            let table = load_grouped(&handler, &engine, &config, file)?;
            let keys = keys
                .iter()
                .map(|spec| cli::parse_key_spec(spec))
                .collect::<Result<Vec<_>, _>>()
                .context("Failed to parse ordering keys")?;
            let keys: Vec<(&str, _)> = keys
                .iter()
                .map(|(name, direction)| (name.as_str(), *direction))
                .collect();
            engine
                .order_by_names(&table, &keys)
                .context("Failed to arrange rows")?
        }
        Command::Distinct { file, .. } => {
            let table = load_grouped(&handler, &engine, &config, file)?;
            engine
                .distinct_rows(&table)
                .context("Failed to deduplicate rows")?
        }
    };

    debug!(
        "Result has {} rows and {} columns",
        result.row_count(),
        result.column_count()
    );

    // Step 5: Output
    handler
        .write_table(&result, io::stdout().lock())
        .context("Failed to write result")?;

    Ok(())
}

/// Load every file in order
fn load_all(handler: &CsvHandler, files: &[PathBuf]) -> Result<Vec<Table>> {
    files
        .iter()
        .map(|path| {
            handler
                .load_csv(path)
                .with_context(|| format!("Failed to load file: {}", path.display()))
        })
        .collect()
}

/// Load one file and group it by the configured columns, if any
fn load_grouped(
    handler: &CsvHandler,
    engine: &Engine,
    config: &AppConfig,
    file: &Path,
) -> Result<Table> {
    let table = handler
        .load_csv(file)
        .with_context(|| format!("Failed to load file: {}", file.display()))?;
    if config.group_by().is_empty() {
        return Ok(table);
    }
    let vars: Vec<&str> = config.group_by().iter().map(String::as_str).collect();
    engine
        .group_by(&table, &vars)
        .context("Failed to group rows")
}

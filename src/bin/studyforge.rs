//! StudyForge CLI Binary
//!
//! Command-line interface for generating study aids.

use clap::Parser;
use std::process;
use studyforge::cli::{Cli, Commands, RunContext};
use studyforge::config::ConfigLoader;
use studyforge::logging::{init_logging, resolve_log_file_path, LoggingConfig};
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("StudyForge CLI starting");

    // init must work even when the existing config does not load
    if let Commands::Init { ref path, force } = cli.command {
        match studyforge::cli::run_init(path.clone(), force) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                error!("Init failed: {}", e);
                eprintln!("{}", studyforge::cli::map_error(&e));
                process::exit(1);
            }
        }
        return;
    }

    let context = match RunContext::new(cli.config.clone(), cli.offline) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", studyforge::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", studyforge::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Logging settings for this run. Flags beat the resolved config file; a
/// config that fails to load leaves the logging defaults in place.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut logging = match ConfigLoader::resolve(cli.config.as_deref()) {
        Ok(config) => config.logging,
        Err(_) => LoggingConfig::default(),
    };

    logging.enabled &= !cli.quiet;
    if cli.verbose {
        logging.level = "debug".to_string();
        // file-only output would hide --verbose from the terminal
        if logging.output == "file" {
            logging.output = "file+stderr".to_string();
        }
    }
    logging.level = cli.log_level.clone().unwrap_or(logging.level);
    logging.format = cli.log_format.clone().unwrap_or(logging.format);
    logging.output = cli.log_output.clone().unwrap_or(logging.output);

    logging.file = if logging.enabled && logging.uses_file() {
        Some(resolve_log_file_path(cli.log_file.clone(), logging.file.take()))
    } else {
        cli.log_file.clone().or(logging.file)
    };

    logging
}

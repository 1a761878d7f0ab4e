//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::constants::APP_NAME;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Parts catalog JSON file
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Web server host
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// Web server port
    #[arg(long, value_name = "PORT")]
    port: Option<u16>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: Option<String>,
    catalog: CatalogOutput,
    server: ServerOutput,
}

#[derive(Serialize, Debug)]
struct CatalogOutput {
    path: Option<String>,
    source: &'static str,
}

#[derive(Serialize, Debug)]
struct ServerOutput {
    host: String,
    port: u16,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        let output = ConfigOutput {
            config_file: Config::config_file_path()
                .ok()
                .map(|p| p.display().to_string()),
            catalog: CatalogOutput {
                path: config
                    .catalog
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string()),
                source: if config.catalog.path.is_some() {
                    "file"
                } else {
                    "built-in"
                },
            },
            server: ServerOutput {
                host: config.server.host.clone(),
                port: config.server.port,
            },
        };

        if self.json {
            print_json(&output)
        } else {
            output_human_readable(&output);
            Ok(())
        }
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.catalog.is_none() && self.host.is_none() && self.port.is_none() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --catalog, --host, or --port",
            ));
        }

        // Unvalidated so a stale catalog path can be replaced; the result is
        // validated again below before anything is written.
        let mut config = Config::read()
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;

        if let Some(path) = &self.catalog {
            // Reject catalogs that would fail on the next check
            crate::catalog::PartsCatalog::load(path)
                .map_err(|e| CliError::validation(format!("{e:#}")))?;
            config
                .set_catalog_path(path.clone())
                .map_err(|e| CliError::validation(e.to_string()))?;
        }

        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }

        if let Some(port) = self.port {
            config.server.port = port;
        }

        config.validate().map_err(|e| {
            CliError::validation(format!("{e} (configuration left unchanged)"))
        })?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(output: &ConfigOutput) {
    println!("{APP_NAME} Configuration");
    println!("========================");
    println!();

    if let Some(path) = &output.config_file {
        println!("Config file: {path}");
        println!();
    }

    println!("Catalog:");
    match &output.catalog.path {
        Some(path) => println!("  Path: {path}"),
        None => println!("  Path: (built-in catalog)"),
    }
    println!();

    println!("Server:");
    println!("  Host: {}", output.server.host);
    println!("  Port: {}", output.server.port);
    println!();
}

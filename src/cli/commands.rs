//! CLI command implementations
//!
//! Configuration is resolved once here and passed down by value; nothing
//! below this layer reads the environment.

use std::sync::Arc;

use serde::Serialize;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::Logger;
use crate::store::{DatabaseConfig, PgPatientStore};

use super::args::{Cli, Command, ConfigArgs};
use super::errors::{CliError, CliResult};

/// Fully resolved process configuration
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    pub http: HttpServerConfig,
    pub database: DatabaseConfig,
}

impl EffectiveConfig {
    fn validate(&self) -> CliResult<()> {
        if self.database.host.trim().is_empty() {
            return Err(CliError::config_error("database host must not be empty"));
        }
        if self.database.name.trim().is_empty() {
            return Err(CliError::config_error("database name must not be empty"));
        }
        if self.database.port == 0 {
            return Err(CliError::config_error("database port must be non-zero"));
        }
        if self.database.connect_timeout_secs == 0 {
            return Err(CliError::config_error(
                "database connect timeout must be at least 1 second",
            ));
        }
        if self.http.port == 0 {
            return Err(CliError::config_error("server port must be non-zero"));
        }
        Ok(())
    }
}

/// Resolve and validate configuration from parsed arguments
pub fn effective_config(args: &ConfigArgs) -> CliResult<EffectiveConfig> {
    let config = EffectiveConfig {
        http: args.http_config(),
        database: args.database_config(),
    };
    config.validate()?;
    Ok(config)
}

/// Main CLI entry point
///
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args())
}

/// Run the command selected on the command line
pub fn run_command(cli: Cli) -> CliResult<()> {
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&cli.config),
        Command::CheckConfig => check_config(&cli.config),
    }
}

/// Print the effective configuration as JSON
pub fn check_config(args: &ConfigArgs) -> CliResult<()> {
    let config = effective_config(args)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Start the HTTP server and block until it shuts down
pub fn serve(args: &ConfigArgs) -> CliResult<()> {
    let EffectiveConfig { http, database } = effective_config(args)?;

    let store = PgPatientStore::new(database);
    Logger::info("DATASTORE_CONFIGURED", &[("target", store.target())]);

    let server = HttpServer::with_config(http, Arc::new(store));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

//! CLI argument definitions using clap
//!
//! Every setting can come from a flag or its environment variable:
//! - medboard [serve]        start the HTTP server (default)
//! - medboard check-config   print the effective configuration and exit

use clap::{Args, Parser, Subcommand};

use crate::http_server::HttpServerConfig;
use crate::store::DatabaseConfig;

/// medboard - read-only analytics API over a patient records table
#[derive(Parser, Debug)]
#[command(name = "medboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP server
    Serve,

    /// Print the effective configuration (password redacted) and exit
    CheckConfig,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Datastore host
    #[arg(long, env = "DATABASE_HOST", default_value = "localhost", global = true)]
    pub db_host: String,

    /// Database name
    #[arg(long, env = "DATABASE_NAME", default_value = "healthcare", global = true)]
    pub db_name: String,

    /// Database user
    #[arg(long, env = "DATABASE_USER", default_value = "postgres", global = true)]
    pub db_user: String,

    /// Database password
    #[arg(
        long,
        env = "DATABASE_PASSWORD",
        default_value = "postgres",
        hide_env_values = true,
        hide_default_value = true,
        global = true
    )]
    pub db_password: String,

    /// Database port
    #[arg(long, env = "DATABASE_PORT", default_value_t = 5432, global = true)]
    pub db_port: u16,

    /// Seconds allowed for opening a datastore connection
    #[arg(long, env = "DATABASE_CONNECT_TIMEOUT", default_value_t = 5, global = true)]
    pub db_connect_timeout: u64,

    /// Address the HTTP server binds to
    #[arg(long, env = "MEDBOARD_HOST", default_value = "0.0.0.0", global = true)]
    pub host: String,

    /// Port the HTTP server binds to
    #[arg(long, env = "MEDBOARD_PORT", default_value_t = 8080, global = true)]
    pub port: u16,

    /// Allowed CORS origin (repeatable, comma separated in env); none allows any
    #[arg(
        long = "cors-origin",
        env = "MEDBOARD_CORS_ORIGINS",
        value_delimiter = ',',
        global = true
    )]
    pub cors_origins: Vec<String>,
}

impl ConfigArgs {
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            host: self.db_host.clone(),
            name: self.db_name.clone(),
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            port: self.db_port,
            connect_timeout_secs: self.db_connect_timeout,
        }
    }

    pub fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

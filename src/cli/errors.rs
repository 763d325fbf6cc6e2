//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero exit code.

use std::io;

use thiserror::Error;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Invalid configuration value
    ConfigError,
    /// I/O error (stdout, runtime)
    IoError,
    /// Server failed to start or crashed
    BootFailed,
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "MEDBOARD_CLI_CONFIG_ERROR",
            Self::IoError => "MEDBOARD_CLI_IO_ERROR",
            Self::BootFailed => "MEDBOARD_CLI_BOOT_FAILED",
        }
    }
}

/// Error raised while configuring or starting the service
#[derive(Debug, Error)]
pub enum CliError {
    #[error("MEDBOARD_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    #[error("MEDBOARD_CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    #[error("MEDBOARD_CLI_IO_ERROR: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("MEDBOARD_CLI_BOOT_FAILED: {0}")]
    BootFailed(String),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::BootFailed(msg.into())
    }

    pub fn code(&self) -> CliErrorCode {
        match self {
            Self::Config(_) => CliErrorCode::ConfigError,
            Self::Io(_) | Self::Json(_) => CliErrorCode::IoError,
            Self::BootFailed(_) => CliErrorCode::BootFailed,
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code().code()
    }

    /// The error text without the code prefix
    pub fn message(&self) -> String {
        match self {
            Self::Config(msg) | Self::BootFailed(msg) => msg.clone(),
            Self::Io(e) => e.to_string(),
            Self::Json(e) => format!("JSON error: {}", e),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

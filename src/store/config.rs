//! Datastore Configuration
//!
//! Connection parameters for the patients database. Built once at process
//! start and handed to the store by value.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize, Serializer};

/// PostgreSQL connection parameters
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Host name or address (default: "localhost")
    #[serde(default = "default_host")]
    pub host: String,

    /// Database name (default: "healthcare")
    #[serde(default = "default_name")]
    pub name: String,

    /// Role to connect as (default: "postgres")
    #[serde(default = "default_user")]
    pub user: String,

    /// Password for `user` (default: "postgres"); always redacted on output
    #[serde(default = "default_password", serialize_with = "redact")]
    pub password: String,

    /// Port (default: 5432)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds allowed for establishing a connection (default: 5)
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_name() -> String {
    "healthcare".to_string()
}

fn default_user() -> String {
    "postgres".to_string()
}

fn default_password() -> String {
    "postgres".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_connect_timeout_secs() -> u64 {
    5
}

const REDACTED: &str = "********";

fn redact<S: Serializer>(_: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(REDACTED)
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            name: default_name(),
            user: default_user(),
            password: default_password(),
            port: default_port(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl DatabaseConfig {
    /// Connection timeout as a `Duration`
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// `user@host:port/name`, safe to log
    pub fn display_target(&self) -> String {
        format!("{}@{}:{}/{}", self.user, self.host, self.port, self.name)
    }

    /// Build the driver configuration
    pub fn to_pg_config(&self) -> tokio_postgres::Config {
        let mut pg = tokio_postgres::Config::new();
        pg.host(&self.host)
            .dbname(&self.name)
            .user(&self.user)
            .password(&self.password)
            .port(self.port)
            .connect_timeout(self.connect_timeout());
        pg
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &REDACTED)
            .field("port", &self.port)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

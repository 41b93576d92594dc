//! Database connection settings.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the MySQL connection pool.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Server host name.
    #[serde(default = "DatabaseConfig::default_host")]
    pub host: String,

    /// Server port.
    #[serde(default = "DatabaseConfig::default_port")]
    pub port: u16,

    /// Login user.
    #[serde(default = "DatabaseConfig::default_user")]
    pub user: String,

    /// Login password.
    #[serde(default)]
    pub password: String,

    /// Schema to use.
    #[serde(default = "DatabaseConfig::default_database")]
    pub database: String,

    /// Maximum pooled connections.
    #[serde(default = "DatabaseConfig::default_pool_size")]
    pub pool_size: u32,

    /// How long to wait for a pooled connection, in seconds.
    #[serde(default = "DatabaseConfig::default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

impl DatabaseConfig {
    fn default_host() -> String {
        "localhost".to_string()
    }

    const fn default_port() -> u16 {
        3306
    }

    fn default_user() -> String {
        "root".to_string()
    }

    fn default_database() -> String {
        "employee_db".to_string()
    }

    const fn default_pool_size() -> u32 {
        5
    }

    const fn default_connect_timeout() -> u64 {
        10
    }

    /// Get the connect timeout as a `Duration`.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            user: Self::default_user(),
            password: String::new(),
            database: Self::default_database(),
            pool_size: Self::default_pool_size(),
            connect_timeout_seconds: Self::default_connect_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = DatabaseConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 3306);
        assert_eq!(config.user, "root");
        assert_eq!(config.database, "employee_db");
        assert_eq!(config.pool_size, 5);
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: DatabaseConfig =
            serde_json::from_str(r#"{"host": "db.internal", "password": "s3cret"}"#).unwrap();
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.password, "s3cret");
        assert_eq!(config.port, 3306);
        assert_eq!(config.pool_size, 5);
    }
}

use anyhow::{Context, Result};

use crate::storage::sqlite::DEFAULT_MAX_CONNECTIONS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite location, e.g. "sqlite:./url-shortener.db" or a plain file path
    pub storage_path: String,

    /// Host to bind the HTTP server to, e.g. "0.0.0.0"
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Upper bound on pooled database connections
    pub max_connections: u32,
}

impl AppConfig {
    /// Load configuration from environment variables (populated by dotenvy before this is called).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_path = lookup("STORAGE_PATH")
            .unwrap_or_else(|| "sqlite:./url-shortener.db".into())
            .trim()
            .to_owned();

        if storage_path.is_empty() {
            anyhow::bail!("STORAGE_PATH must not be empty");
        }

        let port = lookup("PORT")
            .unwrap_or_else(|| "8082".into())
            .parse::<u16>()
            .context("PORT must be a valid port number (1–65535)")?;

        let max_connections = match lookup("MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .context("MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            storage_path,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            max_connections,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.storage_path, "sqlite:./url-shortener.db");
        assert_eq!(config.bind_addr(), "0.0.0.0:8082");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = config_from(&[
            ("STORAGE_PATH", "/var/lib/shortener/store.db"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("MAX_CONNECTIONS", "4"),
        ])
        .unwrap();

        assert_eq!(config.storage_path, "/var/lib/shortener/store.db");
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.max_connections, 4);
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(config_from(&[("PORT", "not-a-port")]).is_err());
    }

    #[test]
    fn blank_storage_path_is_rejected() {
        assert!(config_from(&[("STORAGE_PATH", "   ")]).is_err());
    }
}

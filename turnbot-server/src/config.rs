//! Server configuration: listen address, log file, welcome text.
//! Loaded from env `PORT` (or `port`), `BIND_ADDRESS`, `LOG_FILE`, `WELCOME_TEXT`.

use anyhow::{Context, Result};
use std::env;

use handlers::DEFAULT_WELCOME_TEXT;

pub const DEFAULT_PORT: u16 = 3978;
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_LOG_FILE: &str = "logs/turnbot.log";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub bind_address: String,
    pub log_file: String,
    pub welcome_text: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
            welcome_text: DEFAULT_WELCOME_TEXT.to_string(),
        }
    }
}

impl ServerConfig {
    /// Loads from the environment; every value is optional, but a non-numeric port is an error.
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT").or_else(|_| env::var("port")) {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => DEFAULT_PORT,
        };
        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let welcome_text =
            env::var("WELCOME_TEXT").unwrap_or_else(|_| DEFAULT_WELCOME_TEXT.to_string());

        Ok(Self {
            port,
            bind_address,
            log_file,
            welcome_text,
        })
    }

    /// `bind_address:port`, as passed to the listener.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    raw.trim()
        .parse()
        .with_context(|| format!("PORT must be a port number, got {:?}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in ["PORT", "port", "BIND_ADDRESS", "LOG_FILE", "WELCOME_TEXT"] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.port, 3978);
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.log_file, "logs/turnbot.log");
        assert_eq!(config.welcome_text, "Hello and welcome!");
        assert_eq!(config.socket_addr(), "0.0.0.0:3978");
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        env::set_var("PORT", "8080");
        env::set_var("BIND_ADDRESS", "127.0.0.1");
        env::set_var("LOG_FILE", "/tmp/bot.log");
        env::set_var("WELCOME_TEXT", "Hi!");

        let config = ServerConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.port, 8080);
        assert_eq!(config.socket_addr(), "127.0.0.1:8080");
        assert_eq!(config.log_file, "/tmp/bot.log");
        assert_eq!(config.welcome_text, "Hi!");
    }

    #[test]
    #[serial]
    fn test_lowercase_port_fallback() {
        clear_env();
        env::set_var("port", "4000");
        let config = ServerConfig::from_env().unwrap();
        clear_env();
        assert_eq!(config.port, 4000);
    }

    #[test]
    #[serial]
    fn test_invalid_port_is_error() {
        clear_env();
        env::set_var("PORT", "not-a-port");
        let result = ServerConfig::from_env();
        clear_env();
        assert!(result.is_err());
    }
}

use anyhow::{Context, Result};
use std::env;

use crate::errors::{ErrorCode, HttpError};

pub const DEFAULT_MASKED_MESSAGE: &str = "An unknown error occurred.";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub mask: MaskConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// How server-side failures are presented to clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskConfig {
    /// Name on the masked body; `None` omits the key
    pub name: Option<String>,
    pub message: String,
    /// Log 4xx failures at warn level
    pub log_client_errors: bool,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            name: None,
            message: DEFAULT_MASKED_MESSAGE.to_string(),
            log_client_errors: false,
        }
    }
}

impl MaskConfig {
    /// Load from the environment, reading `.env` first if present
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(MaskConfig {
            name: lookup("HTTP_ERROR_MASKED_NAME").filter(|name| !name.is_empty()),
            message: lookup("HTTP_ERROR_MASKED_MESSAGE")
                .unwrap_or_else(|| DEFAULT_MASKED_MESSAGE.to_string()),
            log_client_errors: lookup("HTTP_ERROR_LOG_CLIENT_ERRORS")
                .unwrap_or_else(|| "false".to_string())
                .parse()
                .context("HTTP_ERROR_LOG_CLIENT_ERRORS must be true or false")?,
        })
    }

    /// The detail-free 500 body sent for server-side and unclassified failures
    pub fn masked_error(&self) -> HttpError {
        match &self.name {
            Some(name) => HttpError::named(ErrorCode::InternalServerError, name, &self.message),
            None => HttpError::new(ErrorCode::InternalServerError, &self.message),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Loads .env before anything reads the environment
        let mask = MaskConfig::from_env()?;

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .context("PORT must be a valid port number")?,
            },
            mask,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

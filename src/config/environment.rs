// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses bind address, storage location, CORS origins, and streaming tunables from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use crate::constants::{
    database::DEFAULT_DATABASE_URL,
    network_config::{
        DEFAULT_HOST, DEFAULT_HTTP_PORT, SSE_CHANNEL_CAPACITY, SSE_KEEPALIVE_INTERVAL_SECS,
    },
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

/// Environment type for deployment-specific behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// SQLite database with file path
    SQLite { path: PathBuf },
    /// In-memory SQLite (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error for URL schemes other than SQLite
    pub fn parse_url(s: &str) -> Result<Self> {
        if s == "sqlite::memory:" || s == ":memory:" {
            return Ok(Self::Memory);
        }

        if let Some(path) = s.strip_prefix("sqlite://").or_else(|| s.strip_prefix("sqlite:")) {
            if path.is_empty() {
                anyhow::bail!("DATABASE_URL has an empty SQLite path");
            }
            return Ok(Self::SQLite {
                path: PathBuf::from(path),
            });
        }

        if s.contains("://") {
            anyhow::bail!("Unsupported DATABASE_URL scheme: {s}");
        }

        // Bare path
        Ok(Self::SQLite {
            path: PathBuf::from(s),
        })
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(DEFAULT_DATABASE_URL).unwrap_or(Self::Memory)
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Notification storage
    pub database: DatabaseConfig,
    /// Cross-origin policy
    pub cors: CorsConfig,
    /// Live count streaming
    pub sse: SseConfig,
}

/// Notification storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; `["*"]` allows any
    pub allowed_origins: Vec<String>,
}

/// Streaming configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SseConfig {
    /// Buffered messages per subscription channel, at least one
    pub channel_capacity: usize,
    /// Seconds between keep-alive comments
    pub keepalive_interval_secs: u64,
    /// Send the current count as soon as a stream opens
    pub prime_on_connect: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            http_port: DEFAULT_HTTP_PORT,
            environment: Environment::default(),
            database: DatabaseConfig {
                url: DatabaseUrl::default(),
            },
            cors: CorsConfig {
                allowed_origins: vec!["*".to_owned()],
            },
            sse: SseConfig {
                channel_capacity: SSE_CHANNEL_CAPACITY,
                keepalive_interval_secs: SSE_KEEPALIVE_INTERVAL_SECS,
                prime_on_connect: true,
            },
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let config = Self {
            host: var_or("HOST", DEFAULT_HOST),
            http_port: parse_var(&lookup, "HTTP_PORT", DEFAULT_HTTP_PORT)?,
            environment: Environment::from_str_or_default(&var_or("ENVIRONMENT", "development")),
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&var_or("DATABASE_URL", DEFAULT_DATABASE_URL))
                    .context("Invalid DATABASE_URL value")?,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&var_or("CORS_ALLOWED_ORIGINS", "*")),
            },
            sse: SseConfig {
                channel_capacity: parse_var(&lookup, "SSE_CHANNEL_CAPACITY", SSE_CHANNEL_CAPACITY)?
                    .max(1),
                keepalive_interval_secs: parse_var(
                    &lookup,
                    "SSE_KEEPALIVE_SECS",
                    SSE_KEEPALIVE_INTERVAL_SECS,
                )?,
                prime_on_connect: parse_flag(&var_or("SSE_PRIME_ON_CONNECT", "true"))
                    .context("Invalid SSE_PRIME_ON_CONNECT value")?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range
    pub fn validate(&self) -> Result<()> {
        if self.sse.keepalive_interval_secs == 0 {
            anyhow::bail!("SSE_KEEPALIVE_SECS must be greater than zero");
        }
        if self.cors.allowed_origins.is_empty() {
            warn!("CORS_ALLOWED_ORIGINS is empty, allowing any origin");
        }
        Ok(())
    }

    /// Socket address string to bind
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Notification Hub Configuration:\n\
             - Bind: {}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - CORS Origins: {}\n\
             - SSE Channel Capacity: {}\n\
             - SSE Keep-Alive: {}s\n\
             - Prime On Connect: {}",
            self.bind_address(),
            self.environment,
            if self.database.url.is_memory() {
                "SQLite (memory)"
            } else {
                "SQLite"
            },
            self.cors.allowed_origins.join(","),
            self.sse.channel_capacity,
            self.sse.keepalive_interval_secs,
            self.sse.prime_on_connect,
        )
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {value}"))
    })
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got {other}"),
    }
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

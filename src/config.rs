//! # Configuration Management
//!
//! This module handles loading configuration from environment variables.
//! It uses the "12-factor app" methodology where configuration comes from the environment.
//!
//! ## Environment Variables
//! - `HOST`: Server bind address (default: 127.0.0.1)
//! - `PORT`: Server port (default: 8080)
//! - `DATABASE_URL`: SQLite database holding the local credential registry
//!   (default: `sqlite::memory:`). The software authenticator keeps its keys
//!   in memory, so a file-backed registry outlives the keys it refers to:
//!   after a restart every stored passkey must be registered again.
//! - `RP_ORIGIN`: Origin the app is served from; the relying party ID is its host
//! - `RP_NAME`: Human-readable name for your service
//! - `PASSWORD_DELAY_MS`: Artificial delay of the password sign-in path
//! - `WEBAUTHN_ENABLED`: Whether the software platform authenticator is available

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Application configuration
///
/// This struct holds all configuration values needed to run the server.
/// All fields are public for easy access from other modules.
///
/// ## WebAuthn Terminology
/// - **RP (Relying Party)**: Your application/website that relies on authentication
/// - **RP Origin**: Full URL of your application (e.g., "https://example.com")
/// - **RP ID**: Derived from the origin's host (e.g., "example.com" or "localhost")
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host/IP address to bind to
    pub host: String,

    /// Server port number (1-65535)
    pub port: u16,

    /// SQLite database connection URL
    /// Format: "sqlite::memory:" or "sqlite:filename.db?mode=rwc"
    pub database_url: String,

    /// WebAuthn Relying Party Origin
    /// For local development: "http://localhost:8080"
    pub rp_origin: String,

    /// Human-readable name for your application
    /// Shown to users during passkey creation
    pub rp_name: String,

    /// How long the password path waits before answering
    pub password_delay: Duration,

    /// When false the platform reports no WebAuthn capability
    pub webauthn_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "sqlite::memory:".to_string(),
            rp_origin: "http://localhost:8080".to_string(),
            rp_name: "Passkey Demo".to_string(),
            password_delay: Duration::from_millis(1000),
            webauthn_enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads variables from .env file (if present) using dotenvy
    /// 2. Reads each configuration value from environment
    /// 3. Falls back to the defaults if variables aren't set
    /// 4. Returns an error if parsing fails (e.g., invalid port number)
    ///
    /// ## Example .env file
    /// ```text
    /// HOST=127.0.0.1
    /// PORT=8080
    /// DATABASE_URL=sqlite::memory:
    /// RP_ORIGIN=http://localhost:8080
    /// RP_NAME=Passkey Demo
    /// PASSWORD_DELAY_MS=1000
    /// WEBAUTHN_ENABLED=true
    /// ```
    pub fn from_env() -> Result<Self> {
        // dotenvy doesn't error if the file is missing
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().with_context(|| format!("invalid PORT '{raw}'"))?,
            Err(_) => defaults.port,
        };

        let password_delay = match env::var("PASSWORD_DELAY_MS") {
            Ok(raw) => Duration::from_millis(
                raw.parse()
                    .with_context(|| format!("invalid PASSWORD_DELAY_MS '{raw}'"))?,
            ),
            Err(_) => defaults.password_delay,
        };

        let webauthn_enabled = match env::var("WEBAUTHN_ENABLED") {
            Ok(raw) => parse_flag(&raw)
                .with_context(|| format!("invalid WEBAUTHN_ENABLED '{raw}'"))?,
            Err(_) => defaults.webauthn_enabled,
        };

        Ok(Config {
            host: env::var("HOST").unwrap_or(defaults.host),
            port,
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            rp_origin: env::var("RP_ORIGIN").unwrap_or(defaults.rp_origin),
            rp_name: env::var("RP_NAME").unwrap_or(defaults.rp_name),
            password_delay,
            webauthn_enabled,
        })
    }

    /// Get the socket address to bind the server to
    ///
    /// Example: "127.0.0.1:8080"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

//! Configuration loading from environment variables.
//!
//! Everything is read once at startup. A `.env` file is honoured when the
//! binary calls `dotenvy::dotenv()` first.
//!
//! # Environment Variables
//!
//! ## Required Variables
//! - `ID_TOKEN_SECRET`: HS256 secret used to verify sign-in ID tokens
//! - `DATABASE_URL`: PostgreSQL connection string (only with `LIKE_STORE_BACKEND=postgres`)
//! - `REDIS_URL`: Redis connection URL (only with `LIKE_STORE_BACKEND=redis`)
//!
//! ## Optional Variables
//! - `RUST_LOG`: Logging level (default: "info,portfolio_likes=debug")
//! - `LIKE_STORE_BACKEND`: `memory`, `postgres` or `redis` (default: memory)
//! - `DATABASE_MAX_CONNECTIONS`: DB pool size (default: 5)
//! - `LIKES_COLLECTION`: Redis hash holding the likes (default: "likes")
//! - `ID_TOKEN_ISSUER` / `ID_TOKEN_AUDIENCE`: expected `iss` / `aud` claims
//! - `LIKE_ID_TOKEN`: credential the driver signs in with
//! - `LIKE_SESSION_TOKEN`: credential persisted by a previous visit
//! - `EMAILJS_SERVICE_ID`, `EMAILJS_TEMPLATE_ID`, `EMAILJS_PUBLIC_KEY`: enable email delivery
//! - `EMAILJS_ENDPOINT`: EmailJS send endpoint
//! - `EXTERNAL_CALL_TIMEOUT_MS`: bound on store and notifier calls (default: 5000)
//! - `SIGN_IN_TIMEOUT_MS`: bound on the sign-in prompt (default: 120000)
//! - `COUNT_ANIMATION_MS`: count animation length (default: 500)
//! - `NOTIFY_UTC_OFFSET_MINUTES`: offset for `liked_at` in emails (default: 330)
//! - `SITE_OWNER_NAME`: name in the contact form placeholder (default: "there")

use crate::application::like::dto::LikeSettings;
use crate::infrastructure::identity::id_token_provider::IdTokenSettings;
use crate::infrastructure::notification::emailjs_notifier::{
    DEFAULT_EMAILJS_ENDPOINT, EmailJsSettings,
};
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Postgres,
    Redis,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "redis" => Ok(Self::Redis),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub store_backend: StoreBackend,

    /// Required when `store_backend` is `Postgres`
    pub database_url: Option<String>,

    pub database_max_connections: u32,

    /// Required when `store_backend` is `Redis`
    pub redis_url: Option<String>,

    /// Redis hash key holding one field per identity
    pub likes_collection: String,

    pub id_token_secret: String,
    pub id_token_issuer: Option<String>,
    pub id_token_audience: Option<String>,

    /// Token the driver presents when the like button is clicked
    pub like_id_token: Option<String>,

    /// Token remembered from an earlier visit
    pub like_session_token: Option<String>,

    pub emailjs_service_id: Option<String>,
    pub emailjs_template_id: Option<String>,
    pub emailjs_public_key: Option<String>,
    pub emailjs_endpoint: String,

    pub external_call_timeout_ms: u64,
    pub sign_in_timeout_ms: u64,
    pub count_animation_ms: u64,
    pub notify_utc_offset_minutes: i32,
    pub site_owner_name: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or any variable is
    /// set but cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Self {
            store_backend: env_or("LIKE_STORE_BACKEND", StoreBackend::Memory)?,
            database_url: env_optional("DATABASE_URL"),
            database_max_connections: env_or("DATABASE_MAX_CONNECTIONS", 5)?,
            redis_url: env_optional("REDIS_URL"),
            likes_collection: env_or("LIKES_COLLECTION", "likes".to_string())?,
            id_token_secret: env_required("ID_TOKEN_SECRET")?,
            id_token_issuer: env_optional("ID_TOKEN_ISSUER"),
            id_token_audience: env_optional("ID_TOKEN_AUDIENCE"),
            like_id_token: env_optional("LIKE_ID_TOKEN"),
            like_session_token: env_optional("LIKE_SESSION_TOKEN"),
            emailjs_service_id: env_optional("EMAILJS_SERVICE_ID"),
            emailjs_template_id: env_optional("EMAILJS_TEMPLATE_ID"),
            emailjs_public_key: env_optional("EMAILJS_PUBLIC_KEY"),
            emailjs_endpoint: env_or("EMAILJS_ENDPOINT", DEFAULT_EMAILJS_ENDPOINT.to_string())?,
            external_call_timeout_ms: env_or("EXTERNAL_CALL_TIMEOUT_MS", 5_000)?,
            sign_in_timeout_ms: env_or("SIGN_IN_TIMEOUT_MS", 120_000)?,
            count_animation_ms: env_or("COUNT_ANIMATION_MS", 500)?,
            notify_utc_offset_minutes: env_or("NOTIFY_UTC_OFFSET_MINUTES", 330)?,
            site_owner_name: env_or("SITE_OWNER_NAME", "there".to_string())?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        match self.store_backend {
            StoreBackend::Postgres if self.database_url.is_none() => {
                anyhow::bail!("DATABASE_URL is required for the postgres store backend")
            }
            StoreBackend::Redis if self.redis_url.is_none() => {
                anyhow::bail!("REDIS_URL is required for the redis store backend")
            }
            _ => {}
        }
        if self.notify_utc_offset_minutes.abs() >= 24 * 60 {
            anyhow::bail!(
                "NOTIFY_UTC_OFFSET_MINUTES out of range: {}",
                self.notify_utc_offset_minutes
            );
        }
        Ok(())
    }

    pub fn external_call_timeout(&self) -> Duration {
        Duration::from_millis(self.external_call_timeout_ms)
    }

    pub fn like_settings(&self) -> LikeSettings {
        LikeSettings {
            call_timeout: self.external_call_timeout(),
            sign_in_timeout: Duration::from_millis(self.sign_in_timeout_ms),
            count_animation: Duration::from_millis(self.count_animation_ms),
            notify_utc_offset_minutes: self.notify_utc_offset_minutes,
            site_owner: self.site_owner_name.clone(),
            ..LikeSettings::default()
        }
    }

    pub fn id_token_settings(&self) -> IdTokenSettings {
        IdTokenSettings {
            secret: self.id_token_secret.clone(),
            issuer: self.id_token_issuer.clone(),
            audience: self.id_token_audience.clone(),
        }
    }

    /// EmailJS delivery is enabled only when all three identifiers are set.
    pub fn emailjs_settings(&self) -> Option<EmailJsSettings> {
        Some(EmailJsSettings {
            endpoint: self.emailjs_endpoint.clone(),
            service_id: self.emailjs_service_id.clone()?,
            template_id: self.emailjs_template_id.clone()?,
            public_key: self.emailjs_public_key.clone()?,
        })
    }
}

/// Load a required environment variable.
///
/// # Errors
///
/// Returns an error if the variable is not set.
fn env_required(key: &str) -> anyhow::Result<String> {
    std::env::var(key).map_err(|_| anyhow::anyhow!("Missing required environment variable: {}", key))
}

/// Load an optional environment variable, treating blank values as unset.
fn env_optional(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Load an environment variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}

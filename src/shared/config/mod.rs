//! Application configuration module
//!
//! Provides the typed configuration the server is built from. Values come
//! from environment variables (optionally loaded from a `.env` file by the
//! binary) through [`AppConfig::from_env`], or are assembled directly with
//! [`AppConfig::builder`] in tests.
//!
//! # Environment Variables
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | `sqlite://notes.db?mode=rwc` |
//! | `SERVER_PORT` | `8000` |
//! | `JWT_SECRET` | development secret (logged warning) |
//! | `ACCESS_TOKEN_MINUTES` | `60` |
//! | `REFRESH_TOKEN_DAYS` | `1` |
//! | `BCRYPT_COST` | `bcrypt::DEFAULT_COST` |
//! | `SMTP_HOST`, `SMTP_PORT`, `SMTP_USERNAME`, `SMTP_PASSWORD` | unset: log-only mailer |
//! | `SMTP_TLS` | `true` |
//! | `DEFAULT_FROM_EMAIL` | `noreply@localhost` |
//! | `STRIPE_SECRET_KEY`, `STRIPE_PUBLISHABLE_KEY` | unset / empty |
//! | `STRIPE_API_BASE` | `https://api.stripe.com` |
//! | `CORS_ALLOWED_ORIGINS` | `*` |

use thiserror::Error;

/// Secret used when `JWT_SECRET` is not set. Never acceptable in production.
const DEV_JWT_SECRET: &str = "development-secret-change-me-in-production";

pub const DEFAULT_DATABASE_URL: &str = "sqlite://notes.db?mode=rwc";
pub const DEFAULT_SERVER_PORT: u16 = 8000;
pub const DEFAULT_ACCESS_TOKEN_MINUTES: i64 = 60;
pub const DEFAULT_REFRESH_TOKEN_DAYS: i64 = 1;
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_FROM_EMAIL: &str = "noreply@localhost";
pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Outgoing mail relay settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// STARTTLS on connect. Disabled only for local relays and tests.
    pub tls: bool,
}

/// Payment processor settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripeConfig {
    /// Secret API key; payment intent creation fails without it
    pub secret_key: Option<String>,
    /// Publishable key handed to the frontend
    pub publishable_key: String,
    /// REST API base URL
    pub api_base: String,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            secret_key: None,
            publishable_key: String::new(),
            api_base: DEFAULT_STRIPE_API_BASE.to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub server_port: u16,
    pub jwt_secret: String,
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
    pub bcrypt_cost: u32,
    /// `None` selects the log-only mailer
    pub smtp: Option<SmtpConfig>,
    pub default_from_email: String,
    pub stripe: StripeConfig,
    /// Comma separated origins, or `*`
    pub cors_allowed_origins: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            access_token_minutes: DEFAULT_ACCESS_TOKEN_MINUTES,
            refresh_token_days: DEFAULT_REFRESH_TOKEN_DAYS,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            smtp: None,
            default_from_email: DEFAULT_FROM_EMAIL.to_string(),
            stripe: StripeConfig::default(),
            cors_allowed_origins: "*".to_string(),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut builder = Self::builder();

        if let Some(url) = get("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(port) = get("SERVER_PORT") {
            builder = builder.server_port(parse("SERVER_PORT", &port)?);
        }
        match get("JWT_SECRET") {
            Some(secret) => builder = builder.jwt_secret(secret),
            None => tracing::warn!("JWT_SECRET not set, using development secret"),
        }
        if let Some(minutes) = get("ACCESS_TOKEN_MINUTES") {
            builder = builder.access_token_minutes(parse("ACCESS_TOKEN_MINUTES", &minutes)?);
        }
        if let Some(days) = get("REFRESH_TOKEN_DAYS") {
            builder = builder.refresh_token_days(parse("REFRESH_TOKEN_DAYS", &days)?);
        }
        if let Some(cost) = get("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse("BCRYPT_COST", &cost)?);
        }

        if let Some(host) = get("SMTP_HOST") {
            let port = match get("SMTP_PORT") {
                Some(port) => parse("SMTP_PORT", &port)?,
                None => DEFAULT_SMTP_PORT,
            };
            let tls = match get("SMTP_TLS") {
                Some(flag) => parse_bool("SMTP_TLS", &flag)?,
                None => true,
            };
            builder = builder.smtp(SmtpConfig {
                host,
                port,
                username: get("SMTP_USERNAME"),
                password: get("SMTP_PASSWORD"),
                tls,
            });
        }
        if let Some(from) = get("DEFAULT_FROM_EMAIL") {
            builder = builder.default_from_email(from);
        }

        builder = builder.stripe(StripeConfig {
            secret_key: get("STRIPE_SECRET_KEY"),
            publishable_key: get("STRIPE_PUBLISHABLE_KEY").unwrap_or_default(),
            api_base: get("STRIPE_API_BASE")
                .unwrap_or_else(|| DEFAULT_STRIPE_API_BASE.to_string()),
        });

        if let Some(origins) = get("CORS_ALLOWED_ORIGINS") {
            builder = builder.cors_allowed_origins(origins);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::MissingValue("DATABASE_URL"));
        }
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.access_token_minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "ACCESS_TOKEN_MINUTES",
                value: self.access_token_minutes.to_string(),
            });
        }
        if self.refresh_token_days <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "REFRESH_TOKEN_DAYS",
                value: self.refresh_token_days.to_string(),
            });
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        let base = &self.stripe.api_base;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(base.clone()));
        }
        Ok(())
    }

    /// Whether the JWT secret is the built-in development value
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = url.into();
        self
    }

    pub fn server_port(mut self, port: u16) -> Self {
        self.config.server_port = port;
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    pub fn access_token_minutes(mut self, minutes: i64) -> Self {
        self.config.access_token_minutes = minutes;
        self
    }

    pub fn refresh_token_days(mut self, days: i64) -> Self {
        self.config.refresh_token_days = days;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    pub fn smtp(mut self, smtp: SmtpConfig) -> Self {
        self.config.smtp = Some(smtp);
        self
    }

    pub fn default_from_email(mut self, from: impl Into<String>) -> Self {
        self.config.default_from_email = from.into();
        self
    }

    pub fn stripe(mut self, stripe: StripeConfig) -> Self {
        self.config.stripe = stripe;
        self
    }

    pub fn cors_allowed_origins(mut self, origins: impl Into<String>) -> Self {
        self.config.cors_allowed_origins = origins.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

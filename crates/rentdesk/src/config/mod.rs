use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::bonus::{BonusMessages, DiscountFormatter};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub bonus: BonusConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            bonus: BonusConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Display and wording settings for the discount field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusConfig {
    pub thousands_separator: char,
    pub messages: BonusMessages,
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            thousands_separator: ' ',
            messages: BonusMessages::default(),
        }
    }
}

impl BonusConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let thousands_separator = match env::var("APP_THOUSANDS_SEPARATOR") {
            Ok(raw) => {
                let mut chars = raw.chars();
                match (chars.next(), chars.next()) {
                    (Some(separator), None) if !separator.is_ascii_digit() => separator,
                    _ => return Err(ConfigError::InvalidThousandsSeparator(raw)),
                }
            }
            Err(_) => defaults.thousands_separator,
        };

        let currency_label =
            env::var("APP_CURRENCY_LABEL").unwrap_or(defaults.messages.currency_label);
        let discount_exceeds_max = env::var("APP_DISCOUNT_EXCEEDS_MAX_MESSAGE")
            .unwrap_or(defaults.messages.discount_exceeds_max);

        Ok(Self {
            thousands_separator,
            messages: BonusMessages {
                currency_label,
                discount_exceeds_max,
            },
        })
    }

    pub fn formatter(&self) -> DiscountFormatter {
        DiscountFormatter::new(self.thousands_separator, self.messages.clone())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThousandsSeparator(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThousandsSeparator(value) => write!(
                f,
                "APP_THOUSANDS_SEPARATOR must be a single non-digit character, got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidThousandsSeparator(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use url::Url;

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
    pub firm: FirmConfig,
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
            firm: FirmConfig::from_env()?,
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

/// Identity of the firm printed on reports and summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmConfig {
    pub name: String,
    pub city: String,
    pub contact_email: String,
    pub booking_url: String,
}

impl Default for FirmConfig {
    fn default() -> Self {
        Self {
            name: "Radar Legal".to_string(),
            city: "A Coruña / Galicia".to_string(),
            contact_email: "hola@radarlegal.com".to_string(),
            booking_url: "https://calendly.com/radar-legal/revision".to_string(),
        }
    }
}

impl FirmConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let name = non_empty_var("FIRM_NAME", defaults.name)?;
        let city = non_empty_var("FIRM_CITY", defaults.city)?;
        let contact_email = non_empty_var("FIRM_CONTACT_EMAIL", defaults.contact_email)?;
        let booking_url = non_empty_var("FIRM_BOOKING_URL", defaults.booking_url)?;

        if !contact_email.contains('@') {
            return Err(ConfigError::InvalidFirmEmail(contact_email));
        }
        if let Err(source) = Url::parse(&booking_url) {
            return Err(ConfigError::InvalidBookingUrl {
                value: booking_url,
                source,
            });
        }

        Ok(Self {
            name,
            city,
            contact_email,
            booking_url,
        })
    }

    /// One-line identity used in report footers.
    pub fn tagline(&self) -> String {
        format!("{} · Debt recovery · {}", self.name, self.city)
    }
}

fn non_empty_var(key: &'static str, default: String) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::Empty(key)),
        Ok(value) => Ok(value.trim().to_string()),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    Empty(&'static str),
    InvalidFirmEmail(String),
    InvalidBookingUrl {
        value: String,
        source: url::ParseError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::Empty(key) => write!(f, "{key} must not be empty when set"),
            ConfigError::InvalidFirmEmail(value) => {
                write!(f, "FIRM_CONTACT_EMAIL '{value}' is not an email address")
            }
            ConfigError::InvalidBookingUrl { value, .. } => {
                write!(f, "FIRM_BOOKING_URL '{value}' is not an absolute URL")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidBookingUrl { source, .. } => Some(source),
            ConfigError::InvalidPort | ConfigError::Empty(_) | ConfigError::InvalidFirmEmail(_) => {
                None
            }
        }
    }
}

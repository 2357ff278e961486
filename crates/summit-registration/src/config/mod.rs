use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::camp::CAMP_ESSENCE_FORM_GUID;
use crate::workflows::summit::PricingVariant;

pub const DEFAULT_FORMS_BASE_URL: &str = "https://api.hsforms.com";
pub const DEFAULT_API_BASE_URL: &str = "https://api.hubapi.com";

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

/// Top-level configuration for the registration service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub hubspot: HubSpotConfig,
    pub pricing: PricingVariant,
}

impl AppConfig {
    /// Missing CRM credentials are not an error here; the gateways report
    /// them when a request first needs them.
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

        let pricing = match optional_var("SUMMIT_PRICING_TABLE") {
            None => PricingVariant::Tiered,
            Some(value) => PricingVariant::parse(&value)
                .ok_or(ConfigError::InvalidPricingTable { value })?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            hubspot: HubSpotConfig::from_env(),
            pricing,
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

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// CRM portal, form, and object identifiers plus endpoint roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubSpotConfig {
    pub portal_id: Option<String>,
    pub registration_form_guid: Option<String>,
    pub camp_essence_form_guid: Option<String>,
    pub private_app_token: Option<String>,
    pub summit_object_type_id: Option<String>,
    pub forms_base_url: String,
    pub api_base_url: String,
}

impl HubSpotConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            portal_id: optional_var("HUBSPOT_PORTAL_ID"),
            registration_form_guid: optional_var("HUBSPOT_REGISTRATION_FORM_GUID"),
            camp_essence_form_guid: optional_var("HUBSPOT_CAMP_ESSENCE_FORM_GUID")
                .or(defaults.camp_essence_form_guid),
            private_app_token: optional_var("HUBSPOT_PRIVATE_APP_TOKEN"),
            summit_object_type_id: optional_var("HUBSPOT_SUMMIT_OBJECT_TYPE_ID"),
            forms_base_url: optional_var("HUBSPOT_FORMS_BASE_URL").unwrap_or(defaults.forms_base_url),
            api_base_url: optional_var("HUBSPOT_API_BASE_URL").unwrap_or(defaults.api_base_url),
        }
    }

    /// Point both endpoint roots at one host, e.g. a local stand-in.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.forms_base_url = base_url.to_string();
        self.api_base_url = base_url.to_string();
        self
    }
}

impl Default for HubSpotConfig {
    fn default() -> Self {
        Self {
            portal_id: None,
            registration_form_guid: None,
            camp_essence_form_guid: Some(CAMP_ESSENCE_FORM_GUID.to_string()),
            private_app_token: None,
            summit_object_type_id: None,
            forms_base_url: DEFAULT_FORMS_BASE_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

/// Unset and blank values are both absent.
fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPricingTable { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPricingTable { value } => write!(
                f,
                "SUMMIT_PRICING_TABLE must be 'tiered' or 'flat', got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidPricingTable { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

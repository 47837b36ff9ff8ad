//! Environment-driven configuration.
//!
//! Every setting has a default that reproduces the storefront's current
//! behaviour, so an empty environment is a valid configuration.

use std::time::Duration;

use thiserror::Error;

use shipdash_cart::PricingPolicy;
use shipdash_observability::LogFormat;
use shipdash_orders::TimelineMode;

pub const DESTINATION_COUNTRY: &str = "SHIPDASH_DESTINATION_COUNTRY";
pub const TIMELINE_MODE: &str = "SHIPDASH_TIMELINE_MODE";
pub const CLAMP_EMPTY_SHIPPING: &str = "SHIPDASH_CLAMP_EMPTY_SHIPPING";
pub const TAX_RATE: &str = "SHIPDASH_TAX_RATE";
pub const SERVICE_FEE_RATE: &str = "SHIPDASH_SERVICE_FEE_RATE";
pub const LOOKUP_TIMEOUT_MS: &str = "SHIPDASH_LOOKUP_TIMEOUT_MS";
pub const LOG_FORMAT: &str = "SHIPDASH_LOG_FORMAT";

const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}={value:?} is invalid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Country the cart is priced for until the customer picks another.
    pub destination_country: String,
    pub timeline_mode: TimelineMode,
    pub pricing: PricingPolicy,
    pub lookup_timeout: Duration,
    pub log_format: LogFormat,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let pricing = PricingPolicy::default();
        Self {
            destination_country: pricing.domestic_country.clone(),
            timeline_mode: TimelineMode::default(),
            pricing,
            lookup_timeout: Duration::from_millis(DEFAULT_LOOKUP_TIMEOUT_MS),
            log_format: LogFormat::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map here).
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let read = |key: &'static str| {
            get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(country) = read(DESTINATION_COUNTRY) {
            config.destination_country = country.to_ascii_uppercase();
        }

        if let Some(mode) = read(TIMELINE_MODE) {
            config.timeline_mode = match mode.to_ascii_lowercase().as_str() {
                "legacy" => TimelineMode::Legacy,
                "terminal_aware" => TimelineMode::TerminalAware,
                _ => {
                    return Err(ConfigError::invalid(
                        TIMELINE_MODE,
                        &mode,
                        "expected `legacy` or `terminal_aware`",
                    ));
                }
            };
        }

        if let Some(flag) = read(CLAMP_EMPTY_SHIPPING) {
            config.pricing.clamp_empty_cart_shipping = parse_bool(CLAMP_EMPTY_SHIPPING, &flag)?;
        }

        if let Some(rate) = read(TAX_RATE) {
            config.pricing.tax_rate = parse_rate(TAX_RATE, &rate)?;
        }

        if let Some(rate) = read(SERVICE_FEE_RATE) {
            config.pricing.service_fee_rate = parse_rate(SERVICE_FEE_RATE, &rate)?;
        }

        if let Some(ms) = read(LOOKUP_TIMEOUT_MS) {
            let millis: u64 = ms
                .parse()
                .map_err(|e| ConfigError::invalid(LOOKUP_TIMEOUT_MS, &ms, format!("{e}")))?;
            if millis == 0 {
                return Err(ConfigError::invalid(
                    LOOKUP_TIMEOUT_MS,
                    &ms,
                    "must be greater than zero",
                ));
            }
            config.lookup_timeout = Duration::from_millis(millis);
        }

        if let Some(format) = read(LOG_FORMAT) {
            config.log_format = LogFormat::parse(&format).ok_or_else(|| {
                ConfigError::invalid(LOG_FORMAT, &format, "expected `json` or `pretty`")
            })?;
        }

        Ok(config)
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(key, value, "expected a boolean")),
    }
}

fn parse_rate(key: &'static str, value: &str) -> Result<f64, ConfigError> {
    let rate: f64 = value
        .parse()
        .map_err(|e| ConfigError::invalid(key, value, format!("{e}")))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::invalid(key, value, "must be between 0 and 1"));
    }
    Ok(rate)
}

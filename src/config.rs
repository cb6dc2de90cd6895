use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::application::pagination::DEFAULT_PAGE_SIZE;
use crate::infrastructure::mailer::EmailJsConfig;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration, read from `.env` and the process environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub admin_email: String,
    pub admin_password: String,
    pub page_size: usize,
    pub notification_duration: Duration,
    pub payment_delay: Duration,
    pub checkout_decrements_stock: bool,
    pub emailjs: Option<EmailJsConfig>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let emailjs = match (
            lookup("EMAILJS_SERVICE_ID"),
            lookup("EMAILJS_TEMPLATE_ID"),
            lookup("EMAILJS_PUBLIC_KEY"),
        ) {
            (Some(service_id), Some(template_id), Some(public_key)) => Some(EmailJsConfig {
                service_id,
                template_id,
                public_key,
            }),
            (None, None, None) => None,
            _ => {
                log::warn!("EmailJS is partially configured; verification emails are disabled");
                None
            }
        };

        let page_size: usize = parse_or(&lookup, "PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "PAGE_SIZE",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }

        Ok(Settings {
            database_url: required("DATABASE_URL")?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            admin_email: required("ADMIN_EMAIL")?,
            admin_password: required("ADMIN_PASSWORD")?,
            page_size,
            notification_duration: Duration::from_millis(parse_or(
                &lookup,
                "NOTIFICATION_DURATION_MS",
                3000,
            )?),
            payment_delay: Duration::from_millis(parse_or(&lookup, "PAYMENT_DELAY_MS", 2000)?),
            checkout_decrements_stock: parse_or(&lookup, "CHECKOUT_DECREMENTS_STOCK", false)?,
            emailjs,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

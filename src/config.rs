use std::{fmt, path::PathBuf};

use crate::{constants::*, localization::Locale, utils::ConfigError};

/// Job configuration, read once at startup
#[derive(Clone)]
pub struct Config {
    pub api_url: String,
    pub api_key: String,
    pub credentials_path: PathBuf,
    pub locale: Locale,
    pub dry_run: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // never print the api key
        f.debug_struct("Config")
            .field("api_url", &self.api_url)
            .field("api_key", &"****")
            .field("credentials_path", &self.credentials_path)
            .field("locale", &self.locale)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Config {
    /// Load the configuration from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = required(&lookup, ENV_API_URL)?;
        let api_key = required(&lookup, ENV_API_KEY)?;
        let credentials_path = optional(&lookup, ENV_CREDENTIALS_PATH)
            .unwrap_or_else(|| DEFAULT_CREDENTIALS_PATH.to_owned());
        let locale = match optional(&lookup, ENV_LOCALE) {
            Some(value) => value
                .parse::<Locale>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: ENV_LOCALE,
                    value,
                })?,
            None => Locale::default(),
        };
        let dry_run = match optional(&lookup, ENV_DRY_RUN) {
            Some(value) => parse_flag(&value).ok_or(ConfigError::InvalidValue {
                name: ENV_DRY_RUN,
                value,
            })?,
            None => false,
        };
        Ok(Self {
            api_url,
            api_key,
            credentials_path: PathBuf::from(credentials_path),
            locale,
            dry_run,
        })
    }
}

fn optional<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, name).ok_or(ConfigError::MissingVar(name))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

pub const API_URL_VAR: &str = "API_URL";
pub const MAPTILER_KEY_VAR: &str = "MAPTILER_API_KEY";

const STYLE_BASE: &str = "https://api.maptiler.com/maps/streets-v2/style.json";

/// Map style URL for a MapTiler key.
pub fn style_url(maptiler_api_key: &str) -> String {
    format!("{STYLE_BASE}?key={maptiler_api_key}")
}

/// What the page needs to boot, served as `/config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicConfig {
    pub api_url: String,
    pub style_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Empty(&'static str),
    InvalidUrl { var: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "{var} is not set"),
            ConfigError::Empty(var) => write!(f, "{var} is empty"),
            ConfigError::InvalidUrl { var, reason } => write!(f, "{var} is not a valid URL: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validated API settings.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_url: reqwest::Url,
    pub maptiler_api_key: String,
}

#[cfg(not(target_arch = "wasm32"))]
impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads both variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = required(&lookup, API_URL_VAR)?;
        let api_url = reqwest::Url::parse(&raw_url).map_err(|e| ConfigError::InvalidUrl {
            var: API_URL_VAR,
            reason: e.to_string(),
        })?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                var: API_URL_VAR,
                reason: format!("unsupported scheme {:?}", api_url.scheme()),
            });
        }
        let maptiler_api_key = required(&lookup, MAPTILER_KEY_VAR)?;
        Ok(Self {
            api_url,
            maptiler_api_key,
        })
    }

    pub fn style_url(&self) -> String {
        style_url(&self.maptiler_api_key)
    }

    /// `api_url` without a trailing slash.
    pub fn api_base(&self) -> String {
        self.api_url.as_str().trim_end_matches('/').to_string()
    }

    pub fn public(&self) -> PublicConfig {
        PublicConfig {
            api_url: self.api_base(),
            style_url: self.style_url(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    let value = lookup(var).ok_or(ConfigError::Missing(var))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::Empty(var));
    }
    Ok(value.to_string())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |var| {
            pairs
                .iter()
                .find(|(k, _)| *k == var)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn accepts_valid_environment() {
        let cfg = ApiConfig::from_lookup(lookup(&[
            ("API_URL", "https://incentives.example.org/"),
            ("MAPTILER_API_KEY", "abc123"),
        ]))
        .expect("config");
        assert_eq!(
            cfg.public(),
            PublicConfig {
                api_url: "https://incentives.example.org".to_string(),
                style_url: "https://api.maptiler.com/maps/streets-v2/style.json?key=abc123"
                    .to_string(),
            }
        );
    }

    #[test]
    fn names_the_bad_variable() {
        let missing = ApiConfig::from_lookup(lookup(&[("MAPTILER_API_KEY", "k")]));
        assert_eq!(missing, Err(ConfigError::Missing("API_URL")));

        let empty = ApiConfig::from_lookup(lookup(&[
            ("API_URL", "http://localhost:8080"),
            ("MAPTILER_API_KEY", "  "),
        ]));
        assert_eq!(empty, Err(ConfigError::Empty("MAPTILER_API_KEY")));

        let relative = ApiConfig::from_lookup(lookup(&[
            ("API_URL", "/api"),
            ("MAPTILER_API_KEY", "k"),
        ]));
        assert!(matches!(
            relative,
            Err(ConfigError::InvalidUrl { var: "API_URL", .. })
        ));

        let ftp = ApiConfig::from_lookup(lookup(&[
            ("API_URL", "ftp://files.example.org"),
            ("MAPTILER_API_KEY", "k"),
        ]));
        let err = ftp.expect_err("ftp rejected");
        assert!(err.to_string().starts_with("API_URL is not a valid URL"));
    }
}

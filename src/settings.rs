use std::num::NonZeroU32;
use std::time::Duration;
use config::{Config, ConfigError, File};
use serde::Deserialize;
use crate::dns::{ZoneConfig, DEFAULT_COMMENT};

#[derive(Debug, Deserialize)]
pub struct ZoneSettings {
    #[serde(default = "default_comment")]
    pub comment: String,
    #[serde(default)]
    pub private_zone: bool,
}

impl Default for ZoneSettings {
    fn default() -> Self {
        Self {
            comment: default_comment(),
            private_zone: false,
        }
    }
}

impl From<ZoneSettings> for ZoneConfig {
    fn from(s: ZoneSettings) -> Self {
        Self {
            comment: s.comment,
            private_zone: s.private_zone,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RateLimitSettings {
    #[serde(default = "default_requests")]
    pub requests: NonZeroU32,
    /// Window length, e.g. `1s` or `500ms`.
    #[serde(default = "default_period")]
    pub period: String,
}

impl RateLimitSettings {
    pub fn period(&self) -> Result<Duration, humantime::DurationError> {
        humantime::parse_duration(&self.period)
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            requests: default_requests(),
            period: default_period(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub domain: String,
    #[serde(default)]
    pub zone: ZoneSettings,
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let cfg = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("/etc/route53-smoke/config").required(false))
            .add_source(config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true))
            .build()?;

        cfg.try_deserialize()
    }
}

fn default_comment() -> String {
    DEFAULT_COMMENT.to_owned()
}

fn default_requests() -> NonZeroU32 {
    NonZeroU32::MIN
}

fn default_period() -> String {
    "1s".to_owned()
}

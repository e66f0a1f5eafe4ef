use homecourt_api::client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use homecourt_api::feed::DEFAULT_REFRESH_INTERVAL;
use log::{LevelFilter, warn};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_API_URL: &str = "HOMECOURT_API_URL";
pub const ENV_REFRESH_SECS: &str = "HOMECOURT_REFRESH_SECS";
pub const ENV_TIMEOUT_SECS: &str = "HOMECOURT_TIMEOUT_SECS";
pub const ENV_LOG: &str = "HOMECOURT_LOG";
pub const ENV_TEAM: &str = "HOMECOURT_TEAM";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: LevelFilter,
    pub api_url: String,
    pub refresh_interval: Duration,
    pub request_timeout: Duration,
    /// Team to follow on launch (CLI argument wins over the env var).
    pub initial_team: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: LevelFilter::Warn,
            api_url: DEFAULT_ENDPOINT.to_owned(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            request_timeout: DEFAULT_TIMEOUT,
            initial_team: None,
        }
    }
}

impl AppSettings {
    /// Read settings from the environment. Bad values fall back to defaults.
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            full_screen: false,
            log_level: parse_level(lookup(ENV_LOG).as_deref(), defaults.log_level),
            api_url: lookup(ENV_API_URL)
                .map(|url| url.trim().to_owned())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.api_url),
            refresh_interval: parse_secs(
                ENV_REFRESH_SECS,
                lookup(ENV_REFRESH_SECS).as_deref(),
                defaults.refresh_interval,
            ),
            request_timeout: parse_secs(
                ENV_TIMEOUT_SECS,
                lookup(ENV_TIMEOUT_SECS).as_deref(),
                defaults.request_timeout,
            ),
            initial_team: lookup(ENV_TEAM)
                .map(|team| team.trim().to_owned())
                .filter(|team| !team.is_empty()),
        }
    }
}

fn parse_level(raw: Option<&str>, default: LevelFilter) -> LevelFilter {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return default;
    };
    LevelFilter::from_str(raw).unwrap_or_else(|_| {
        warn!("ignoring {ENV_LOG}={raw}: not a log level");
        default
    })
}

/// Whole seconds, at least one.
fn parse_secs(key: &str, raw: Option<&str>, default: Duration) -> Duration {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return default;
    };
    match raw.parse::<u64>() {
        Ok(secs) if secs >= 1 => Duration::from_secs(secs),
        _ => {
            warn!("ignoring {key}={raw}: expected a whole number of seconds >= 1");
            default
        }
    }
}

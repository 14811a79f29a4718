use std::{env, path::PathBuf, str::FromStr, time::Duration};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_FEEDER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_DATA_PATH: &str = "data/preferences.json";
pub const DEFAULT_REFRESH_SECS: u64 = 30;
pub const DEFAULT_TOAST_MS: u64 = 4000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub feeder_url: String,
    pub data_path: PathBuf,
    pub refresh_interval: Duration,
    pub toast_duration: Duration,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            feeder_url: DEFAULT_FEEDER_URL.to_string(),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            toast_duration: Duration::from_millis(DEFAULT_TOAST_MS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let feeder_url = lookup("FEEDER_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.feeder_url);

        let data_path = lookup("CONSOLE_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let refresh_secs: u64 = parse_or(&lookup, "REFRESH_INTERVAL_SECS", DEFAULT_REFRESH_SECS);
        let toast_ms: u64 = parse_or(&lookup, "TOAST_DURATION_MS", DEFAULT_TOAST_MS);
        let timeout_secs: u64 = parse_or(&lookup, "FEEDER_REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);

        Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT),
            feeder_url,
            data_path,
            refresh_interval: Duration::from_secs(refresh_secs.max(1)),
            toast_duration: Duration::from_millis(toast_ms),
            request_timeout: Duration::from_secs(timeout_secs.max(1)),
        }
    }
}

fn parse_or<T: FromStr + Copy>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!("ignoring invalid {key}={raw:?}");
                default
            }
        },
        None => default,
    }
}

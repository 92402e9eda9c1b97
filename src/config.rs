use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DRAWS_URL: &str = "https://data.ny.gov/resource/d6yy-54nr.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub draws_url: String,
    pub fetch_retries: u32,
    pub fetch_timeout: Duration,
    pub retry_delay: Duration,
    /// Minimum gap between fetch attempts while the latest draws are still missing.
    pub fetch_cooldown: Duration,
    pub max_picks: usize,
    pub prize_table_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            draws_url: DEFAULT_DRAWS_URL.to_string(),
            fetch_retries: 3,
            fetch_timeout: Duration::from_secs(10),
            retry_delay: Duration::from_millis(500),
            fetch_cooldown: Duration::from_secs(300),
            max_picks: 10,
            prize_table_path: None,
        }
    }
}

pub fn load() -> Result<Config> {
    from_lookup(|key| env::var(key).ok())
}

/// Builds the config from any key lookup, falling back to defaults for unset keys.
pub fn from_lookup<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = Config::default();

    let draws_url = lookup("LOTTERY_DRAWS_URL").unwrap_or(defaults.draws_url);
    let fetch_retries = parse_or(&lookup, "LOTTERY_FETCH_RETRIES", defaults.fetch_retries)?;
    let fetch_timeout = parse_or(&lookup, "LOTTERY_FETCH_TIMEOUT_SECS", defaults.fetch_timeout.as_secs())
        .map(Duration::from_secs)?;
    let retry_delay = parse_or(
        &lookup,
        "LOTTERY_RETRY_DELAY_MS",
        defaults.retry_delay.as_millis() as u64,
    )
    .map(Duration::from_millis)?;
    let fetch_cooldown = parse_or(
        &lookup,
        "LOTTERY_FETCH_COOLDOWN_SECS",
        defaults.fetch_cooldown.as_secs(),
    )
    .map(Duration::from_secs)?;
    let max_picks = parse_or(&lookup, "LOTTERY_MAX_PICKS", defaults.max_picks)?;
    if max_picks == 0 {
        anyhow::bail!("LOTTERY_MAX_PICKS must be at least 1");
    }
    let prize_table_path = lookup("LOTTERY_PRIZE_TABLE_PATH")
        .filter(|path| !path.trim().is_empty())
        .map(PathBuf::from);

    Ok(Config {
        draws_url,
        fetch_retries,
        fetch_timeout,
        retry_delay,
        fetch_cooldown,
        max_picks,
        prize_table_path,
    })
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {}: '{}'", key, raw)),
        None => Ok(default),
    }
}

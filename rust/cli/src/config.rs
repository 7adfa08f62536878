use duelist_catalog::client::RetryPolicy;
use duelist_catalog::source::DEFAULT_CATALOG_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

pub const CONFIG_ENV: &str = "DUELIST_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub offline: bool,
    pub catalog_url: String,
    pub max_attempts: u32,
    pub backoff_ms: u64,
    pub request_timeout_secs: u64,
    pub pace_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub offline: ValueSource,
    pub catalog_url: ValueSource,
    pub max_attempts: ValueSource,
    pub backoff_ms: ValueSource,
    pub request_timeout_secs: ValueSource,
    pub pace_ms: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            offline: ValueSource::Default,
            catalog_url: ValueSource::Default,
            max_attempts: ValueSource::Default,
            backoff_ms: ValueSource::Default,
            request_timeout_secs: ValueSource::Default,
            pace_ms: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            seed: None,
            offline: false,
            catalog_url: DEFAULT_CATALOG_URL.into(),
            max_attempts: policy.max_attempts,
            backoff_ms: policy.backoff.as_millis() as u64,
            request_timeout_secs: 20,
            pace_ms: 500,
        }
    }
}

impl Config {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            backoff: Duration::from_millis(self.backoff_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "malformed config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Defaults, then the TOML file named by `DUELIST_CONFIG`, then `DUELIST_*`
/// environment variables. Empty variables are ignored.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.offline {
            cfg.offline = v;
            sources.offline = ValueSource::File;
        }
        if let Some(v) = f.catalog_url {
            cfg.catalog_url = v;
            sources.catalog_url = ValueSource::File;
        }
        if let Some(v) = f.max_attempts {
            cfg.max_attempts = v;
            sources.max_attempts = ValueSource::File;
        }
        if let Some(v) = f.backoff_ms {
            cfg.backoff_ms = v;
            sources.backoff_ms = ValueSource::File;
        }
        if let Some(v) = f.request_timeout_secs {
            cfg.request_timeout_secs = v;
            sources.request_timeout_secs = ValueSource::File;
        }
        if let Some(v) = f.pace_ms {
            cfg.pace_ms = v;
            sources.pace_ms = ValueSource::File;
        }
    }

    if let Some(seed) = env_value("DUELIST_SEED") {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(offline) = env_value("DUELIST_OFFLINE") {
        cfg.offline =
            parse_bool(&offline).ok_or_else(|| ConfigError::Invalid("Invalid offline".into()))?;
        sources.offline = ValueSource::Env;
    }
    if let Some(url) = env_value("DUELIST_CATALOG_URL") {
        cfg.catalog_url = url;
        sources.catalog_url = ValueSource::Env;
    }
    if let Some(n) = env_value("DUELIST_MAX_ATTEMPTS") {
        cfg.max_attempts = n
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid max_attempts".into()))?;
        sources.max_attempts = ValueSource::Env;
    }
    if let Some(ms) = env_value("DUELIST_BACKOFF_MS") {
        cfg.backoff_ms = ms
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid backoff_ms".into()))?;
        sources.backoff_ms = ValueSource::Env;
    }
    if let Some(ms) = env_value("DUELIST_PACE_MS") {
        cfg.pace_ms = ms
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid pace_ms".into()))?;
        sources.pace_ms = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    offline: Option<bool>,
    #[serde(default)]
    catalog_url: Option<String>,
    #[serde(default)]
    max_attempts: Option<u32>,
    #[serde(default)]
    backoff_ms: Option<u64>,
    #[serde(default)]
    request_timeout_secs: Option<u64>,
    #[serde(default)]
    pace_ms: Option<u64>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.max_attempts == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: max_attempts must be >=1".into(),
        ));
    }
    if cfg.request_timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: request_timeout_secs must be >0".into(),
        ));
    }
    if cfg.catalog_url.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: catalog_url must not be empty".into(),
        ));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

//! Configuration module
//!
//! Settings come from environment variables (a `.env` file is honoured). Every value has
//! a default; `validate` rejects combinations the service cannot run with.

use std::env;
use std::str::FromStr;
use std::time::Duration;

const SERVER_PORT: u16 = 8080;
const STATEMENT_TOKEN_TTL_SECONDS: u64 = 300;
const TOKEN_SWEEP_INTERVAL_SECS: u64 = 60;
const STORE_SHARD_COUNT: usize = 16;
/// Default path prefix of public download links
pub const DEFAULT_PUBLIC_DOWNLOAD_PATH: &str = "/api/public/download";
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Base configuration shared by every HTTP service
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub http_concurrency_limit: usize,
    /// `pretty` or `json`
    pub log_format: String,
}

/// Statement vault configuration
#[derive(Clone, Debug)]
pub struct StatementsConfig {
    pub base: BaseConfig,
    pub token_ttl_seconds: u64,
    pub token_sweep_interval_secs: u64,
    pub store_shard_count: usize,
    /// Path prefix of generated download links; the token is appended as the last segment.
    pub public_download_path: String,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<StatementsConfig>);

impl Config {
    pub fn new(config: StatementsConfig) -> Self {
        Config(Box::new(config))
    }

    fn as_statements(&self) -> &StatementsConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_environment(&self.as_statements().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = StatementsConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_statements().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_statements().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_statements().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_statements().base.environment
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.as_statements().base.http_concurrency_limit
    }

    pub fn log_format(&self) -> &str {
        &self.as_statements().base.log_format
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.as_statements().token_ttl_seconds)
    }

    pub fn token_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.as_statements().token_sweep_interval_secs)
    }

    pub fn store_shard_count(&self) -> usize {
        self.as_statements().store_shard_count
    }

    pub fn public_download_path(&self) -> &str {
        &self.as_statements().public_download_path
    }
}

/// Paths served by the API itself. A download path must lie outside all of them and
/// must not contain any of them.
pub const RESERVED_ROUTE_PATHS: &[&str] = &[
    "/api/statements",
    "/api/openapi.json",
    "/statements",
    "/docs",
    "/health",
    "/live",
    "/ready",
];

fn parse_or<T: FromStr>(
    value: Option<String>,
    default: T,
    message: &str,
) -> Result<T, anyhow::Error> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} (got '{}')", message, raw)),
        None => Ok(default),
    }
}

fn validate_download_path(path: &str) -> Result<(), anyhow::Error> {
    if !path.starts_with('/') {
        return Err(anyhow::anyhow!(
            "PUBLIC_DOWNLOAD_PATH must be an absolute path starting with '/'"
        ));
    }

    let segments_ok = path[1..].split('/').all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    });
    if !segments_ok {
        return Err(anyhow::anyhow!(
            "PUBLIC_DOWNLOAD_PATH segments may only contain letters, digits, '-', '_' and '.' (got '{}')",
            path
        ));
    }

    if let Some(reserved) = RESERVED_ROUTE_PATHS
        .iter()
        .copied()
        .find(|&reserved| is_same_or_under(path, reserved) || is_same_or_under(reserved, path))
    {
        return Err(anyhow::anyhow!(
            "PUBLIC_DOWNLOAD_PATH '{}' collides with the API route '{}'",
            path,
            reserved
        ));
    }

    Ok(())
}

/// Whether `inner` is `outer` itself or one of its sub-paths.
fn is_same_or_under(inner: &str, outer: &str) -> bool {
    inner == outer || (inner.starts_with(outer) && inner[outer.len()..].starts_with('/'))
}

fn is_production_environment(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

impl StatementsConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source. Missing values fall
    /// back to their defaults; values that are present but malformed are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: parse_or(lookup("PORT"), SERVER_PORT, "PORT must be a valid number")?,
            cors_origins,
            environment,
            http_concurrency_limit: parse_or(
                lookup("HTTP_CONCURRENCY_LIMIT"),
                HTTP_CONCURRENCY_LIMIT,
                "HTTP_CONCURRENCY_LIMIT must be a whole number",
            )?,
            log_format: lookup("LOG_FORMAT")
                .unwrap_or_else(|| "pretty".to_string())
                .to_lowercase(),
        };

        let config = StatementsConfig {
            base,
            token_ttl_seconds: parse_or(
                lookup("STATEMENT_TOKEN_TTL_SECONDS"),
                STATEMENT_TOKEN_TTL_SECONDS,
                "STATEMENT_TOKEN_TTL_SECONDS must be a whole number of seconds",
            )?,
            token_sweep_interval_secs: parse_or(
                lookup("TOKEN_SWEEP_INTERVAL_SECS"),
                TOKEN_SWEEP_INTERVAL_SECS,
                "TOKEN_SWEEP_INTERVAL_SECS must be a whole number of seconds",
            )?,
            store_shard_count: parse_or(
                lookup("STORE_SHARD_COUNT"),
                STORE_SHARD_COUNT,
                "STORE_SHARD_COUNT must be a whole number",
            )?,
            public_download_path: lookup("PUBLIC_DOWNLOAD_PATH")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_PUBLIC_DOWNLOAD_PATH.to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if is_production_environment(&self.base.environment)
            && self.base.cors_origins.iter().any(|origin| origin == "*")
        {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.token_ttl_seconds == 0 {
            return Err(anyhow::anyhow!(
                "STATEMENT_TOKEN_TTL_SECONDS must be greater than 0"
            ));
        }

        if self.token_sweep_interval_secs == 0 {
            return Err(anyhow::anyhow!(
                "TOKEN_SWEEP_INTERVAL_SECS must be greater than 0"
            ));
        }

        if self.store_shard_count == 0 {
            return Err(anyhow::anyhow!("STORE_SHARD_COUNT must be greater than 0"));
        }

        if self.base.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!(
                "HTTP_CONCURRENCY_LIMIT must be greater than 0"
            ));
        }

        validate_download_path(&self.public_download_path)?;

        if !matches!(self.base.log_format.as_str(), "pretty" | "json") {
            return Err(anyhow::anyhow!("LOG_FORMAT must be 'pretty' or 'json'"));
        }

        Ok(())
    }
}

//! Application configuration
//!
//! Loaded from environment variables, with a `.env` file picked up in development.

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub session: SessionConfig,
    pub guard: GuardConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Apply pending migrations at startup
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

/// Session cookie settings
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Set the `Secure` attribute; defaults to on in production
    pub secure: bool,
}

/// Path tables for the page route guard
#[derive(Debug, Clone, Deserialize)]
pub struct GuardConfig {
    pub protected_prefixes: Vec<String>,
    pub public_only_paths: Vec<String>,
    pub login_path: String,
    pub company_landing: String,
    pub cfo_landing: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            protected_prefixes: default_protected_prefixes(),
            public_only_paths: default_public_only_paths(),
            login_path: default_login_path(),
            company_landing: default_company_landing(),
            cfo_landing: default_cfo_landing(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Avatar uploads and static frontend assets
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub upload_dir: String,
    pub max_file_size_mb: u64,
    /// Built frontend served for every path the API does not handle
    pub frontend_dir: Option<String>,
}

impl StorageConfig {
    #[must_use]
    pub fn max_file_size_bytes(&self) -> usize {
        usize::try_from(self.max_file_size_mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "rextrix".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_access_token_expiry() -> i64 {
    3600 // 1 hour
}

fn default_refresh_token_expiry() -> i64 {
    2_592_000 // 30 days
}

fn default_cookie_name() -> String {
    "rextrix.session-token".to_string()
}

fn default_protected_prefixes() -> Vec<String> {
    [
        "/dashboard",
        "/profile",
        "/messages",
        "/scout",
        "/discover",
        "/contracts",
        "/invoices",
        "/settings",
        "/meetings",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_public_only_paths() -> Vec<String> {
    vec!["/auth/login".to_string(), "/auth/register".to_string()]
}

fn default_login_path() -> String {
    "/auth/login".to_string()
}

fn default_company_landing() -> String {
    "/discover/cfos".to_string()
}

fn default_cfo_landing() -> String {
    "/discover/companies".to_string()
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

fn default_max_file_size() -> u64 {
    5
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Variable source, so tests can feed a map instead of the process environment
struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, name: &'static str) -> Result<String, ConfigError> {
        self.get(name).ok_or(ConfigError::MissingVar(name))
    }

    /// A required connection URL whose scheme must be one of `schemes`
    fn url(&self, name: &'static str, schemes: &[&str]) -> Result<String, ConfigError> {
        let raw = self.required(name)?;
        match url::Url::parse(raw.trim()) {
            Ok(parsed) if schemes.contains(&parsed.scheme()) => Ok(raw.trim().to_string()),
            _ => Err(ConfigError::InvalidValue(name, raw)),
        }
    }

    fn parsed<T: FromStr>(&self, name: &'static str, default: impl FnOnce() -> T) -> Result<T, ConfigError> {
        match self.get(name) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(name, raw)),
            None => Ok(default()),
        }
    }

    fn string(&self, name: &str, default: impl FnOnce() -> String) -> String {
        self.get(name).unwrap_or_else(default)
    }

    fn list(&self, name: &str, default: impl FnOnce() -> Vec<String>) -> Vec<String> {
        self.get(name).map_or_else(default, |raw| split_list(&raw))
    }

    fn flag(&self, name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match self.get(name) {
            None => Ok(default),
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue(name, raw)),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };
        let environment: Environment = vars.parsed("APP_ENV", Environment::default)?;

        Ok(Self {
            app: AppSettings {
                name: vars.string("APP_NAME", default_app_name),
                env: environment,
            },
            api: ServerConfig {
                host: vars.string("API_HOST", default_host),
                port: vars.parsed("API_PORT", default_port)?,
            },
            database: DatabaseConfig {
                url: vars.url("DATABASE_URL", &["postgres", "postgresql"])?,
                max_connections: vars.parsed("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: vars.parsed("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                run_migrations: vars.flag("RUN_MIGRATIONS", false)?,
            },
            redis: RedisConfig {
                url: vars.url("REDIS_URL", &["redis", "rediss", "redis+unix"])?,
                max_connections: vars.parsed("REDIS_MAX_CONNECTIONS", default_redis_max_connections)?,
            },
            jwt: JwtConfig {
                secret: vars.required("JWT_SECRET")?,
                access_token_expiry: vars
                    .parsed("JWT_ACCESS_TOKEN_EXPIRY", default_access_token_expiry)?,
                refresh_token_expiry: vars
                    .parsed("JWT_REFRESH_TOKEN_EXPIRY", default_refresh_token_expiry)?,
            },
            session: SessionConfig {
                cookie_name: vars.string("SESSION_COOKIE_NAME", default_cookie_name),
                secure: vars.flag("SESSION_COOKIE_SECURE", environment.is_production())?,
            },
            guard: GuardConfig {
                protected_prefixes: vars.list("GUARD_PROTECTED_PREFIXES", default_protected_prefixes),
                public_only_paths: vars.list("GUARD_PUBLIC_ONLY_PATHS", default_public_only_paths),
                login_path: vars.string("GUARD_LOGIN_PATH", default_login_path),
                company_landing: vars.string("GUARD_COMPANY_LANDING", default_company_landing),
                cfo_landing: vars.string("GUARD_CFO_LANDING", default_cfo_landing),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: vars
                    .parsed("RATE_LIMIT_REQUESTS_PER_SECOND", default_requests_per_second)?,
                burst: vars.parsed("RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: vars.list("CORS_ALLOWED_ORIGINS", Vec::new),
            },
            storage: StorageConfig {
                upload_dir: vars.string("UPLOAD_DIR", default_upload_dir),
                max_file_size_mb: vars.parsed("MAX_FILE_SIZE_MB", default_max_file_size)?,
                frontend_dir: vars.get("FRONTEND_DIR"),
            },
            snowflake: SnowflakeConfig {
                worker_id: vars.parsed("WORKER_ID", || 0)?,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

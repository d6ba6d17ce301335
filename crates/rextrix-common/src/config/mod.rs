//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, GuardConfig,
    JwtConfig, RateLimitConfig, RedisConfig, ServerConfig, SessionConfig, SnowflakeConfig,
    StorageConfig,
};

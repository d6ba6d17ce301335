//! # rextrix-common
//!
//! Shared utilities: configuration, error handling, session tokens, password hashing,
//! the page route guard, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    hash_password, validate_password_strength, verify_password, Claims, JwtService, TokenPair,
    TokenType,
};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, GuardConfig,
    JwtConfig, RateLimitConfig, RedisConfig, ServerConfig, SessionConfig, SnowflakeConfig,
    StorageConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use guard::{GuardDecision, RouteGuard};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};

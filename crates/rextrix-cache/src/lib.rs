//! # rextrix-cache
//!
//! Redis layer holding login sessions.
//!
//! Every login creates a session entry keyed by the session id carried in both JWTs.
//! Refreshing rotates the entry; logging out or deactivating an account removes it.
//!
//! ```ignore
//! use rextrix_cache::{RedisPool, RedisPoolConfig, RefreshTokenData, RefreshTokenStore};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let store = RefreshTokenStore::with_ttl(pool, 30 * 24 * 60 * 60);
//! store.store(&session_id, &RefreshTokenData::new(user_id, session_id.clone())).await?;
//! ```

pub mod pool;
pub mod session;

pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
pub use session::{RefreshTokenData, RefreshTokenStore};

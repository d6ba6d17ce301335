//! Login sessions stored in Redis.
//!
//! One entry per session id, plus a per-user set of session ids so every
//! session of an account can be dropped at once.

use redis::AsyncCommands;
use rextrix_core::Snowflake;
use serde::{Deserialize, Serialize};

use crate::pool::{RedisPool, RedisResult};

const SESSION_PREFIX: &str = "rextrix:refresh:";
const USER_SESSIONS_PREFIX: &str = "rextrix:user_sessions:";

/// 30 days
const DEFAULT_REFRESH_TOKEN_TTL: u64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenData {
    pub user_id: Snowflake,
    pub session_id: String,
    /// Unix epoch seconds
    pub created_at: i64,
    pub user_agent: Option<String>,
}

impl RefreshTokenData {
    #[must_use]
    pub fn new(user_id: Snowflake, session_id: String) -> Self {
        Self {
            user_id,
            session_id,
            created_at: chrono::Utc::now().timestamp(),
            user_agent: None,
        }
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct RefreshTokenStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl RefreshTokenStore {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self::with_ttl(pool, DEFAULT_REFRESH_TOKEN_TTL)
    }

    #[must_use]
    pub fn with_ttl(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    fn key(session_id: &str) -> String {
        format!("{SESSION_PREFIX}{session_id}")
    }

    fn user_key(user_id: Snowflake) -> String {
        format!("{USER_SESSIONS_PREFIX}{user_id}")
    }

    pub async fn store(&self, session_id: &str, data: &RefreshTokenData) -> RedisResult<()> {
        let serialized = serde_json::to_string(data)?;
        let user_key = Self::user_key(data.user_id);
        let ttl = i64::try_from(self.ttl_seconds).unwrap_or(i64::MAX);

        let mut conn = self.pool.get().await?;
        redis::pipe()
            .atomic()
            .set_ex(Self::key(session_id), serialized, self.ttl_seconds)
            .ignore()
            .sadd(&user_key, session_id)
            .ignore()
            .expire(&user_key, ttl)
            .ignore()
            .query_async::<()>(&mut conn)
            .await?;

        tracing::debug!(user_id = %data.user_id, session_id = %session_id, "Stored session");
        Ok(())
    }

    /// Session data, or `None` once revoked or expired
    pub async fn get(&self, session_id: &str) -> RedisResult<Option<RefreshTokenData>> {
        self.pool.get_value(&Self::key(session_id)).await
    }

    pub async fn revoke(&self, session_id: &str) -> RedisResult<bool> {
        let Some(data) = self.get(session_id).await? else {
            return Ok(false);
        };

        let mut conn = self.pool.get().await?;
        let (deleted,): (i64,) = redis::pipe()
            .atomic()
            .del(Self::key(session_id))
            .srem(Self::user_key(data.user_id), session_id)
            .ignore()
            .query_async(&mut conn)
            .await?;

        if deleted > 0 {
            tracing::debug!(session_id = %session_id, "Revoked session");
        }
        Ok(deleted > 0)
    }

    /// Drops every session of a user. Returns how many were tracked.
    pub async fn revoke_all_for_user(&self, user_id: Snowflake) -> RedisResult<usize> {
        let user_key = Self::user_key(user_id);
        let mut conn = self.pool.get().await?;

        let session_ids: Vec<String> = conn.smembers(&user_key).await?;
        let mut pipe = redis::pipe();
        pipe.atomic();
        for session_id in &session_ids {
            pipe.del(Self::key(session_id)).ignore();
        }
        pipe.del(&user_key).ignore();
        pipe.query_async::<()>(&mut conn).await?;

        tracing::info!(user_id = %user_id, count = session_ids.len(), "Revoked all sessions");
        Ok(session_ids.len())
    }
}

//! PostgreSQL implementation of InterestRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use rextrix_core::{DomainError, Interest, InterestRepository, RepoResult, Snowflake};

use crate::models::InterestModel;

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgInterestRepository {
    pool: PgPool,
}

impl PgInterestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterestRepository for PgInterestRepository {
    #[instrument(skip(self))]
    async fn create(&self, interest: &Interest) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO interests (liker_id, target_id, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(interest.liker_id.into_inner())
        .bind(interest.target_id.into_inner())
        .bind(interest.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::InterestAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, liker_id: Snowflake, target_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM interests WHERE liker_id = $1 AND target_id = $2
            ",
        )
        .bind(liker_id.into_inner())
        .bind(target_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn exists(&self, liker_id: Snowflake, target_id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM interests WHERE liker_id = $1 AND target_id = $2)
            ",
        )
        .bind(liker_id.into_inner())
        .bind(target_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list_by_liker(&self, liker_id: Snowflake) -> RepoResult<Vec<Interest>> {
        let rows = sqlx::query_as::<_, InterestModel>(
            r"
            SELECT liker_id, target_id, created_at
            FROM interests
            WHERE liker_id = $1
            ORDER BY created_at DESC, target_id DESC
            ",
        )
        .bind(liker_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Interest::from).collect())
    }
}

//! PostgreSQL implementation of ScoutRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use rextrix_core::{DomainError, RepoResult, Scout, ScoutRepository, ScoutStatus, Snowflake};

use crate::models::ScoutModel;

use super::error::{map_db_error, map_rows, map_unique_violation};

const SCOUT_COLUMNS: &str =
    "id, sender_id, recipient_id, title, message, status, created_at, updated_at";

#[derive(Clone)]
pub struct PgScoutRepository {
    pool: PgPool,
}

impl PgScoutRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoutRepository for PgScoutRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Scout>> {
        let result = sqlx::query_as::<_, ScoutModel>(&format!(
            "SELECT {SCOUT_COLUMNS} FROM scouts WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Scout::try_from).transpose()
    }

    #[instrument(skip(self, scout), fields(scout_id = %scout.id))]
    async fn create(&self, scout: &Scout) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO scouts (id, sender_id, recipient_id, title, message, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(scout.id.into_inner())
        .bind(scout.sender_id.into_inner())
        .bind(scout.recipient_id.into_inner())
        .bind(&scout.title)
        .bind(&scout.message)
        .bind(scout.status.as_str())
        .bind(scout.created_at)
        .bind(scout.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ScoutAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_sent(&self, sender_id: Snowflake) -> RepoResult<Vec<Scout>> {
        let rows = sqlx::query_as::<_, ScoutModel>(&format!(
            "SELECT {SCOUT_COLUMNS} FROM scouts WHERE sender_id = $1 ORDER BY id DESC"
        ))
        .bind(sender_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_rows(rows)
    }

    #[instrument(skip(self))]
    async fn list_received(&self, recipient_id: Snowflake) -> RepoResult<Vec<Scout>> {
        let rows = sqlx::query_as::<_, ScoutModel>(&format!(
            "SELECT {SCOUT_COLUMNS} FROM scouts WHERE recipient_id = $1 ORDER BY id DESC"
        ))
        .bind(recipient_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_rows(rows)
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: Snowflake, status: ScoutStatus) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE scouts SET status = $2, updated_at = NOW() WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ScoutNotFound(id));
        }

        Ok(())
    }
}

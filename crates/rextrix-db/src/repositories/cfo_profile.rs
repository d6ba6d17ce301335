//! PostgreSQL implementation of CfoProfileRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};

use rextrix_core::{CfoFilter, CfoProfile, CfoProfileRepository, RepoResult, Snowflake};

use crate::models::CfoProfileModel;

use super::error::{map_db_error, map_rows};

const SELECT_PROFILE: &str = r"
    SELECT c.user_id, c.display_name, c.prefecture, c.location, c.skills, c.bio,
           c.experience_years, c.compensation_type, c.monthly_fee_min, c.monthly_fee_max,
           c.hourly_fee_min, c.hourly_fee_max, c.compensation_text, c.weekly_days,
           c.availability_text, u.avatar_url, c.created_at, c.updated_at
    FROM cfo_profiles c
    JOIN users u ON u.id = c.user_id
";

#[derive(Clone)]
pub struct PgCfoProfileRepository {
    pool: PgPool,
}

impl PgCfoProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// SQL pre-filter for a search.
///
/// Every clause is looser than the matching rule in `CfoFilter::matches` because rows
/// whose structured columns are empty may still match once their legacy text is
/// normalized. The caller must re-check each row.
pub(crate) fn build_search_query(filter: &CfoFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(SELECT_PROFILE);
    qb.push(" WHERE u.user_type = 'cfo' AND u.status = 'active'");

    if let Some(band) = filter.compensation {
        qb.push(" AND (c.compensation_type IS NULL OR c.compensation_type = ")
            .push_bind(band.compensation_type().as_str())
            .push(")");
    }

    if let Some(days) = filter.min_weekly_days {
        qb.push(" AND (c.weekly_days IS NULL OR c.weekly_days >= ")
            .push_bind(i16::from(days))
            .push(")");
    }

    if !filter.skills.is_empty() {
        qb.push(" AND c.skills @> ").push_bind(filter.skills.clone());
    }

    if let Some(prefecture) = filter.prefecture {
        qb.push(" AND (TRIM(c.prefecture) IN (")
            .push_bind(prefecture.as_str())
            .push(", ")
            .push_bind(prefecture.short_name())
            .push(") OR c.location LIKE '%' || ")
            .push_bind(prefecture.short_name())
            .push(" || '%')");
    }

    qb.push(" ORDER BY c.updated_at DESC, c.user_id DESC");
    qb
}

#[async_trait]
impl CfoProfileRepository for PgCfoProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<CfoProfile>> {
        let result = sqlx::query_as::<_, CfoProfileModel>(&format!(
            "{SELECT_PROFILE} WHERE c.user_id = $1"
        ))
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(CfoProfile::try_from).transpose()
    }

    #[instrument(skip(self, profile), fields(user_id = %profile.user_id))]
    async fn upsert(&self, profile: &CfoProfile) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO cfo_profiles (
                user_id, display_name, prefecture, location, skills, bio, experience_years,
                compensation_type, monthly_fee_min, monthly_fee_max, hourly_fee_min,
                hourly_fee_max, compensation_text, weekly_days, availability_text,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ON CONFLICT (user_id) DO UPDATE SET
                display_name = EXCLUDED.display_name,
                prefecture = EXCLUDED.prefecture,
                location = EXCLUDED.location,
                skills = EXCLUDED.skills,
                bio = EXCLUDED.bio,
                experience_years = EXCLUDED.experience_years,
                compensation_type = EXCLUDED.compensation_type,
                monthly_fee_min = EXCLUDED.monthly_fee_min,
                monthly_fee_max = EXCLUDED.monthly_fee_max,
                hourly_fee_min = EXCLUDED.hourly_fee_min,
                hourly_fee_max = EXCLUDED.hourly_fee_max,
                compensation_text = EXCLUDED.compensation_text,
                weekly_days = EXCLUDED.weekly_days,
                availability_text = EXCLUDED.availability_text,
                updated_at = NOW()
            ",
        )
        .bind(profile.user_id.into_inner())
        .bind(&profile.display_name)
        .bind(profile.prefecture.map(|p| p.as_str()))
        .bind(&profile.location)
        .bind(&profile.skills)
        .bind(&profile.bio)
        .bind(profile.experience_years)
        .bind(profile.compensation_type.map(|t| t.as_str()))
        .bind(profile.monthly_fee_min)
        .bind(profile.monthly_fee_max)
        .bind(profile.hourly_fee_min)
        .bind(profile.hourly_fee_max)
        .bind(&profile.compensation_text)
        .bind(profile.weekly_days.map(i16::from))
        .bind(&profile.availability_text)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn search(&self, filter: &CfoFilter) -> RepoResult<Vec<CfoProfile>> {
        let mut qb = build_search_query(filter);
        let rows = qb
            .build_query_as::<CfoProfileModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        debug!(candidates = rows.len(), "CFO search pre-filter");
        map_rows(rows)
    }
}

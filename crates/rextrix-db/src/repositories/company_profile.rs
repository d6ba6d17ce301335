//! PostgreSQL implementation of CompanyProfileRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use rextrix_core::{CompanyProfile, CompanyProfileRepository, PageQuery, RepoResult, Snowflake};

use crate::models::CompanyProfileModel;

use super::error::{map_db_error, map_rows};

const SELECT_PROFILE: &str = r"
    SELECT p.user_id, p.company_name, p.industry, p.prefecture, p.employee_count,
           p.description, p.challenges, p.website_url, u.avatar_url, p.created_at, p.updated_at
    FROM company_profiles p
    JOIN users u ON u.id = p.user_id
";

#[derive(Clone)]
pub struct PgCompanyProfileRepository {
    pool: PgPool,
}

impl PgCompanyProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyProfileRepository for PgCompanyProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<CompanyProfile>> {
        let result = sqlx::query_as::<_, CompanyProfileModel>(&format!(
            "{SELECT_PROFILE} WHERE p.user_id = $1"
        ))
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(CompanyProfile::try_from).transpose()
    }

    #[instrument(skip(self, profile), fields(user_id = %profile.user_id))]
    async fn upsert(&self, profile: &CompanyProfile) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO company_profiles (
                user_id, company_name, industry, prefecture, employee_count, description,
                challenges, website_url, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (user_id) DO UPDATE SET
                company_name = EXCLUDED.company_name,
                industry = EXCLUDED.industry,
                prefecture = EXCLUDED.prefecture,
                employee_count = EXCLUDED.employee_count,
                description = EXCLUDED.description,
                challenges = EXCLUDED.challenges,
                website_url = EXCLUDED.website_url,
                updated_at = NOW()
            ",
        )
        .bind(profile.user_id.into_inner())
        .bind(&profile.company_name)
        .bind(&profile.industry)
        .bind(profile.prefecture.map(|p| p.as_str()))
        .bind(profile.employee_count)
        .bind(&profile.description)
        .bind(&profile.challenges)
        .bind(&profile.website_url)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, page: PageQuery) -> RepoResult<(Vec<CompanyProfile>, i64)> {
        let rows = sqlx::query_as::<_, CompanyProfileModel>(&format!(
            r"{SELECT_PROFILE}
            WHERE u.user_type = 'company' AND u.status = 'active'
            ORDER BY p.updated_at DESC, p.user_id DESC
            LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM company_profiles p
            JOIN users u ON u.id = p.user_id
            WHERE u.user_type = 'company' AND u.status = 'active'
            ",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok((map_rows(rows)?, total))
    }
}

//! PostgreSQL implementation of ContractRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use rextrix_core::{Contract, ContractRepository, ContractStatus, DomainError, RepoResult, Snowflake};

use crate::models::ContractModel;

use super::error::{map_db_error, map_rows};

const CONTRACT_COLUMNS: &str = "id, company_id, cfo_id, scout_id, monthly_fee, start_date, \
                                end_date, status, created_at, updated_at";

#[derive(Clone)]
pub struct PgContractRepository {
    pool: PgPool,
}

impl PgContractRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContractRepository for PgContractRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Contract>> {
        let result = sqlx::query_as::<_, ContractModel>(&format!(
            "SELECT {CONTRACT_COLUMNS} FROM contracts WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Contract::try_from).transpose()
    }

    #[instrument(skip(self, contract), fields(contract_id = %contract.id))]
    async fn create(&self, contract: &Contract) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO contracts (id, company_id, cfo_id, scout_id, monthly_fee, start_date,
                                   end_date, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(contract.id.into_inner())
        .bind(contract.company_id.into_inner())
        .bind(contract.cfo_id.into_inner())
        .bind(contract.scout_id.map(|s| s.into_inner()))
        .bind(contract.monthly_fee)
        .bind(contract.start_date)
        .bind(contract.end_date)
        .bind(contract.status.as_str())
        .bind(contract.created_at)
        .bind(contract.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<Contract>> {
        let rows = sqlx::query_as::<_, ContractModel>(&format!(
            "SELECT {CONTRACT_COLUMNS} FROM contracts \
             WHERE company_id = $1 OR cfo_id = $1 ORDER BY id DESC"
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_rows(rows)
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: Snowflake, status: ContractStatus) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE contracts SET status = $2, updated_at = NOW() WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ContractNotFound(id));
        }

        Ok(())
    }
}

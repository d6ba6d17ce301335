//! PostgreSQL implementation of InvoiceRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use rextrix_core::{DomainError, Invoice, InvoiceRepository, InvoiceStatus, RepoResult, Snowflake};

use crate::models::InvoiceModel;

use super::error::{map_db_error, map_rows};

const INVOICE_COLUMNS: &str = "id, contract_id, amount, tax_amount, period_start, period_end, \
                               due_date, status, created_at, updated_at";

#[derive(Clone)]
pub struct PgInvoiceRepository {
    pool: PgPool,
}

impl PgInvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceRepository for PgInvoiceRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Invoice>> {
        let result = sqlx::query_as::<_, InvoiceModel>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Invoice::try_from).transpose()
    }

    #[instrument(skip(self, invoice), fields(invoice_id = %invoice.id))]
    async fn create(&self, invoice: &Invoice) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO invoices (id, contract_id, amount, tax_amount, period_start, period_end,
                                  due_date, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(invoice.id.into_inner())
        .bind(invoice.contract_id.into_inner())
        .bind(invoice.amount)
        .bind(invoice.tax_amount)
        .bind(invoice.period_start)
        .bind(invoice.period_end)
        .bind(invoice.due_date)
        .bind(invoice.status.as_str())
        .bind(invoice.created_at)
        .bind(invoice.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_by_contract(&self, contract_id: Snowflake) -> RepoResult<Vec<Invoice>> {
        let rows = sqlx::query_as::<_, InvoiceModel>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices \
             WHERE contract_id = $1 ORDER BY period_start, id"
        ))
        .bind(contract_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_rows(rows)
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: Snowflake, status: InvoiceStatus) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE invoices SET status = $2, updated_at = NOW() WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::InvoiceNotFound(id));
        }

        Ok(())
    }
}

//! Invoice service
//!
//! The contract's CFO bills the company. The CFO drafts, issues and cancels
//! invoices; the company marks them paid.

use rextrix_core::{Contract, ContractStatus, DomainError, Invoice, InvoiceStatus, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CreateInvoiceRequest, InvoiceResponse, UpdateInvoiceRequest};

use super::context::ServiceContext;
use super::contract::ContractService;
use super::error::{ServiceError, ServiceResult};

pub struct InvoiceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InvoiceService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Invoices of a contract, ordered by billing period
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        user_id: Snowflake,
        contract_id: Snowflake,
    ) -> ServiceResult<Vec<InvoiceResponse>> {
        ContractService::new(self.ctx)
            .party_contract(user_id, contract_id)
            .await?;
        let invoices = self.ctx.invoice_repo().list_by_contract(contract_id).await?;
        Ok(invoices.iter().map(InvoiceResponse::from).collect())
    }

    #[instrument(skip(self, request), fields(amount = request.amount))]
    pub async fn create(
        &self,
        user_id: Snowflake,
        contract_id: Snowflake,
        request: CreateInvoiceRequest,
    ) -> ServiceResult<InvoiceResponse> {
        let contract = ContractService::new(self.ctx)
            .party_contract(user_id, contract_id)
            .await?;
        if contract.cfo_id != user_id {
            return Err(ServiceError::permission_denied(
                "only the contract's cfo can bill it",
            ));
        }
        if contract.status != ContractStatus::Active {
            return Err(DomainError::NotAllowed("contract is not active".into()).into());
        }

        let invoice = Invoice::new(
            self.ctx.generate_id(),
            contract.id,
            request.amount,
            request.period_start,
            request.period_end,
            request.due_date,
        )?;
        self.ctx.invoice_repo().create(&invoice).await?;

        info!(invoice_id = %invoice.id, contract_id = %contract.id, "Invoice drafted");
        Ok(InvoiceResponse::from(&invoice))
    }

    #[instrument(skip(self, request), fields(status = %request.status))]
    pub async fn update_status(
        &self,
        user_id: Snowflake,
        invoice_id: Snowflake,
        request: UpdateInvoiceRequest,
    ) -> ServiceResult<InvoiceResponse> {
        let mut invoice = self
            .ctx
            .invoice_repo()
            .find_by_id(invoice_id)
            .await?
            .ok_or(DomainError::InvoiceNotFound(invoice_id))?;
        let contract = ContractService::new(self.ctx)
            .party_contract(user_id, invoice.contract_id)
            .await?;

        ensure_may_set(&contract, user_id, request.status)?;
        invoice.transition(request.status)?;
        self.ctx
            .invoice_repo()
            .update_status(invoice.id, invoice.status)
            .await?;

        info!(invoice_id = %invoice.id, status = %invoice.status, "Invoice updated");
        Ok(InvoiceResponse::from(&invoice))
    }
}

fn ensure_may_set(contract: &Contract, user_id: Snowflake, next: InvoiceStatus) -> ServiceResult<()> {
    let allowed = match next {
        InvoiceStatus::Paid => contract.company_id == user_id,
        InvoiceStatus::Draft | InvoiceStatus::Issued | InvoiceStatus::Cancelled => {
            contract.cfo_id == user_id
        }
    };
    if allowed {
        Ok(())
    } else {
        Err(ServiceError::permission_denied(format!(
            "not allowed to mark this invoice {next}"
        )))
    }
}

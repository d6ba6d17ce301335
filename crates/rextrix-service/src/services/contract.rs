//! Contract service
//!
//! Companies draft contracts with CFOs. Either party may move a contract
//! through `draft -> active -> completed`, or cancel it before completion.

use rextrix_core::{Contract, DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{ContractResponse, CreateContractRequest, UpdateContractRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::scout::ScoutService;
use super::user::UserService;

pub struct ContractService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ContractService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Contracts the caller is a party to, newest first
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Snowflake) -> ServiceResult<Vec<ContractResponse>> {
        let contracts = self.ctx.contract_repo().list_for_user(user_id).await?;
        Ok(contracts.iter().map(ContractResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(
        &self,
        user_id: Snowflake,
        contract_id: Snowflake,
    ) -> ServiceResult<ContractResponse> {
        let contract = self.party_contract(user_id, contract_id).await?;
        Ok(ContractResponse::from(&contract))
    }

    #[instrument(skip(self, request), fields(cfo_id = %request.cfo_id))]
    pub async fn create(
        &self,
        company_id: Snowflake,
        request: CreateContractRequest,
    ) -> ServiceResult<ContractResponse> {
        let users = UserService::new(self.ctx);
        if !users.find(company_id).await?.is_company() {
            return Err(DomainError::WrongUserType("company").into());
        }

        let mut contract = Contract::new(
            self.ctx.generate_id(),
            company_id,
            request.cfo_id,
            request.monthly_fee,
            request.start_date,
            request.end_date,
        )?;

        let cfo = users.find(request.cfo_id).await?;
        if !cfo.is_cfo() {
            return Err(DomainError::NotAllowed("contracts can only be made with cfo accounts".into()).into());
        }
        if !cfo.is_active() {
            return Err(DomainError::NotAllowed("cfo account is not active".into()).into());
        }

        if let Some(scout_id) = request.scout_id {
            let accepted = ScoutService::new(self.ctx)
                .is_accepted_between(scout_id, company_id, cfo.id)
                .await?;
            if !accepted {
                return Err(DomainError::NotAllowed(
                    "scout must be accepted and between the same parties".into(),
                )
                .into());
            }
            contract.scout_id = Some(scout_id);
        }

        self.ctx.contract_repo().create(&contract).await?;

        info!(contract_id = %contract.id, "Contract drafted");
        Ok(ContractResponse::from(&contract))
    }

    #[instrument(skip(self, request), fields(status = %request.status))]
    pub async fn update_status(
        &self,
        user_id: Snowflake,
        contract_id: Snowflake,
        request: UpdateContractRequest,
    ) -> ServiceResult<ContractResponse> {
        let mut contract = self.party_contract(user_id, contract_id).await?;
        contract.transition(request.status)?;
        self.ctx
            .contract_repo()
            .update_status(contract.id, contract.status)
            .await?;

        info!(contract_id = %contract.id, status = %contract.status, "Contract updated");
        Ok(ContractResponse::from(&contract))
    }

    /// Loads a contract the caller is a party to
    pub(crate) async fn party_contract(
        &self,
        user_id: Snowflake,
        contract_id: Snowflake,
    ) -> ServiceResult<Contract> {
        let contract = self
            .ctx
            .contract_repo()
            .find_by_id(contract_id)
            .await?
            .ok_or(DomainError::ContractNotFound(contract_id))?;
        contract.ensure_party(user_id)?;
        Ok(contract)
    }
}

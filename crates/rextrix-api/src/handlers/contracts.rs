//! Contract handlers

use axum::extract::State;
use rextrix_service::dto::{ContractResponse, CreateContractRequest, UpdateContractRequest};
use rextrix_service::ContractService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// GET /api/contracts
pub async fn list_contracts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<ApiJson<Vec<ContractResponse>>> {
    let service = ContractService::new(state.service_context());
    Ok(ApiJson(service.list(auth.user_id).await?))
}

/// POST /api/contracts
pub async fn create_contract(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateContractRequest>,
) -> ApiResult<Created<ApiJson<ContractResponse>>> {
    let service = ContractService::new(state.service_context());
    let contract = service.create(auth.user_id, request).await?;
    Ok(Created(ApiJson(contract)))
}

/// GET /api/contracts/:id
pub async fn get_contract(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(contract_id): IdPath,
) -> ApiResult<ApiJson<ContractResponse>> {
    let service = ContractService::new(state.service_context());
    Ok(ApiJson(service.get(auth.user_id, contract_id).await?))
}

/// PATCH /api/contracts/:id
pub async fn update_contract(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(contract_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateContractRequest>,
) -> ApiResult<ApiJson<ContractResponse>> {
    let service = ContractService::new(state.service_context());
    let contract = service
        .update_status(auth.user_id, contract_id, request)
        .await?;
    Ok(ApiJson(contract))
}

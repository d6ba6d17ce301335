//! Company directory handlers

use axum::extract::State;
use rextrix_service::dto::{CompanyProfileResponse, PaginatedResponse, UpsertCompanyProfileRequest};
use rextrix_service::CompanyService;

use crate::extractors::{AuthUser, IdPath, Pagination, ValidatedJson};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// GET /api/companies
pub async fn list_companies(
    State(state): State<AppState>,
    _auth: AuthUser,
    Pagination(page): Pagination,
) -> ApiResult<ApiJson<PaginatedResponse<CompanyProfileResponse>>> {
    let service = CompanyService::new(state.service_context());
    Ok(ApiJson(service.list(page).await?))
}

/// GET /api/companies/:user_id
pub async fn get_company(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<ApiJson<CompanyProfileResponse>> {
    let service = CompanyService::new(state.service_context());
    Ok(ApiJson(service.get(user_id).await?))
}

/// PUT /api/companies/me
pub async fn upsert_own_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpsertCompanyProfileRequest>,
) -> ApiResult<ApiJson<CompanyProfileResponse>> {
    let service = CompanyService::new(state.service_context());
    let response = service.upsert_own(auth.user_id, request).await?;
    Ok(ApiJson(response))
}

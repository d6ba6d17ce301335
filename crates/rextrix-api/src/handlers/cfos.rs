//! CFO directory handlers

use axum::extract::State;
use rextrix_service::dto::{CfoProfileResponse, CfoSearchQuery, PaginatedResponse, UpsertCfoProfileRequest};
use rextrix_service::CfoService;

use crate::extractors::{AuthUser, IdPath, Pagination, QueryParams, ValidatedJson};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// GET /api/cfos?compensation=..&weekly_days=..&skills=a,b&prefecture=..&page=..&per_page=..
pub async fn search_cfos(
    State(state): State<AppState>,
    _auth: AuthUser,
    QueryParams(query): QueryParams<CfoSearchQuery>,
    Pagination(page): Pagination,
) -> ApiResult<ApiJson<PaginatedResponse<CfoProfileResponse>>> {
    let service = CfoService::new(state.service_context());
    let response = service.search(query, page).await?;
    Ok(ApiJson(response))
}

/// GET /api/cfos/:user_id
pub async fn get_cfo(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<ApiJson<CfoProfileResponse>> {
    let service = CfoService::new(state.service_context());
    Ok(ApiJson(service.get(user_id).await?))
}

/// PUT /api/cfos/me
pub async fn upsert_own_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpsertCfoProfileRequest>,
) -> ApiResult<ApiJson<CfoProfileResponse>> {
    let service = CfoService::new(state.service_context());
    let response = service.upsert_own(auth.user_id, request).await?;
    Ok(ApiJson(response))
}

//! Scout handlers

use axum::extract::State;
use rextrix_service::dto::{CreateScoutRequest, ScoutBoxQuery, ScoutResponse, UpdateScoutRequest};
use rextrix_service::ScoutService;

use crate::extractors::{AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// GET /api/scouts?box=sent|received
pub async fn list_scouts(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<ScoutBoxQuery>,
) -> ApiResult<ApiJson<Vec<ScoutResponse>>> {
    let service = ScoutService::new(state.service_context());
    Ok(ApiJson(service.list(auth.user_id, query.mailbox).await?))
}

/// POST /api/scouts
pub async fn create_scout(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateScoutRequest>,
) -> ApiResult<Created<ApiJson<ScoutResponse>>> {
    let service = ScoutService::new(state.service_context());
    let scout = service.create(auth.user_id, request).await?;
    Ok(Created(ApiJson(scout)))
}

/// PATCH /api/scouts/:id
pub async fn update_scout(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(scout_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateScoutRequest>,
) -> ApiResult<ApiJson<ScoutResponse>> {
    let service = ScoutService::new(state.service_context());
    let scout = service.update_status(auth.user_id, scout_id, request).await?;
    Ok(ApiJson(scout))
}

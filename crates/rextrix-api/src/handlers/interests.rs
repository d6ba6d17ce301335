//! Interest ("like") handlers

use axum::extract::State;
use rextrix_service::dto::{CreateInterestRequest, InterestResponse};
use rextrix_service::InterestService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /api/interests
pub async fn list_interests(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<ApiJson<Vec<InterestResponse>>> {
    let service = InterestService::new(state.service_context());
    Ok(ApiJson(service.list(auth.user_id).await?))
}

/// POST /api/interests
pub async fn add_interest(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateInterestRequest>,
) -> ApiResult<Created<ApiJson<InterestResponse>>> {
    let service = InterestService::new(state.service_context());
    let interest = service.add(auth.user_id, request).await?;
    Ok(Created(ApiJson(interest)))
}

/// DELETE /api/interests/:target_id
pub async fn remove_interest(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(target_id): IdPath,
) -> ApiResult<NoContent> {
    let service = InterestService::new(state.service_context());
    service.remove(auth.user_id, target_id).await?;
    Ok(NoContent)
}

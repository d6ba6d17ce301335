//! Current-user handlers
//!
//! Account settings, deactivation and the avatar / company logo upload.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use rextrix_common::AppError;
use rextrix_service::dto::{AvatarResponse, CurrentUserResponse, UpdateUserRequest};
use rextrix_service::{AvatarService, UserService};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiJson, ApiResult, NoContent};
use crate::state::AppState;

/// Multipart field carrying the image
const AVATAR_FIELD: &str = "file";

/// GET /api/users/me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<ApiJson<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_current_user(auth.user_id).await?;
    Ok(ApiJson(response))
}

/// PATCH /api/users/me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<ApiJson<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_current_user(auth.user_id, request).await?;
    Ok(ApiJson(response))
}

/// DELETE /api/users/me
///
/// Deactivates the account and ends every session.
pub async fn deactivate_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> ApiResult<(CookieJar, NoContent)> {
    let service = UserService::new(state.service_context());
    service.deactivate(auth.user_id).await?;

    let cleared = Cookie::build((state.session_cookie_name().to_owned(), String::new()))
        .path("/")
        .build();
    Ok((jar.remove(cleared), NoContent))
}

/// POST /api/users/me/avatar (multipart, field `file`)
pub async fn upload_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<ApiJson<AvatarResponse>> {
    let max_mb = state.service_context().uploads().max_file_size_mb();
    let multipart_error = |e: MultipartError| -> ApiError {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge { max_mb }.into()
        } else {
            ApiError::invalid_body(e.body_text())
        }
    };

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;

        let service = AvatarService::new(state.service_context());
        let response = service.upload(auth.user_id, &content_type, &bytes).await?;
        return Ok(ApiJson(response));
    }

    Err(ApiError::invalid_body(format!(
        "multipart field `{AVATAR_FIELD}` is required"
    )))
}

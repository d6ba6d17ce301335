//! Authentication handlers
//!
//! Login and registration answer with the token pair and also set the access
//! token as an http-only session cookie for the page route guard.

use axum::{extract::State, http::HeaderMap, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use rextrix_service::dto::{
    AuthResponse, LoginRequest, LogoutRequest, LogoutResponse, RefreshTokenRequest,
    RegisterRequest, SessionResponse,
};
use rextrix_service::AuthService;

use super::user_agent;
use crate::extractors::{AuthUser, OptionalAuthUser, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

fn session_cookie(state: &AppState, access_token: &str) -> Cookie<'static> {
    Cookie::build((
        state.session_cookie_name().to_owned(),
        access_token.to_owned(),
    ))
    .path("/")
    .http_only(true)
    .secure(state.config().session.secure)
    .same_site(SameSite::Lax)
    .build()
}

fn cleared_cookie(state: &AppState) -> Cookie<'static> {
    Cookie::build((state.session_cookie_name().to_owned(), String::new()))
        .path("/")
        .build()
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<(CookieJar, Created<ApiJson<AuthResponse>>)> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request, user_agent(&headers)).await?;
    let jar = jar.add(session_cookie(&state, &response.access_token));
    Ok((jar, Created(ApiJson(response))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, ApiJson<AuthResponse>)> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request, user_agent(&headers)).await?;
    let jar = jar.add(session_cookie(&state, &response.access_token));
    Ok((jar, ApiJson(response)))
}

/// POST /api/auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<(CookieJar, ApiJson<AuthResponse>)> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh_tokens(request).await?;
    let jar = jar.add(session_cookie(&state, &response.access_token));
    Ok((jar, ApiJson(response)))
}

/// POST /api/auth/logout
///
/// Always clears the cookie, even when no session could be identified.
pub async fn logout(
    State(state): State<AppState>,
    OptionalAuthUser(claims): OptionalAuthUser,
    jar: CookieJar,
    body: Option<Json<LogoutRequest>>,
) -> ApiResult<(CookieJar, ApiJson<LogoutResponse>)> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let service = AuthService::new(state.service_context());
    let response = service.logout(claims.as_ref(), request).await?;
    let jar = jar.remove(cleared_cookie(&state));
    Ok((jar, ApiJson(response)))
}

/// GET /api/auth/session
pub async fn session(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<ApiJson<SessionResponse>> {
    let service = AuthService::new(state.service_context());
    Ok(ApiJson(service.session(&auth.claims)?))
}

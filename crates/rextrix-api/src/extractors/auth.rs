//! Authentication extractor
//!
//! The access token is read from `Authorization: Bearer` or, failing that,
//! from the session cookie the auth endpoints set.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    extract::cookie::CookieJar,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use rextrix_common::{AppError, Claims};
use rextrix_core::{DomainError, Snowflake};

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated, active user
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Snowflake,
    pub claims: Claims,
}

async fn access_token<S>(parts: &mut Parts, state: &S) -> Option<String>
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    if let Ok(TypedHeader(Authorization(bearer))) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await
    {
        return Some(bearer.token().to_string());
    }

    let app_state = AppState::from_ref(state);
    let jar = CookieJar::from_headers(&parts.headers);
    jar.get(app_state.session_cookie_name())
        .map(|cookie| cookie.value().to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = access_token(parts, state)
            .await
            .ok_or(ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        let claims = app_state
            .jwt_service()
            .validate_access_token(&token)
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::App(e)
            })?;

        if !claims.is_active() {
            return Err(DomainError::AccountInactive.into());
        }

        let user_id = claims.user_id().map_err(|e| {
            tracing::warn!(error = %e, "Invalid user ID in token");
            ApiError::App(AppError::InvalidToken)
        })?;

        Ok(AuthUser { user_id, claims })
    }
}

/// Session claims when a valid token is present
///
/// Never rejects: a missing, expired or malformed token yields `None`, and the
/// account status is not checked.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<Claims>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = access_token(parts, state).await else {
            return Ok(OptionalAuthUser(None));
        };

        let app_state = AppState::from_ref(state);
        let claims = app_state.jwt_service().validate_access_token(&token).ok();
        Ok(OptionalAuthUser(claims))
    }
}

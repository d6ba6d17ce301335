//! Authentication service
//!
//! Handles registration, login, token refresh, logout and the session view.
//! Every login opens a session in the refresh token store; both tokens of a pair
//! carry that session's id.

use chrono::DateTime;
use rextrix_cache::RefreshTokenData;
use rextrix_common::auth::{hash_password, validate_password_strength, verify_password};
use rextrix_common::{AppError, Claims};
use rextrix_core::{CfoProfile, CompanyProfile, DomainError, User, UserType};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{
    AuthResponse, CurrentUserResponse, LoginRequest, LogoutRequest, LogoutResponse,
    RefreshTokenRequest, RegisterRequest, SessionResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account together with an empty profile for its side of the marketplace
    #[instrument(skip(self, request, user_agent), fields(user_type = %request.user_type))]
    pub async fn register(
        &self,
        request: RegisterRequest,
        user_agent: Option<String>,
    ) -> ServiceResult<AuthResponse> {
        validate_password_strength(&request.password)?;

        let email = normalize_email(&request.email);
        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;

        let display_name = request.display_name.trim().to_string();
        if display_name.is_empty() {
            return Err(ServiceError::validation("display_name is required"));
        }

        let user = User::new(
            self.ctx.generate_id(),
            email,
            request.user_type,
            display_name.clone(),
        );
        self.ctx.user_repo().create(&user, &password_hash).await?;

        // Undo the account when its profile cannot be written
        if let Err(e) = self.create_profile(&user, display_name).await {
            warn!(user_id = %user.id, error = %e, "Profile creation failed, removing account");
            if let Err(cleanup) = self.ctx.user_repo().delete(user.id).await {
                warn!(user_id = %user.id, error = %cleanup, "Failed to remove half-registered account");
            }
            return Err(e);
        }

        info!(user_id = %user.id, "User registered successfully");

        self.open_session(&user, user_agent).await
    }

    /// Login with email and password
    #[instrument(skip(self, request, user_agent))]
    pub async fn login(
        &self,
        request: LoginRequest,
        user_agent: Option<String>,
    ) -> ServiceResult<AuthResponse> {
        let email = normalize_email(&request.email);
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidCredentials))?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        if !user.is_active() {
            warn!(user_id = %user.id, status = %user.status, "Login refused for inactive account");
            return Err(DomainError::AccountInactive.into());
        }

        info!(user_id = %user.id, "User logged in successfully");

        self.open_session(&user, user_agent).await
    }

    /// Exchange a refresh token for a new pair. The old session is revoked, so a
    /// refresh token works exactly once.
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        let store = self.ctx.refresh_token_store();
        let session = store
            .get(&claims.session_id)
            .await
            .map_err(ServiceError::cache)?
            .filter(|data| data.user_id == user_id)
            .ok_or_else(|| {
                warn!(user_id = %user_id, "Refresh with revoked or unknown session");
                ServiceError::App(AppError::InvalidToken)
            })?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        // Only the caller that actually deletes the session may rotate it
        let revoked = store
            .revoke(&claims.session_id)
            .await
            .map_err(ServiceError::cache)?;
        if !revoked {
            warn!(user_id = %user_id, "Refresh lost a concurrent rotation");
            return Err(ServiceError::App(AppError::InvalidToken));
        }

        // Status may have changed since the pair was issued
        if !user.is_active() {
            return Err(DomainError::AccountInactive.into());
        }

        info!(user_id = %user_id, "Session rotated");

        self.open_session(&user, session.user_agent).await
    }

    /// Revoke the current session, or every session of the user with `all`.
    ///
    /// Without an access token the session named by the body's refresh token is
    /// revoked; with neither this is a no-op.
    #[instrument(skip(self, claims, request))]
    pub async fn logout(
        &self,
        claims: Option<&Claims>,
        request: LogoutRequest,
    ) -> ServiceResult<LogoutResponse> {
        let store = self.ctx.refresh_token_store();

        let from_refresh = match (&claims, request.refresh_token.as_deref()) {
            (None, Some(token)) => self.ctx.jwt_service().validate_refresh_token(token).ok(),
            _ => None,
        };
        let Some(claims) = claims.or(from_refresh.as_ref()) else {
            return Ok(LogoutResponse { revoked_sessions: 0 });
        };

        let revoked_sessions = if request.all {
            store
                .revoke_all_for_user(claims.user_id()?)
                .await
                .map_err(ServiceError::cache)?
        } else {
            usize::from(
                store
                    .revoke(&claims.session_id)
                    .await
                    .map_err(ServiceError::cache)?,
            )
        };

        info!(user_id = %claims.sub, revoked_sessions, "User logged out");
        Ok(LogoutResponse { revoked_sessions })
    }

    /// The session the request was made with
    pub fn session(&self, claims: &Claims) -> ServiceResult<SessionResponse> {
        let expires_at =
            DateTime::from_timestamp(claims.exp, 0).ok_or(ServiceError::App(AppError::InvalidToken))?;
        Ok(SessionResponse {
            user_id: claims.sub.clone(),
            email: claims.email.clone(),
            user_type: claims.user_type,
            status: claims.status,
            session_id: claims.session_id.clone(),
            expires_at,
        })
    }

    async fn create_profile(&self, user: &User, display_name: String) -> ServiceResult<()> {
        match user.user_type {
            UserType::Cfo => {
                self.ctx
                    .cfo_profile_repo()
                    .upsert(&CfoProfile::new(user.id, display_name))
                    .await?;
            }
            UserType::Company => {
                self.ctx
                    .company_profile_repo()
                    .upsert(&CompanyProfile::new(user.id, display_name))
                    .await?;
            }
        }
        Ok(())
    }

    async fn open_session(
        &self,
        user: &User,
        user_agent: Option<String>,
    ) -> ServiceResult<AuthResponse> {
        let session_id = Uuid::new_v4().to_string();
        let token_pair = self.ctx.jwt_service().generate_token_pair(user, &session_id)?;

        let mut data = RefreshTokenData::new(user.id, session_id.clone());
        if let Some(agent) = user_agent {
            data = data.with_user_agent(agent);
        }
        self.ctx
            .refresh_token_store()
            .store(&session_id, &data)
            .await
            .map_err(ServiceError::cache)?;

        Ok(AuthResponse::new(
            token_pair.access_token,
            token_pair.refresh_token,
            token_pair.expires_in,
            CurrentUserResponse::from(user),
        ))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

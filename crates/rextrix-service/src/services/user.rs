//! User service
//!
//! Handles the caller's own account: read, edit, and deactivation.

use rextrix_core::{DomainError, Snowflake, User, UserStatus};
use tracing::{info, instrument};

use crate::dto::{CurrentUserResponse, UpdateUserRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load a user or fail with `UNKNOWN_USER`
    pub(crate) async fn find(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }

    /// Get the current authenticated user
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = self.find(user_id).await?;
        Ok(CurrentUserResponse::from(&user))
    }

    /// Update the current user
    #[instrument(skip(self, request))]
    pub async fn update_current_user(
        &self,
        user_id: Snowflake,
        request: UpdateUserRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        let mut user = self.find(user_id).await?;

        if let Some(display_name) = request.display_name {
            let display_name = display_name.trim();
            if display_name.is_empty() {
                return Err(ServiceError::validation("display_name must not be blank"));
            }
            user.set_display_name(display_name.to_string());
        }

        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user_id, "User updated");

        Ok(CurrentUserResponse::from(&user))
    }

    /// Soft-disable the account and drop all of its sessions
    #[instrument(skip(self))]
    pub async fn deactivate(&self, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx
            .user_repo()
            .set_status(user_id, UserStatus::Inactive)
            .await?;

        let revoked = self
            .ctx
            .refresh_token_store()
            .revoke_all_for_user(user_id)
            .await
            .map_err(ServiceError::cache)?;

        info!(user_id = %user_id, revoked, "User deactivated");
        Ok(())
    }
}

//! Interest ("like") service

use rextrix_core::{DomainError, Interest, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CreateInterestRequest, InterestResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::user::UserService;

pub struct InterestService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InterestService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Snowflake) -> ServiceResult<Vec<InterestResponse>> {
        let interests = self.ctx.interest_repo().list_by_liker(user_id).await?;
        Ok(interests.iter().map(InterestResponse::from).collect())
    }

    #[instrument(skip(self, request), fields(target_id = %request.target_id))]
    pub async fn add(
        &self,
        user_id: Snowflake,
        request: CreateInterestRequest,
    ) -> ServiceResult<InterestResponse> {
        let interest = Interest::new(user_id, request.target_id)?;
        UserService::new(self.ctx).find(request.target_id).await?;

        self.ctx.interest_repo().create(&interest).await?;

        info!(user_id = %user_id, target_id = %interest.target_id, "Interest added");
        Ok(InterestResponse::from(&interest))
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, user_id: Snowflake, target_id: Snowflake) -> ServiceResult<()> {
        let deleted = self.ctx.interest_repo().delete(user_id, target_id).await?;
        if !deleted {
            return Err(DomainError::InterestNotFound.into());
        }
        info!(user_id = %user_id, target_id = %target_id, "Interest removed");
        Ok(())
    }
}

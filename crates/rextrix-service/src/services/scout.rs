//! Scout service
//!
//! A scout goes from one side of the marketplace to the other. Each
//! `(sender, recipient)` pair can be scouted once; the database rejects repeats.

use rextrix_core::{DomainError, Scout, ScoutStatus, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CreateScoutRequest, ScoutBox, ScoutResponse, UpdateScoutRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::user::UserService;

pub struct ScoutService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ScoutService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        user_id: Snowflake,
        mailbox: ScoutBox,
    ) -> ServiceResult<Vec<ScoutResponse>> {
        let repo = self.ctx.scout_repo();
        let scouts = match mailbox {
            ScoutBox::Sent => repo.list_sent(user_id).await?,
            ScoutBox::Received => repo.list_received(user_id).await?,
        };
        Ok(scouts.iter().map(ScoutResponse::from).collect())
    }

    #[instrument(skip(self, request), fields(recipient_id = %request.recipient_id))]
    pub async fn create(
        &self,
        sender_id: Snowflake,
        request: CreateScoutRequest,
    ) -> ServiceResult<ScoutResponse> {
        let users = UserService::new(self.ctx);
        let sender = users.find(sender_id).await?;

        let scout = Scout::new(
            self.ctx.generate_id(),
            sender_id,
            request.recipient_id,
            request.title.trim().to_string(),
            request.message.trim().to_string(),
        )?;

        let recipient = users.find(request.recipient_id).await?;
        if recipient.user_type != sender.user_type.counterpart() {
            return Err(DomainError::NotAllowed(format!(
                "{} accounts can only scout {} accounts",
                sender.user_type,
                sender.user_type.counterpart()
            ))
            .into());
        }
        if !recipient.is_active() {
            return Err(DomainError::NotAllowed("recipient account is not active".into()).into());
        }

        self.ctx.scout_repo().create(&scout).await?;

        info!(scout_id = %scout.id, "Scout sent");
        Ok(ScoutResponse::from(&scout))
    }

    /// Recipient accepts or declines; sender withdraws
    #[instrument(skip(self, request), fields(status = %request.status))]
    pub async fn update_status(
        &self,
        user_id: Snowflake,
        scout_id: Snowflake,
        request: UpdateScoutRequest,
    ) -> ServiceResult<ScoutResponse> {
        let mut scout = self
            .ctx
            .scout_repo()
            .find_by_id(scout_id)
            .await?
            .ok_or(DomainError::ScoutNotFound(scout_id))?;

        scout.transition(user_id, request.status)?;
        self.ctx
            .scout_repo()
            .update_status(scout.id, scout.status)
            .await?;

        info!(scout_id = %scout.id, status = %scout.status, "Scout updated");
        Ok(ScoutResponse::from(&scout))
    }

    /// Whether `scout_id` is an accepted scout between these two users
    pub(crate) async fn is_accepted_between(
        &self,
        scout_id: Snowflake,
        a: Snowflake,
        b: Snowflake,
    ) -> ServiceResult<bool> {
        let scout = self
            .ctx
            .scout_repo()
            .find_by_id(scout_id)
            .await?
            .ok_or(DomainError::ScoutNotFound(scout_id))?;
        let pair_matches = (scout.sender_id == a && scout.recipient_id == b)
            || (scout.sender_id == b && scout.recipient_id == a);
        Ok(pair_matches && scout.status == ScoutStatus::Accepted)
    }
}

//! Conversation service
//!
//! One conversation per pair of users. Starting a conversation with someone you
//! already talk to reuses the existing one.

use rextrix_core::{Conversation, DomainError, Message, MessageQuery, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    ConversationResponse, MarkReadResponse, MessageHistoryQuery, MessageResponse,
    SendMessageRequest, StartConversationRequest, StartConversationResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::user::UserService;

pub struct ConversationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConversationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's inbox, most recently active first
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Snowflake) -> ServiceResult<Vec<ConversationResponse>> {
        let summaries = self.ctx.conversation_repo().list_for_user(user_id).await?;
        Ok(summaries
            .iter()
            .map(|s| ConversationResponse::for_viewer(s, user_id))
            .collect())
    }

    /// Open (or reuse) the conversation with `recipient_id` and post the first message
    #[instrument(skip(self, request), fields(recipient_id = %request.recipient_id))]
    pub async fn start(
        &self,
        sender_id: Snowflake,
        request: StartConversationRequest,
    ) -> ServiceResult<StartConversationResponse> {
        if sender_id == request.recipient_id {
            return Err(DomainError::CannotTargetSelf.into());
        }
        let recipient = UserService::new(self.ctx).find(request.recipient_id).await?;
        if !recipient.is_active() {
            return Err(DomainError::NotAllowed("recipient account is not active".into()).into());
        }

        let conversation = self.find_or_create(sender_id, recipient.id).await?;
        let message = self.post(&conversation, sender_id, request.content).await?;

        Ok(StartConversationResponse {
            conversation_id: conversation.id.to_string(),
            message,
        })
    }

    /// Messages oldest first, at most `limit`, older than `before` when given
    #[instrument(skip(self, query))]
    pub async fn list_messages(
        &self,
        user_id: Snowflake,
        conversation_id: Snowflake,
        query: MessageHistoryQuery,
    ) -> ServiceResult<Vec<MessageResponse>> {
        self.participant_conversation(user_id, conversation_id).await?;

        let messages = self
            .ctx
            .message_repo()
            .list(
                conversation_id,
                MessageQuery {
                    before: query.before,
                    limit: query.limit(),
                },
            )
            .await?;
        Ok(messages.iter().map(MessageResponse::from).collect())
    }

    #[instrument(skip(self, request))]
    pub async fn send(
        &self,
        user_id: Snowflake,
        conversation_id: Snowflake,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let conversation = self.participant_conversation(user_id, conversation_id).await?;
        self.post(&conversation, user_id, request.content).await
    }

    /// Marks the other participant's messages read
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        user_id: Snowflake,
        conversation_id: Snowflake,
    ) -> ServiceResult<MarkReadResponse> {
        self.participant_conversation(user_id, conversation_id).await?;
        let updated = self
            .ctx
            .message_repo()
            .mark_read(conversation_id, user_id)
            .await?;
        Ok(MarkReadResponse { updated })
    }

    async fn participant_conversation(
        &self,
        user_id: Snowflake,
        conversation_id: Snowflake,
    ) -> ServiceResult<Conversation> {
        let conversation = self
            .ctx
            .conversation_repo()
            .find_by_id(conversation_id)
            .await?
            .ok_or(DomainError::ConversationNotFound(conversation_id))?;
        conversation.ensure_participant(user_id)?;
        Ok(conversation)
    }

    async fn find_or_create(&self, a: Snowflake, b: Snowflake) -> ServiceResult<Conversation> {
        let repo = self.ctx.conversation_repo();
        if let Some(existing) = repo.find_by_pair(a, b).await? {
            return Ok(existing);
        }

        let conversation = Conversation::new(self.ctx.generate_id(), a, b)?;
        match repo.create(&conversation).await {
            Ok(()) => {
                info!(conversation_id = %conversation.id, "Conversation opened");
                Ok(conversation)
            }
            // Lost the race against the other participant
            Err(DomainError::ConversationAlreadyExists) => repo
                .find_by_pair(a, b)
                .await?
                .ok_or_else(|| DomainError::ConversationAlreadyExists.into()),
            Err(e) => Err(e.into()),
        }
    }

    async fn post(
        &self,
        conversation: &Conversation,
        sender_id: Snowflake,
        content: String,
    ) -> ServiceResult<MessageResponse> {
        let message = Message::new(self.ctx.generate_id(), conversation.id, sender_id, content)?;
        self.ctx.message_repo().create(&message).await?;
        Ok(MessageResponse::from(&message))
    }
}

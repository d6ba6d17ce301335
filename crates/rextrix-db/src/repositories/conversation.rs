//! PostgreSQL implementation of ConversationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use rextrix_core::{
    Conversation, ConversationRepository, ConversationSummary, DomainError, RepoResult, Snowflake,
};

use crate::models::{ConversationModel, ConversationSummaryModel};

use super::error::{map_db_error, map_rows, map_unique_violation};

#[derive(Clone)]
pub struct PgConversationRepository {
    pool: PgPool,
}

impl PgConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for PgConversationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Conversation>> {
        let result = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT id, participant_low, participant_high, last_message_at, created_at
            FROM conversations
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Conversation::from))
    }

    #[instrument(skip(self))]
    async fn find_by_pair(&self, a: Snowflake, b: Snowflake) -> RepoResult<Option<Conversation>> {
        let (low, high) = Conversation::ordered_pair(a, b);

        let result = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT id, participant_low, participant_high, last_message_at, created_at
            FROM conversations
            WHERE participant_low = $1 AND participant_high = $2
            ",
        )
        .bind(low.into_inner())
        .bind(high.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Conversation::from))
    }

    #[instrument(skip(self, conversation), fields(conversation_id = %conversation.id))]
    async fn create(&self, conversation: &Conversation) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO conversations (id, participant_low, participant_high, last_message_at, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(conversation.id.into_inner())
        .bind(conversation.participant_low.into_inner())
        .bind(conversation.participant_high.into_inner())
        .bind(conversation.last_message_at)
        .bind(conversation.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ConversationAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<ConversationSummary>> {
        let rows = sqlx::query_as::<_, ConversationSummaryModel>(
            r"
            SELECT c.id, c.participant_low, c.participant_high, c.last_message_at, c.created_at,
                   lm.id AS last_message_id,
                   lm.sender_id AS last_sender_id,
                   lm.content AS last_content,
                   lm.read_at AS last_read_at,
                   lm.created_at AS last_created_at,
                   (
                       SELECT COUNT(*)
                       FROM messages m
                       WHERE m.conversation_id = c.id
                         AND m.sender_id <> $1
                         AND m.read_at IS NULL
                   ) AS unread_count
            FROM conversations c
            LEFT JOIN LATERAL (
                SELECT id, sender_id, content, read_at, created_at
                FROM messages
                WHERE conversation_id = c.id
                ORDER BY id DESC
                LIMIT 1
            ) lm ON TRUE
            WHERE c.participant_low = $1 OR c.participant_high = $1
            ORDER BY COALESCE(c.last_message_at, c.created_at) DESC, c.id DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_rows(rows)
    }
}

//! Conversation and message database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ConversationModel {
    pub id: i64,
    pub participant_low: i64,
    pub participant_high: i64,
    pub last_message_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub conversation_id: i64,
    pub sender_id: i64,
    pub content: String,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Inbox row: conversation plus its latest message and the viewer's unread count
#[derive(Debug, Clone, FromRow)]
pub struct ConversationSummaryModel {
    #[sqlx(flatten)]
    pub conversation: ConversationModel,
    pub last_message_id: Option<i64>,
    pub last_sender_id: Option<i64>,
    pub last_content: Option<String>,
    pub last_read_at: Option<DateTime<Utc>>,
    pub last_created_at: Option<DateTime<Utc>>,
    pub unread_count: i64,
}

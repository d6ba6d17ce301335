//! Conversation and message models -> entities

use rextrix_core::{Conversation, ConversationSummary, DomainError, Message, Snowflake};

use crate::models::{ConversationModel, ConversationSummaryModel, MessageModel};

impl From<ConversationModel> for Conversation {
    fn from(model: ConversationModel) -> Self {
        Conversation {
            id: Snowflake::new(model.id),
            participant_low: Snowflake::new(model.participant_low),
            participant_high: Snowflake::new(model.participant_high),
            last_message_at: model.last_message_at,
            created_at: model.created_at,
        }
    }
}

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: Snowflake::new(model.id),
            conversation_id: Snowflake::new(model.conversation_id),
            sender_id: Snowflake::new(model.sender_id),
            content: model.content,
            read_at: model.read_at,
            created_at: model.created_at,
        }
    }
}

impl TryFrom<ConversationSummaryModel> for ConversationSummary {
    type Error = DomainError;

    fn try_from(model: ConversationSummaryModel) -> Result<Self, Self::Error> {
        let conversation = Conversation::from(model.conversation);
        let last_message = match (
            model.last_message_id,
            model.last_sender_id,
            model.last_content,
            model.last_created_at,
        ) {
            (Some(id), Some(sender_id), Some(content), Some(created_at)) => Some(Message {
                id: Snowflake::new(id),
                conversation_id: conversation.id,
                sender_id: Snowflake::new(sender_id),
                content,
                read_at: model.last_read_at,
                created_at,
            }),
            (None, None, None, None) => None,
            _ => {
                return Err(DomainError::DatabaseError(
                    "incomplete last message row".to_string(),
                ))
            }
        };

        Ok(ConversationSummary {
            conversation,
            last_message,
            unread_count: model.unread_count,
        })
    }
}

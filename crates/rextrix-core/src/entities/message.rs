//! Message - one entry in a conversation

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub conversation_id: Snowflake,
    pub sender_id: Snowflake,
    pub content: String,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Maximum content length in characters
    pub const MAX_CONTENT_LENGTH: usize = 5000;

    pub fn new(
        id: Snowflake,
        conversation_id: Snowflake,
        sender_id: Snowflake,
        content: String,
    ) -> Result<Self, DomainError> {
        Self::validate_content(&content)?;
        Ok(Self {
            id,
            conversation_id,
            sender_id,
            content,
            read_at: None,
            created_at: Utc::now(),
        })
    }

    pub fn validate_content(content: &str) -> Result<(), DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Message content cannot be empty".to_string(),
            ));
        }
        if content.chars().count() > Self::MAX_CONTENT_LENGTH {
            return Err(DomainError::ContentTooLong {
                max: Self::MAX_CONTENT_LENGTH,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    /// Truncated preview on a char boundary, for conversation lists
    pub fn preview(&self, max_chars: usize) -> String {
        match self.content.char_indices().nth(max_chars) {
            Some((end, _)) => format!("{}…", &self.content[..end]),
            None => self.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(content: &str) -> Result<Message, DomainError> {
        Message::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            content.to_string(),
        )
    }

    #[test]
    fn test_content_validation() {
        assert!(message("はじめまして").is_ok());
        assert!(message("   ").is_err());
        assert!(matches!(
            message(&"あ".repeat(Message::MAX_CONTENT_LENGTH + 1)),
            Err(DomainError::ContentTooLong { .. })
        ));
        assert!(message(&"あ".repeat(Message::MAX_CONTENT_LENGTH)).is_ok());
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let m = message("こんにちは世界").unwrap();
        assert_eq!(m.preview(5), "こんにちは…");
        assert_eq!(m.preview(50), "こんにちは世界");
        assert!(!m.is_read());
    }
}

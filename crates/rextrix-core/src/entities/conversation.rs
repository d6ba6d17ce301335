//! Conversation - a private thread between exactly two users

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Participants are stored ordered (`participant_low < participant_high`) so each
/// unordered pair maps to one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: Snowflake,
    pub participant_low: Snowflake,
    pub participant_high: Snowflake,
    pub last_message_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(id: Snowflake, a: Snowflake, b: Snowflake) -> Result<Self, DomainError> {
        if a == b {
            return Err(DomainError::CannotTargetSelf);
        }
        let (participant_low, participant_high) = Self::ordered_pair(a, b);
        Ok(Self {
            id,
            participant_low,
            participant_high,
            last_message_at: None,
            created_at: Utc::now(),
        })
    }

    /// Canonical ordering of an unordered pair
    #[inline]
    pub fn ordered_pair(a: Snowflake, b: Snowflake) -> (Snowflake, Snowflake) {
        if a < b {
            (a, b)
        } else {
            (b, a)
        }
    }

    #[inline]
    pub fn has_participant(&self, user_id: Snowflake) -> bool {
        self.participant_low == user_id || self.participant_high == user_id
    }

    /// The other side of the thread, or `None` if `user_id` is not a participant
    pub fn other_participant(&self, user_id: Snowflake) -> Option<Snowflake> {
        if user_id == self.participant_low {
            Some(self.participant_high)
        } else if user_id == self.participant_high {
            Some(self.participant_low)
        } else {
            None
        }
    }

    pub fn ensure_participant(&self, user_id: Snowflake) -> Result<(), DomainError> {
        if self.has_participant(user_id) {
            Ok(())
        } else {
            Err(DomainError::NotParticipant)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_is_normalized() {
        let c = Conversation::new(Snowflake::new(1), Snowflake::new(9), Snowflake::new(3)).unwrap();
        assert_eq!(c.participant_low, Snowflake::new(3));
        assert_eq!(c.participant_high, Snowflake::new(9));
        assert_eq!(
            Conversation::ordered_pair(Snowflake::new(3), Snowflake::new(9)),
            Conversation::ordered_pair(Snowflake::new(9), Snowflake::new(3))
        );
    }

    #[test]
    fn test_rejects_self_conversation() {
        let err = Conversation::new(Snowflake::new(1), Snowflake::new(5), Snowflake::new(5));
        assert!(matches!(err, Err(DomainError::CannotTargetSelf)));
    }

    #[test]
    fn test_participants() {
        let c = Conversation::new(Snowflake::new(1), Snowflake::new(2), Snowflake::new(3)).unwrap();
        assert_eq!(c.other_participant(Snowflake::new(2)), Some(Snowflake::new(3)));
        assert_eq!(c.other_participant(Snowflake::new(3)), Some(Snowflake::new(2)));
        assert_eq!(c.other_participant(Snowflake::new(4)), None);
        assert!(c.ensure_participant(Snowflake::new(4)).is_err());
    }
}

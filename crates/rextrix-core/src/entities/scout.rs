//! Scout - a direct outreach from one user to another

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScoutStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
    Withdrawn,
}

impl ScoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Only a pending scout can change state
    pub fn can_transition_to(&self, next: Self) -> bool {
        *self == Self::Pending && next != Self::Pending
    }
}

impl FromStr for ScoutStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            "withdrawn" => Ok(Self::Withdrawn),
            other => Err(format!("unknown scout status: {other}")),
        }
    }
}

impl fmt::Display for ScoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scout {
    pub id: Snowflake,
    pub sender_id: Snowflake,
    pub recipient_id: Snowflake,
    pub title: String,
    pub message: String,
    pub status: ScoutStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Scout {
    pub const MAX_TITLE_LENGTH: usize = 100;
    pub const MAX_MESSAGE_LENGTH: usize = 2000;

    pub fn new(
        id: Snowflake,
        sender_id: Snowflake,
        recipient_id: Snowflake,
        title: String,
        message: String,
    ) -> Result<Self, DomainError> {
        if sender_id == recipient_id {
            return Err(DomainError::CannotTargetSelf);
        }
        if title.trim().is_empty() || message.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "title and message are required".to_string(),
            ));
        }
        if title.chars().count() > Self::MAX_TITLE_LENGTH {
            return Err(DomainError::ContentTooLong {
                max: Self::MAX_TITLE_LENGTH,
            });
        }
        if message.chars().count() > Self::MAX_MESSAGE_LENGTH {
            return Err(DomainError::ContentTooLong {
                max: Self::MAX_MESSAGE_LENGTH,
            });
        }
        let now = Utc::now();
        Ok(Self {
            id,
            sender_id,
            recipient_id,
            title,
            message,
            status: ScoutStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Moves the scout to `next` on behalf of `actor`.
    ///
    /// The recipient accepts or declines; the sender withdraws.
    pub fn transition(&mut self, actor: Snowflake, next: ScoutStatus) -> Result<(), DomainError> {
        if actor != self.sender_id && actor != self.recipient_id {
            return Err(DomainError::NotParticipant);
        }
        let allowed_actor = match next {
            ScoutStatus::Accepted | ScoutStatus::Declined => self.recipient_id,
            ScoutStatus::Withdrawn => self.sender_id,
            ScoutStatus::Pending => return Err(self.invalid_transition(next)),
        };
        if actor != allowed_actor {
            return Err(DomainError::NotAllowed(format!(
                "only the {} can mark a scout {next}",
                if next == ScoutStatus::Withdrawn { "sender" } else { "recipient" },
            )));
        }
        if !self.status.can_transition_to(next) {
            return Err(self.invalid_transition(next));
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn invalid_transition(&self, next: ScoutStatus) -> DomainError {
        DomainError::InvalidStatusTransition {
            from: self.status.to_string(),
            to: next.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENDER: Snowflake = Snowflake::new(1);
    const RECIPIENT: Snowflake = Snowflake::new(2);

    fn scout() -> Scout {
        Scout::new(
            Snowflake::new(100),
            SENDER,
            RECIPIENT,
            "顧問CFOのご相談".into(),
            "資金調達の支援をお願いしたく".into(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_validates() {
        assert!(matches!(
            Scout::new(Snowflake::new(1), SENDER, SENDER, "t".into(), "m".into()),
            Err(DomainError::CannotTargetSelf)
        ));
        assert!(Scout::new(Snowflake::new(1), SENDER, RECIPIENT, " ".into(), "m".into()).is_err());
        assert_eq!(scout().status, ScoutStatus::Pending);
    }

    #[test]
    fn test_recipient_accepts() {
        let mut s = scout();
        s.transition(RECIPIENT, ScoutStatus::Accepted).unwrap();
        assert_eq!(s.status, ScoutStatus::Accepted);

        // terminal
        assert!(matches!(
            s.transition(RECIPIENT, ScoutStatus::Declined),
            Err(DomainError::InvalidStatusTransition { .. })
        ));
    }

    #[test]
    fn test_sender_cannot_accept_own_scout() {
        let mut s = scout();
        assert!(s.transition(SENDER, ScoutStatus::Accepted).is_err());
        assert!(s.transition(RECIPIENT, ScoutStatus::Withdrawn).is_err());
        s.transition(SENDER, ScoutStatus::Withdrawn).unwrap();
        assert_eq!(s.status, ScoutStatus::Withdrawn);
    }

    #[test]
    fn test_outsider_rejected() {
        let mut s = scout();
        assert!(matches!(
            s.transition(Snowflake::new(3), ScoutStatus::Declined),
            Err(DomainError::NotParticipant)
        ));
    }
}

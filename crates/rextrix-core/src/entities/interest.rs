//! Interest ("like") - a directed bookmark from one user to another

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// At most one interest exists per `(liker_id, target_id)`; the database enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interest {
    pub liker_id: Snowflake,
    pub target_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Interest {
    pub fn new(liker_id: Snowflake, target_id: Snowflake) -> Result<Self, DomainError> {
        if liker_id == target_id {
            return Err(DomainError::CannotTargetSelf);
        }
        Ok(Self {
            liker_id,
            target_id,
            created_at: Utc::now(),
        })
    }
}

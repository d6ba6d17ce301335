//! Contract - an engagement between a company and a CFO

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::Invoice;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    #[default]
    Draft,
    Active,
    Completed,
    Cancelled,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Active | Self::Cancelled)
                | (Self::Active, Self::Completed | Self::Cancelled)
        )
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl FromStr for ContractStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown contract status: {other}")),
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    pub id: Snowflake,
    pub company_id: Snowflake,
    pub cfo_id: Snowflake,
    /// Scout the engagement came out of, if any
    pub scout_id: Option<Snowflake>,
    pub monthly_fee: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: ContractStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contract {
    pub fn new(
        id: Snowflake,
        company_id: Snowflake,
        cfo_id: Snowflake,
        monthly_fee: i64,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, DomainError> {
        if company_id == cfo_id {
            return Err(DomainError::CannotTargetSelf);
        }
        if !(0..=Invoice::MAX_AMOUNT).contains(&monthly_fee) {
            return Err(DomainError::ValidationError(format!(
                "monthly_fee must be between 0 and {}",
                Invoice::MAX_AMOUNT
            )));
        }
        if end_date.is_some_and(|end| end < start_date) {
            return Err(DomainError::ValidationError(
                "end_date must not be before start_date".into(),
            ));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            company_id,
            cfo_id,
            scout_id: None,
            monthly_fee,
            start_date,
            end_date,
            status: ContractStatus::Draft,
            created_at: now,
            updated_at: now,
        })
    }

    #[inline]
    pub fn is_party(&self, user_id: Snowflake) -> bool {
        self.company_id == user_id || self.cfo_id == user_id
    }

    pub fn ensure_party(&self, user_id: Snowflake) -> Result<(), DomainError> {
        if self.is_party(user_id) {
            Ok(())
        } else {
            Err(DomainError::NotParticipant)
        }
    }

    pub fn transition(&mut self, next: ContractStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}

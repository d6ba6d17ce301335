//! Invoice - a billing period under a contract

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Issued,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Issued => "issued",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Issued | Self::Cancelled)
                | (Self::Issued, Self::Paid | Self::Cancelled)
        )
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "issued" => Ok(Self::Issued),
            "paid" => Ok(Self::Paid),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown invoice status: {other}")),
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    pub id: Snowflake,
    pub contract_id: Snowflake,
    /// Amount before tax, in yen
    pub amount: i64,
    pub tax_amount: i64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Consumption tax, percent
    pub const TAX_RATE_PERCENT: i64 = 10;

    /// Largest amount before tax, in yen
    pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

    pub fn new(
        id: Snowflake,
        contract_id: Snowflake,
        amount: i64,
        period_start: NaiveDate,
        period_end: NaiveDate,
        due_date: NaiveDate,
    ) -> Result<Self, DomainError> {
        if !(0..=Self::MAX_AMOUNT).contains(&amount) {
            return Err(DomainError::ValidationError(format!(
                "amount must be between 0 and {}",
                Self::MAX_AMOUNT
            )));
        }
        let tax_amount = Self::tax_for(amount).ok_or_else(|| {
            DomainError::ValidationError("amount is too large to tax".into())
        })?;
        if period_end < period_start {
            return Err(DomainError::ValidationError(
                "period_end must not be before period_start".into(),
            ));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            contract_id,
            amount,
            tax_amount,
            period_start,
            period_end,
            due_date,
            status: InvoiceStatus::Draft,
            created_at: now,
            updated_at: now,
        })
    }

    /// Tax rounded down to the yen, `None` on overflow
    pub fn tax_for(amount: i64) -> Option<i64> {
        amount
            .checked_mul(Self::TAX_RATE_PERCENT)
            .map(|scaled| scaled / 100)
    }

    /// Amount plus tax. Saturates rather than wrapping for rows read back from storage.
    #[inline]
    pub fn total(&self) -> i64 {
        self.amount.saturating_add(self.tax_amount)
    }

    pub fn transition(&mut self, next: InvoiceStatus) -> Result<(), DomainError> {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    #[test]
    fn test_tax_is_rounded_down() {
        let inv = Invoice::new(Snowflake::new(1), Snowflake::new(2), 333_333, date(4, 1), date(4, 30), date(5, 31)).unwrap();
        assert_eq!(inv.tax_amount, 33_333);
        assert_eq!(inv.total(), 366_666);
    }

    #[test]
    fn test_oversized_amount_is_rejected() {
        let err = Invoice::new(Snowflake::new(1), Snowflake::new(2), i64::MAX / 5, date(4, 1), date(4, 30), date(5, 31))
            .unwrap_err();
        assert!(err.is_validation());

        let err = Invoice::new(Snowflake::new(1), Snowflake::new(2), Invoice::MAX_AMOUNT + 1, date(4, 1), date(4, 30), date(5, 31))
            .unwrap_err();
        assert!(err.is_validation());

        let inv = Invoice::new(Snowflake::new(1), Snowflake::new(2), Invoice::MAX_AMOUNT, date(4, 1), date(4, 30), date(5, 31)).unwrap();
        assert_eq!(inv.tax_amount, 100_000_000_000);
        assert_eq!(inv.total(), 1_100_000_000_000);
    }

    #[test]
    fn test_tax_for_reports_overflow() {
        assert_eq!(Invoice::tax_for(500_005), Some(50_000));
        assert_eq!(Invoice::tax_for(i64::MAX), None);
    }

    #[test]
    fn test_period_must_be_ordered() {
        assert!(Invoice::new(Snowflake::new(1), Snowflake::new(2), 1, date(4, 30), date(4, 1), date(5, 31)).is_err());
    }

    #[test]
    fn test_lifecycle() {
        let mut inv = Invoice::new(Snowflake::new(1), Snowflake::new(2), 100, date(4, 1), date(4, 30), date(5, 31)).unwrap();
        assert!(inv.transition(InvoiceStatus::Paid).is_err());
        inv.transition(InvoiceStatus::Issued).unwrap();
        inv.transition(InvoiceStatus::Paid).unwrap();
        assert!(inv.transition(InvoiceStatus::Cancelled).is_err());
    }
}

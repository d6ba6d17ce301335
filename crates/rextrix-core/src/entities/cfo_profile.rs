//! CFO profile - the searchable half of a `cfo` account

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::matching::legacy;
use crate::value_objects::{CompensationType, Prefecture, Snowflake};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CfoProfile {
    pub user_id: Snowflake,
    pub display_name: String,
    pub prefecture: Option<Prefecture>,
    /// Free-text location from older profiles
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub experience_years: Option<i32>,
    pub compensation_type: Option<CompensationType>,
    pub monthly_fee_min: Option<i64>,
    pub monthly_fee_max: Option<i64>,
    pub hourly_fee_min: Option<i64>,
    pub hourly_fee_max: Option<i64>,
    pub compensation_text: Option<String>,
    pub weekly_days: Option<u8>,
    pub availability_text: Option<String>,
    /// Owner's avatar, joined in on reads
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CfoProfile {
    pub fn new(user_id: Snowflake, display_name: String) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            display_name,
            prefecture: None,
            location: None,
            skills: Vec::new(),
            bio: None,
            experience_years: None,
            compensation_type: None,
            monthly_fee_min: None,
            monthly_fee_max: None,
            hourly_fee_min: None,
            hourly_fee_max: None,
            compensation_text: None,
            weekly_days: None,
            availability_text: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Lower bound of the fee for the profile's pricing model, falling back to the upper bound
    pub fn fee_floor(&self) -> Option<i64> {
        match self.compensation_type? {
            CompensationType::Monthly => self.monthly_fee_min.or(self.monthly_fee_max),
            CompensationType::Hourly => self.hourly_fee_min.or(self.hourly_fee_max),
            CompensationType::Negotiable => None,
        }
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    /// Fills structured fields that are still empty from the legacy text columns.
    /// Structured values are never overwritten.
    pub fn normalize_legacy(&mut self) {
        if let Some(parsed) = self
            .compensation_text
            .as_deref()
            .and_then(legacy::parse_compensation)
        {
            let kind = *self.compensation_type.get_or_insert(parsed.kind);
            // Legacy amounts only apply when they describe the same pricing model
            let fees = match kind {
                _ if kind != parsed.kind => None,
                CompensationType::Monthly => Some((&mut self.monthly_fee_min, &mut self.monthly_fee_max)),
                CompensationType::Hourly => Some((&mut self.hourly_fee_min, &mut self.hourly_fee_max)),
                CompensationType::Negotiable => None,
            };
            if let Some((min, max)) = fees {
                if min.is_none() && max.is_none() {
                    *min = parsed.min;
                    *max = parsed.max;
                }
            }
        }

        if self.weekly_days.is_none() {
            self.weekly_days = self
                .availability_text
                .as_deref()
                .and_then(legacy::parse_weekly_days);
        }
        if self.prefecture.is_none() {
            self.prefecture = self.location.as_deref().and_then(Prefecture::find_in);
        }
    }

    /// Checks the structured fields before a write
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.display_name.trim().is_empty() {
            return Err(DomainError::ValidationError("display_name is required".into()));
        }
        if let Some(days) = self.weekly_days {
            if !(1..=7).contains(&days) {
                return Err(DomainError::ValidationError(
                    "weekly_days must be between 1 and 7".into(),
                ));
            }
        }
        if self.experience_years.is_some_and(|y| y < 0) {
            return Err(DomainError::ValidationError(
                "experience_years must not be negative".into(),
            ));
        }
        check_range("monthly_fee", self.monthly_fee_min, self.monthly_fee_max)?;
        check_range("hourly_fee", self.hourly_fee_min, self.hourly_fee_max)
    }
}

fn check_range(field: &str, min: Option<i64>, max: Option<i64>) -> Result<(), DomainError> {
    if min.is_some_and(|v| v < 0) || max.is_some_and(|v| v < 0) {
        return Err(DomainError::ValidationError(format!(
            "{field} must not be negative"
        )));
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(DomainError::ValidationError(format!(
                "{field}_min must not exceed {field}_max"
            )));
        }
    }
    Ok(())
}

//! CFO search filter

use serde::{Deserialize, Serialize};

use crate::entities::CfoProfile;
use crate::value_objects::{CompensationBand, Prefecture};

/// Criteria picked in the CFO search screen. Every criterion left unset matches
/// all profiles; set criteria are ANDed together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CfoFilter {
    pub compensation: Option<CompensationBand>,
    /// Profile must be available at least this many days per week
    pub min_weekly_days: Option<u8>,
    /// Profile must carry every one of these skills
    pub skills: Vec<String>,
    pub prefecture: Option<Prefecture>,
}

impl CfoFilter {
    pub fn is_empty(&self) -> bool {
        self.compensation.is_none()
            && self.min_weekly_days.is_none()
            && self.skills.is_empty()
            && self.prefecture.is_none()
    }

    /// Boolean inclusion test against a profile whose legacy fields have
    /// already been normalized.
    pub fn matches(&self, profile: &CfoProfile) -> bool {
        self.matches_compensation(profile)
            && self.matches_weekly_days(profile)
            && self.skills.iter().all(|skill| profile.has_skill(skill))
            && self.prefecture.is_none_or(|p| profile.prefecture == Some(p))
    }

    fn matches_compensation(&self, profile: &CfoProfile) -> bool {
        let Some(band) = self.compensation else {
            return true;
        };
        profile
            .compensation_type
            .is_some_and(|kind| band.contains(kind, profile.fee_floor()))
    }

    fn matches_weekly_days(&self, profile: &CfoProfile) -> bool {
        match self.min_weekly_days {
            None => true,
            Some(min) => profile.weekly_days.is_some_and(|days| days >= min),
        }
    }
}

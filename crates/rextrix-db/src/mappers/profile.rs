//! Profile models -> entities

use rextrix_core::{CfoProfile, CompanyProfile, DomainError, Prefecture, Snowflake};

use super::parse_column;
use crate::models::{CfoProfileModel, CompanyProfileModel};

/// Older rows may hold free text here; anything that is not a prefecture is dropped
fn lenient_prefecture(raw: Option<&str>) -> Option<Prefecture> {
    raw.and_then(|s| s.parse().ok())
}

impl TryFrom<CfoProfileModel> for CfoProfile {
    type Error = DomainError;

    /// Maps the row and folds legacy text columns into the structured fields
    fn try_from(model: CfoProfileModel) -> Result<Self, Self::Error> {
        let mut profile = CfoProfile {
            user_id: Snowflake::new(model.user_id),
            display_name: model.display_name,
            prefecture: lenient_prefecture(model.prefecture.as_deref()),
            location: model.location,
            skills: model.skills,
            bio: model.bio,
            experience_years: model.experience_years,
            compensation_type: model
                .compensation_type
                .as_deref()
                .map(|raw| parse_column("compensation_type", raw))
                .transpose()?,
            monthly_fee_min: model.monthly_fee_min,
            monthly_fee_max: model.monthly_fee_max,
            hourly_fee_min: model.hourly_fee_min,
            hourly_fee_max: model.hourly_fee_max,
            compensation_text: model.compensation_text,
            weekly_days: model
                .weekly_days
                .and_then(|d| u8::try_from(d).ok())
                .filter(|d| (1..=7).contains(d)),
            availability_text: model.availability_text,
            avatar_url: model.avatar_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        };
        profile.normalize_legacy();
        Ok(profile)
    }
}

impl TryFrom<CompanyProfileModel> for CompanyProfile {
    type Error = DomainError;

    fn try_from(model: CompanyProfileModel) -> Result<Self, Self::Error> {
        Ok(CompanyProfile {
            user_id: Snowflake::new(model.user_id),
            company_name: model.company_name,
            industry: model.industry,
            prefecture: lenient_prefecture(model.prefecture.as_deref()),
            employee_count: model.employee_count,
            description: model.description,
            challenges: model.challenges,
            website_url: model.website_url,
            avatar_url: model.avatar_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

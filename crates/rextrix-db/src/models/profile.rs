//! Profile database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of cfo_profiles joined with the owner's avatar
#[derive(Debug, Clone, FromRow)]
pub struct CfoProfileModel {
    pub user_id: i64,
    pub display_name: String,
    pub prefecture: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub experience_years: Option<i32>,
    pub compensation_type: Option<String>,
    pub monthly_fee_min: Option<i64>,
    pub monthly_fee_max: Option<i64>,
    pub hourly_fee_min: Option<i64>,
    pub hourly_fee_max: Option<i64>,
    pub compensation_text: Option<String>,
    pub weekly_days: Option<i16>,
    pub availability_text: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of company_profiles joined with the owner's avatar
#[derive(Debug, Clone, FromRow)]
pub struct CompanyProfileModel {
    pub user_id: i64,
    pub company_name: String,
    pub industry: Option<String>,
    pub prefecture: Option<String>,
    pub employee_count: Option<i32>,
    pub description: Option<String>,
    pub challenges: Vec<String>,
    pub website_url: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

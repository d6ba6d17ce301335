//! Request DTOs for API endpoints
//!
//! All request bodies implement `Deserialize` and `Validate` for input validation.
//! Query-string DTOs only implement `Deserialize`.

use chrono::NaiveDate;
use rextrix_core::{
    CfoFilter, CompensationBand, CompensationType, ContractStatus, InvoiceStatus, Prefecture,
    ScoutStatus, Snowflake, UserType,
};
use serde::Deserialize;
use validator::Validate;

use crate::services::error::{ServiceError, ServiceResult};

// ============================================================================
// Auth Requests
// ============================================================================

/// Account registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    pub user_type: UserType,

    #[validate(length(min = 1, max = 50, message = "Display name must be 1-50 characters"))]
    pub display_name: String,
}

/// Email/password login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}

/// Logout request
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogoutRequest {
    /// Session to revoke when the request carries no access token
    pub refresh_token: Option<String>,
    /// Revoke every session of the user
    #[serde(default)]
    pub all: bool,
}

// ============================================================================
// User Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 50, message = "Display name must be 1-50 characters"))]
    pub display_name: Option<String>,
}

// ============================================================================
// Profile Requests
// ============================================================================

/// CFO search criteria as they arrive in the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CfoSearchQuery {
    /// Band label (`月額制：200万円以上`) or code (`monthly_2m_plus`)
    pub compensation: Option<String>,
    pub weekly_days: Option<u8>,
    /// Comma separated skill tags
    pub skills: Option<String>,
    pub prefecture: Option<String>,
}

impl CfoSearchQuery {
    /// Parse into the domain filter. Blank parameters count as unset.
    pub fn into_filter(self) -> ServiceResult<CfoFilter> {
        let compensation = non_blank(self.compensation)
            .map(|label| label.parse::<CompensationBand>())
            .transpose()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let prefecture = non_blank(self.prefecture)
            .map(|name| name.parse::<Prefecture>())
            .transpose()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        if let Some(days) = self.weekly_days {
            if !(1..=7).contains(&days) {
                return Err(ServiceError::validation("weekly_days must be between 1 and 7"));
            }
        }

        let skills = self
            .skills
            .as_deref()
            .map(|csv| {
                csv.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(CfoFilter {
            compensation,
            min_weekly_days: self.weekly_days,
            skills,
            prefecture,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Create or replace the caller's CFO profile
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertCfoProfileRequest {
    #[validate(length(min = 1, max = 50, message = "Display name must be 1-50 characters"))]
    pub display_name: String,

    pub prefecture: Option<String>,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    #[serde(default)]
    #[validate(length(max = 30, message = "At most 30 skills"))]
    pub skills: Vec<String>,

    #[validate(length(max = 2000, message = "Bio must be at most 2000 characters"))]
    pub bio: Option<String>,

    #[validate(range(min = 0, max = 80, message = "Experience must be 0-80 years"))]
    pub experience_years: Option<i32>,

    pub compensation_type: Option<CompensationType>,
    #[validate(range(min = 0))]
    pub monthly_fee_min: Option<i64>,
    #[validate(range(min = 0))]
    pub monthly_fee_max: Option<i64>,
    #[validate(range(min = 0))]
    pub hourly_fee_min: Option<i64>,
    #[validate(range(min = 0))]
    pub hourly_fee_max: Option<i64>,

    #[validate(length(max = 200))]
    pub compensation_text: Option<String>,

    #[validate(range(min = 1, max = 7, message = "weekly_days must be between 1 and 7"))]
    pub weekly_days: Option<u8>,

    #[validate(length(max = 200))]
    pub availability_text: Option<String>,
}

/// Create or replace the caller's company profile
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertCompanyProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Company name must be 1-100 characters"))]
    pub company_name: String,

    #[validate(length(max = 100))]
    pub industry: Option<String>,

    pub prefecture: Option<String>,

    #[validate(range(min = 0, message = "employee_count must not be negative"))]
    pub employee_count: Option<i32>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(length(max = 30, message = "At most 30 challenges"))]
    pub challenges: Vec<String>,

    #[validate(url(message = "website_url must be a URL"))]
    pub website_url: Option<String>,
}

/// Parse an optional prefecture name, treating blank as unset
pub(crate) fn parse_prefecture(value: Option<String>) -> ServiceResult<Option<Prefecture>> {
    non_blank(value)
        .map(|name| name.parse::<Prefecture>())
        .transpose()
        .map_err(|e| ServiceError::validation(e.to_string()))
}

// ============================================================================
// Message Requests
// ============================================================================

/// Open a conversation (or reuse the existing one) with a first message
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StartConversationRequest {
    pub recipient_id: Snowflake,

    #[validate(length(min = 1, max = 5000, message = "Message must be 1-5000 characters"))]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 5000, message = "Message must be 1-5000 characters"))]
    pub content: String,
}

/// Message history paging
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageHistoryQuery {
    /// Only messages older than this id
    pub before: Option<Snowflake>,
    pub limit: Option<i64>,
}

impl MessageHistoryQuery {
    pub const DEFAULT_LIMIT: i64 = 50;

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT).clamp(1, 100)
    }
}

// ============================================================================
// Scout / Interest Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateScoutRequest {
    pub recipient_id: Snowflake,

    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateScoutRequest {
    pub status: ScoutStatus,
}

/// Which side of the scout list to show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoutBox {
    Sent,
    #[default]
    Received,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoutBoxQuery {
    #[serde(rename = "box", default)]
    pub mailbox: ScoutBox,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInterestRequest {
    pub target_id: Snowflake,
}

// ============================================================================
// Contract / Invoice Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContractRequest {
    pub cfo_id: Snowflake,

    /// Accepted scout the engagement came out of
    pub scout_id: Option<Snowflake>,

    #[validate(range(
        min = 0_i64,
        max = 1_000_000_000_000_i64,
        message = "monthly_fee must be between 0 and 1,000,000,000,000"
    ))]
    pub monthly_fee: i64,

    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateContractRequest {
    pub status: ContractStatus,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    #[validate(range(
        min = 0_i64,
        max = 1_000_000_000_000_i64,
        message = "amount must be between 0 and 1,000,000,000,000"
    ))]
    pub amount: i64,

    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateInvoiceRequest {
    pub status: InvoiceStatus,
}

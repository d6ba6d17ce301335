//! Test fixtures and data generators
//!
//! Request bodies are built with serde so the tests exercise the wire format,
//! not the server's own DTO types.

use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::helpers::{assert_json, TestServer};

/// Unique suffix so repeated runs against one database never collide
pub fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub user_type: String,
    pub display_name: String,
}

impl RegisterRequest {
    pub fn company() -> Self {
        Self::unique("company")
    }

    pub fn cfo() -> Self {
        Self::unique("cfo")
    }

    fn unique(user_type: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("{user_type}-{suffix}@example.com"),
            password: "TestPass123!".to_string(),
            user_type: user_type.to_string(),
            display_name: format!("Test {user_type}"),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: UserResponse,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub user_type: String,
    pub status: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    pub user_id: String,
    pub user_type: String,
    pub status: String,
}

/// CFO profile upsert body
#[derive(Debug, Serialize)]
pub struct CfoProfileRequest {
    pub display_name: String,
    pub prefecture: Option<String>,
    pub skills: Vec<String>,
    pub compensation_type: Option<String>,
    pub monthly_fee_min: Option<i64>,
    pub monthly_fee_max: Option<i64>,
    pub weekly_days: Option<u8>,
}

impl CfoProfileRequest {
    /// A Tokyo CFO charging 800k-1.2m yen a month, three days a week.
    /// `tag` is added as a skill so searches can single the profile out.
    pub fn tokyo_monthly(tag: &str) -> Self {
        Self {
            display_name: "Tokyo CFO".to_string(),
            prefecture: Some("東京都".to_string()),
            skills: vec!["IPO".to_string(), tag.to_string()],
            compensation_type: Some("monthly".to_string()),
            monthly_fee_min: Some(800_000),
            monthly_fee_max: Some(1_200_000),
            weekly_days: Some(3),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CfoProfileResponse {
    pub user_id: String,
    pub display_name: String,
    pub prefecture: Option<String>,
    pub skills: Vec<String>,
    pub monthly_fee_min: Option<i64>,
    pub weekly_days: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize)]
pub struct StartConversationRequest {
    pub recipient_id: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub content: String,
    pub read_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StartConversationResponse {
    pub conversation_id: String,
    pub message: MessageResponse,
}

#[derive(Debug, Deserialize)]
pub struct ConversationResponse {
    pub id: String,
    pub other_participant_id: String,
    pub unread_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct MarkReadResponse {
    pub updated: u64,
}

#[derive(Debug, Serialize)]
pub struct CreateScoutRequest {
    pub recipient_id: String,
    pub title: String,
    pub message: String,
}

impl CreateScoutRequest {
    pub fn to(recipient_id: &str) -> Self {
        Self {
            recipient_id: recipient_id.to_string(),
            title: "Series B preparation".to_string(),
            message: "We would like to discuss a part-time CFO role.".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusUpdate {
    pub status: String,
}

impl StatusUpdate {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScoutResponse {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct CreateInterestRequest {
    pub target_id: String,
}

#[derive(Debug, Deserialize)]
pub struct InterestResponse {
    pub liker_id: String,
    pub target_id: String,
}

#[derive(Debug, Serialize)]
pub struct CreateContractRequest {
    pub cfo_id: String,
    pub scout_id: Option<String>,
    pub monthly_fee: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl CreateContractRequest {
    pub fn with(cfo_id: &str, scout_id: Option<&str>) -> Self {
        let today = Utc::now().date_naive();
        Self {
            cfo_id: cfo_id.to_string(),
            scout_id: scout_id.map(String::from),
            monthly_fee: 1_000_000,
            start_date: today,
            end_date: Some(today + Duration::days(180)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ContractResponse {
    pub id: String,
    pub company_id: String,
    pub cfo_id: String,
    pub scout_id: Option<String>,
    pub monthly_fee: i64,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct CreateInvoiceRequest {
    pub amount: i64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub due_date: NaiveDate,
}

impl CreateInvoiceRequest {
    pub fn monthly(amount: i64) -> Self {
        let start = Utc::now().date_naive();
        Self {
            amount,
            period_start: start,
            period_end: start + Duration::days(30),
            due_date: start + Duration::days(60),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InvoiceResponse {
    pub id: String,
    pub contract_id: String,
    pub amount: i64,
    pub tax_amount: i64,
    pub total: i64,
    pub status: String,
}

/// A registered account and its tokens
#[derive(Debug)]
pub struct TestAccount {
    pub id: String,
    pub access_token: String,
    pub refresh_token: String,
    pub register: RegisterRequest,
}

impl TestAccount {
    pub async fn register(server: &TestServer, request: RegisterRequest) -> Result<Self> {
        let response = server.post("/api/auth/register", &request).await?;
        let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await?;
        Ok(Self {
            id: auth.user.id,
            access_token: auth.access_token,
            refresh_token: auth.refresh_token,
            register: request,
        })
    }

    pub async fn company(server: &TestServer) -> Result<Self> {
        Self::register(server, RegisterRequest::company()).await
    }

    pub async fn cfo(server: &TestServer) -> Result<Self> {
        Self::register(server, RegisterRequest::cfo()).await
    }
}

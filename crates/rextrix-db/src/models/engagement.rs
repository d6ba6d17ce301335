//! Scout, interest, contract and invoice database models

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ScoutModel {
    pub id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub title: String,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct InterestModel {
    pub liker_id: i64,
    pub target_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ContractModel {
    pub id: i64,
    pub company_id: i64,
    pub cfo_id: i64,
    pub scout_id: Option<i64>,
    pub monthly_fee: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct InvoiceModel {
    pub id: i64,
    pub contract_id: i64,
    pub amount: i64,
    pub tax_amount: i64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub due_date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

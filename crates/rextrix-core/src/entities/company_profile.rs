//! Company profile - the hiring half of a `company` account

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{Prefecture, Snowflake};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyProfile {
    pub user_id: Snowflake,
    pub company_name: String,
    pub industry: Option<String>,
    pub prefecture: Option<Prefecture>,
    pub employee_count: Option<i32>,
    pub description: Option<String>,
    /// Finance problems the company wants a CFO for
    pub challenges: Vec<String>,
    pub website_url: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CompanyProfile {
    pub fn new(user_id: Snowflake, company_name: String) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            company_name,
            industry: None,
            prefecture: None,
            employee_count: None,
            description: None,
            challenges: Vec::new(),
            website_url: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.company_name.trim().is_empty() {
            return Err(DomainError::ValidationError("company_name is required".into()));
        }
        if self.employee_count.is_some_and(|n| n < 0) {
            return Err(DomainError::ValidationError(
                "employee_count must not be negative".into(),
            ));
        }
        if let Some(url) = &self.website_url {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(DomainError::ValidationError(
                    "website_url must be an http(s) URL".into(),
                ));
            }
        }
        Ok(())
    }
}

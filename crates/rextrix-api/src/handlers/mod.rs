//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod cfos;
pub mod companies;
pub mod contracts;
pub mod health;
pub mod interests;
pub mod invoices;
pub mod messages;
pub mod scouts;
pub mod users;

use axum::http::{header, HeaderMap};

/// `User-Agent` of the request, recorded on the session
pub(crate) fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

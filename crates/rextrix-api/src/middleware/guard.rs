//! Page route guard middleware
//!
//! Runs [`RouteGuard::decide`] against the session cookie of every request and
//! answers `307 Temporary Redirect` when the guard says so. API routes are not
//! in the guard's tables and always pass through.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use rextrix_common::{AppConfig, GuardDecision, JwtService, RouteGuard};
use tracing::debug;

/// Everything the guard needs to look at a request
#[derive(Clone)]
pub struct PageGuard {
    guard: Arc<RouteGuard>,
    jwt: Arc<JwtService>,
    cookie_name: Arc<str>,
}

impl PageGuard {
    pub fn new(guard: RouteGuard, jwt: JwtService, cookie_name: &str) -> Self {
        Self {
            guard: Arc::new(guard),
            jwt: Arc::new(jwt),
            cookie_name: Arc::from(cookie_name),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            RouteGuard::new(&config.guard),
            JwtService::new(
                &config.jwt.secret,
                config.jwt.access_token_expiry,
                config.jwt.refresh_token_expiry,
            ),
            &config.session.cookie_name,
        )
    }

    /// Decision for a request target and its cookies.
    /// A missing, undecodable or expired cookie counts as no session.
    pub fn decide(&self, path_and_query: &str, jar: &CookieJar) -> GuardDecision {
        let claims = jar
            .get(&self.cookie_name)
            .and_then(|cookie| self.jwt.validate_access_token(cookie.value()).ok());
        self.guard.decide(path_and_query, claims.as_ref())
    }
}

impl std::fmt::Debug for PageGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageGuard")
            .field("guard", &self.guard)
            .field("cookie_name", &self.cookie_name)
            .finish_non_exhaustive()
    }
}

pub async fn route_guard(
    State(page_guard): State<PageGuard>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let target = request
        .uri()
        .path_and_query()
        .map_or_else(|| request.uri().path().to_string(), ToString::to_string);

    match page_guard.decide(&target, &jar) {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::Redirect(location) => {
            debug!(from = %target, to = %location, "Route guard redirect");
            Redirect::temporary(&location).into_response()
        }
    }
}

//! Decides, per page request, whether the visitor may see the page or must be
//! sent elsewhere. Pure function of the path and the decoded session claims.

use percent_encoding::percent_decode_str;
use rextrix_core::UserType;
use url::form_urlencoded;

use crate::auth::Claims;
use crate::config::GuardConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Redirect to this path (with query)
    Redirect(String),
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    protected_prefixes: Vec<String>,
    public_only_paths: Vec<String>,
    login_path: String,
    company_landing: String,
    cfo_landing: String,
}

impl RouteGuard {
    pub fn new(config: &GuardConfig) -> Self {
        let normalize = |paths: &[String]| {
            paths
                .iter()
                .map(|p| normalize_prefix(p))
                .filter(|p| !p.is_empty())
                .collect()
        };
        Self {
            protected_prefixes: normalize(&config.protected_prefixes),
            public_only_paths: normalize(&config.public_only_paths),
            login_path: config.login_path.clone(),
            company_landing: config.company_landing.clone(),
            cfo_landing: config.cfo_landing.clone(),
        }
    }

    pub fn landing_for(&self, user_type: UserType) -> &str {
        match user_type {
            UserType::Company => &self.company_landing,
            UserType::Cfo => &self.cfo_landing,
        }
    }

    pub fn is_protected(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.protected_prefixes
            .iter()
            .any(|prefix| matches_prefix(&path, prefix))
    }

    pub fn is_public_only(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.public_only_paths
            .iter()
            .any(|prefix| matches_prefix(&path, prefix))
    }

    /// `path_and_query` is the request target as received (`/messages/42?tab=unread`).
    /// `claims` is `None` when there is no session cookie or it failed to decode.
    pub fn decide(&self, path_and_query: &str, claims: Option<&Claims>) -> GuardDecision {
        let path = path_and_query
            .split_once('?')
            .map_or(path_and_query, |(path, _)| path);
        let active = claims.filter(|c| c.is_active());

        if self.is_public_only(path) {
            // Inactive sessions stay here, the landing page would send them straight back
            return match active {
                Some(claims) => GuardDecision::Redirect(self.landing_for(claims.user_type).to_string()),
                None => GuardDecision::Allow,
            };
        }

        if self.is_protected(path) && active.is_none() {
            return GuardDecision::Redirect(self.login_redirect(path_and_query));
        }

        GuardDecision::Allow
    }

    fn login_redirect(&self, callback: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("callbackUrl", callback)
            .finish();
        format!("{}?{query}", self.login_path)
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.starts_with('/') || trimmed.is_empty() {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// The path the page router will resolve: percent-decoded, with empty and `.`
/// segments dropped and `..` applied. `//messages/./42` becomes `/messages/42`.
fn normalize_path(path: &str) -> String {
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Segment-aware prefix match: `/messages` covers `/messages` and `/messages/42`
/// but not `/messages-archive`.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

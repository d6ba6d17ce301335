//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! the configuration and the page route guard.

use std::sync::Arc;

use rextrix_common::{AppConfig, JwtService};
use rextrix_service::ServiceContext;

use crate::middleware::PageGuard;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
    page_guard: PageGuard,
}

impl AppState {
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        let page_guard = PageGuard::from_config(&config);
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            page_guard,
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn page_guard(&self) -> &PageGuard {
        &self.page_guard
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }

    /// Name of the cookie carrying the access token
    pub fn session_cookie_name(&self) -> &str {
        &self.config.session.cookie_name
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .field("page_guard", &self.page_guard)
            .finish()
    }
}

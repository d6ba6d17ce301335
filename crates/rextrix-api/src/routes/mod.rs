//! Route definitions
//!
//! The JSON API is mounted under `/api`. Uploaded files are served under
//! `/uploads`, and when a frontend build directory is configured every other
//! path falls through to it.

use std::path::Path;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{delete, get, patch, post, put},
    Router,
};
use rextrix_common::{AppConfig, AppError};
use rextrix_service::services::avatar::UPLOADS_URL_PREFIX;
use tower_http::services::{ServeDir, ServeFile};

use crate::handlers::{
    auth, cfos, companies, contracts, health, interests, invoices, messages, scouts, users,
};
use crate::response::ApiError;
use crate::state::AppState;

/// Room for multipart framing around the file itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create the main router (health routes are merged separately to bypass rate limiting)
pub fn create_router(config: &AppConfig) -> Router<AppState> {
    let router = Router::new()
        .nest("/api", api_routes(config))
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(&config.storage.upload_dir));

    match &config.storage.frontend_dir {
        Some(dir) => {
            let index = Path::new(dir).join("index.html");
            router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)))
        }
        None => router.fallback(not_found),
    }
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes(config: &AppConfig) -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes(config.storage.max_file_size_bytes()))
        .merge(directory_routes())
        .merge(message_routes())
        .merge(scout_routes())
        .merge(interest_routes())
        .merge(contract_routes())
        .fallback(not_found)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::session))
}

fn user_routes(max_file_size_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/users/me",
            get(users::get_current_user)
                .patch(users::update_current_user)
                .delete(users::deactivate_current_user),
        )
        .route(
            "/users/me/avatar",
            post(users::upload_avatar).layer(DefaultBodyLimit::max(
                max_file_size_bytes + MULTIPART_OVERHEAD_BYTES,
            )),
        )
}

fn directory_routes() -> Router<AppState> {
    Router::new()
        .route("/cfos", get(cfos::search_cfos))
        .route("/cfos/me", put(cfos::upsert_own_profile))
        .route("/cfos/:user_id", get(cfos::get_cfo))
        .route("/companies", get(companies::list_companies))
        .route("/companies/me", put(companies::upsert_own_profile))
        .route("/companies/:user_id", get(companies::get_company))
}

fn message_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/messages",
            get(messages::list_conversations).post(messages::start_conversation),
        )
        .route(
            "/messages/:conversation_id",
            get(messages::get_messages).post(messages::send_message),
        )
        .route("/messages/:conversation_id/read", post(messages::mark_read))
}

fn scout_routes() -> Router<AppState> {
    Router::new()
        .route("/scouts", get(scouts::list_scouts).post(scouts::create_scout))
        .route("/scouts/:id", patch(scouts::update_scout))
}

fn interest_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/interests",
            get(interests::list_interests).post(interests::add_interest),
        )
        .route(
            "/interests/:target_id",
            delete(interests::remove_interest),
        )
}

fn contract_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/contracts",
            get(contracts::list_contracts).post(contracts::create_contract),
        )
        .route(
            "/contracts/:id",
            get(contracts::get_contract).patch(contracts::update_contract),
        )
        .route(
            "/contracts/:id/invoices",
            get(invoices::list_invoices).post(invoices::create_invoice),
        )
        .route("/invoices/:id", patch(invoices::update_invoice))
}

async fn not_found(uri: Uri) -> ApiError {
    AppError::not_found(uri.path()).into()
}

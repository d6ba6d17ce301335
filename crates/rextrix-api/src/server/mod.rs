//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, Router};
use rextrix_cache::RedisPool;
use rextrix_common::{AppConfig, AppError, JwtService};
use rextrix_core::SnowflakeGenerator;
use rextrix_db::{
    create_pool, run_migrations, PgCfoProfileRepository, PgCompanyProfileRepository,
    PgContractRepository, PgConversationRepository, PgInterestRepository, PgInvoiceRepository,
    PgMessageRepository, PgScoutRepository, PgUserRepository, PoolConfig,
};
use rextrix_service::{ServiceContextBuilder, UploadSettings};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware_with_config, route_guard};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();

    let router = create_router(config)
        .layer(from_fn_with_state(state.page_guard().clone(), route_guard));
    let router = apply_middleware_with_config(
        router,
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );

    router.merge(health_routes()).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        info!("Running database migrations...");
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    info!("Connecting to Redis...");
    let redis_pool =
        RedisPool::from_config(&config.redis).map_err(|e| AppError::Cache(e.to_string()))?;
    info!("Redis pool created");

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    tokio::fs::create_dir_all(&config.storage.upload_dir)
        .await
        .map_err(|e| AppError::Storage(format!("{}: {e}", config.storage.upload_dir)))?;
    let uploads = UploadSettings::new(
        &config.storage.upload_dir,
        config.storage.max_file_size_bytes(),
    );

    let service_context = ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .cfo_profile_repo(Arc::new(PgCfoProfileRepository::new(pool.clone())))
        .company_profile_repo(Arc::new(PgCompanyProfileRepository::new(pool.clone())))
        .conversation_repo(Arc::new(PgConversationRepository::new(pool.clone())))
        .message_repo(Arc::new(PgMessageRepository::new(pool.clone())))
        .scout_repo(Arc::new(PgScoutRepository::new(pool.clone())))
        .interest_repo(Arc::new(PgInterestRepository::new(pool.clone())))
        .contract_repo(Arc::new(PgContractRepository::new(pool.clone())))
        .invoice_repo(Arc::new(PgInvoiceRepository::new(pool.clone())))
        .pool(pool)
        .redis_pool(redis_pool)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .uploads(uploads)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Serve `app` on an already bound listener until the process is stopped
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(e.to_string()))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let state = create_app_state(config).await?;
    let app = create_app(state);

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    serve(listener, app).await
}

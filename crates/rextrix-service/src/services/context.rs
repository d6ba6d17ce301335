//! Service context - dependency container for services
//!
//! Holds all repositories, the session store and the ID generator needed by services.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rextrix_cache::{RedisPool, RefreshTokenStore};
use rextrix_common::auth::JwtService;
use rextrix_core::traits::{
    CfoProfileRepository, CompanyProfileRepository, ContractRepository, ConversationRepository,
    InterestRepository, InvoiceRepository, MessageRepository, ScoutRepository, UserRepository,
};
use rextrix_core::{Snowflake, SnowflakeGenerator};
use rextrix_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Where uploaded avatars go and how large they may be
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub upload_dir: PathBuf,
    pub max_file_size_bytes: usize,
}

impl UploadSettings {
    pub fn new(upload_dir: impl Into<PathBuf>, max_file_size_bytes: usize) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            max_file_size_bytes,
        }
    }

    pub fn max_file_size_mb(&self) -> u64 {
        (self.max_file_size_bytes / (1024 * 1024)) as u64
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self::new("./uploads", 5 * 1024 * 1024)
    }
}

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The refresh-token session store
/// - JWT service for authentication
/// - Snowflake generator for ID generation
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,
    redis_pool: RedisPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    cfo_profile_repo: Arc<dyn CfoProfileRepository>,
    company_profile_repo: Arc<dyn CompanyProfileRepository>,
    conversation_repo: Arc<dyn ConversationRepository>,
    message_repo: Arc<dyn MessageRepository>,
    scout_repo: Arc<dyn ScoutRepository>,
    interest_repo: Arc<dyn InterestRepository>,
    contract_repo: Arc<dyn ContractRepository>,
    invoice_repo: Arc<dyn InvoiceRepository>,

    refresh_token_store: RefreshTokenStore,

    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    uploads: UploadSettings,
}

impl ServiceContext {
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Pools ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &RedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn cfo_profile_repo(&self) -> &dyn CfoProfileRepository {
        self.cfo_profile_repo.as_ref()
    }

    pub fn company_profile_repo(&self) -> &dyn CompanyProfileRepository {
        self.company_profile_repo.as_ref()
    }

    pub fn conversation_repo(&self) -> &dyn ConversationRepository {
        self.conversation_repo.as_ref()
    }

    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    pub fn scout_repo(&self) -> &dyn ScoutRepository {
        self.scout_repo.as_ref()
    }

    pub fn interest_repo(&self) -> &dyn InterestRepository {
        self.interest_repo.as_ref()
    }

    pub fn contract_repo(&self) -> &dyn ContractRepository {
        self.contract_repo.as_ref()
    }

    pub fn invoice_repo(&self) -> &dyn InvoiceRepository {
        self.invoice_repo.as_ref()
    }

    // === Sessions ===

    /// Get the refresh token store
    pub fn refresh_token_store(&self) -> &RefreshTokenStore {
        &self.refresh_token_store
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    // === Misc ===

    pub fn uploads(&self) -> &UploadSettings {
        &self.uploads
    }

    pub fn upload_dir(&self) -> &Path {
        &self.uploads.upload_dir
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &self.redis_pool)
            .field("repositories", &"...")
            .field("uploads", &self.uploads)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    cfo_profile_repo: Option<Arc<dyn CfoProfileRepository>>,
    company_profile_repo: Option<Arc<dyn CompanyProfileRepository>>,
    conversation_repo: Option<Arc<dyn ConversationRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    scout_repo: Option<Arc<dyn ScoutRepository>>,
    interest_repo: Option<Arc<dyn InterestRepository>>,
    contract_repo: Option<Arc<dyn ContractRepository>>,
    invoice_repo: Option<Arc<dyn InvoiceRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    uploads: Option<UploadSettings>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: RedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn cfo_profile_repo(mut self, repo: Arc<dyn CfoProfileRepository>) -> Self {
        self.cfo_profile_repo = Some(repo);
        self
    }

    pub fn company_profile_repo(mut self, repo: Arc<dyn CompanyProfileRepository>) -> Self {
        self.company_profile_repo = Some(repo);
        self
    }

    pub fn conversation_repo(mut self, repo: Arc<dyn ConversationRepository>) -> Self {
        self.conversation_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn scout_repo(mut self, repo: Arc<dyn ScoutRepository>) -> Self {
        self.scout_repo = Some(repo);
        self
    }

    pub fn interest_repo(mut self, repo: Arc<dyn InterestRepository>) -> Self {
        self.interest_repo = Some(repo);
        self
    }

    pub fn contract_repo(mut self, repo: Arc<dyn ContractRepository>) -> Self {
        self.contract_repo = Some(repo);
        self
    }

    pub fn invoice_repo(mut self, repo: Arc<dyn InvoiceRepository>) -> Self {
        self.invoice_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn uploads(mut self, uploads: UploadSettings) -> Self {
        self.uploads = Some(uploads);
        self
    }

    /// Build the ServiceContext
    ///
    /// The refresh token store lives as long as a refresh token does.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        let redis_pool = required(self.redis_pool, "redis_pool")?;
        let jwt_service = required(self.jwt_service, "jwt_service")?;
        let ttl = u64::try_from(jwt_service.refresh_token_expiry())
            .map_err(|_| ServiceError::validation("refresh token expiry must not be negative"))?;

        Ok(ServiceContext {
            pool: required(self.pool, "pool")?,
            refresh_token_store: RefreshTokenStore::with_ttl(redis_pool.clone(), ttl),
            redis_pool,
            user_repo: required(self.user_repo, "user_repo")?,
            cfo_profile_repo: required(self.cfo_profile_repo, "cfo_profile_repo")?,
            company_profile_repo: required(self.company_profile_repo, "company_profile_repo")?,
            conversation_repo: required(self.conversation_repo, "conversation_repo")?,
            message_repo: required(self.message_repo, "message_repo")?,
            scout_repo: required(self.scout_repo, "scout_repo")?,
            interest_repo: required(self.interest_repo, "interest_repo")?,
            contract_repo: required(self.contract_repo, "contract_repo")?,
            invoice_repo: required(self.invoice_repo, "invoice_repo")?,
            jwt_service,
            snowflake_generator: required(self.snowflake_generator, "snowflake_generator")?,
            uploads: self.uploads.unwrap_or_default(),
        })
    }
}

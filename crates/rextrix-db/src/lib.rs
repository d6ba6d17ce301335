//! # rextrix-db
//!
//! Database layer implementing the rextrix-core repository traits with PostgreSQL via SQLx.
//!
//! - Connection pool management and embedded migrations
//! - Row models with SQLx `FromRow` derives
//! - Model to entity mappers, including legacy profile normalization
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rextrix_db::{create_pool, run_migrations, PgUserRepository, PoolConfig};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::new("postgres://localhost/rextrix")).await?;
//!     run_migrations(&pool).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgCfoProfileRepository, PgCompanyProfileRepository, PgContractRepository,
    PgConversationRepository, PgInterestRepository, PgInvoiceRepository, PgMessageRepository,
    PgScoutRepository, PgUserRepository,
};

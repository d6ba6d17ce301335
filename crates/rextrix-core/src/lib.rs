//! # rextrix-core
//!
//! Domain layer: entities, value objects, the CFO search predicate and repository traits.
//! This crate has no dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod matching;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    CfoProfile, CompanyProfile, Contract, ContractStatus, Conversation, Interest, Invoice,
    InvoiceStatus, Message, Scout, ScoutStatus, User, UserStatus, UserType,
};
pub use error::DomainError;
pub use matching::CfoFilter;
pub use traits::{
    CfoProfileRepository, CompanyProfileRepository, ContractRepository, ConversationRepository,
    ConversationSummary, InterestRepository, InvoiceRepository, MessageQuery, MessageRepository,
    PageQuery, RepoResult, ScoutRepository, UserRepository,
};
pub use value_objects::{
    CompensationBand, CompensationType, Prefecture, Snowflake, SnowflakeGenerator,
    SnowflakeParseError,
};

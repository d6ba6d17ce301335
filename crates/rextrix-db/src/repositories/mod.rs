//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in rextrix-core.

mod cfo_profile;
mod company_profile;
mod contract;
mod conversation;
mod error;
mod interest;
mod invoice;
mod message;
mod scout;
mod user;

pub use cfo_profile::PgCfoProfileRepository;
pub use company_profile::PgCompanyProfileRepository;
pub use contract::PgContractRepository;
pub use conversation::PgConversationRepository;
pub use interest::PgInterestRepository;
pub use invoice::PgInvoiceRepository;
pub use message::PgMessageRepository;
pub use scout::PgScoutRepository;
pub use user::PgUserRepository;

//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] and orchestrates
//! repositories, domain rules and the session store for one area.

pub mod auth;
pub mod avatar;
pub mod cfo;
pub mod company;
pub mod context;
pub mod contract;
pub mod conversation;
pub mod error;
pub mod interest;
pub mod invoice;
pub mod scout;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::AuthService;
pub use avatar::AvatarService;
pub use cfo::CfoService;
pub use company::CompanyService;
pub use context::{ServiceContext, ServiceContextBuilder, UploadSettings};
pub use contract::ContractService;
pub use conversation::ConversationService;
pub use error::{ServiceError, ServiceResult};
pub use interest::InterestService;
pub use invoice::InvoiceService;
pub use scout::ScoutService;
pub use user::UserService;

//! Domain entities - core business objects

mod cfo_profile;
mod company_profile;
mod contract;
mod conversation;
mod interest;
mod invoice;
mod message;
mod scout;
mod user;

pub use cfo_profile::CfoProfile;
pub use company_profile::CompanyProfile;
pub use contract::{Contract, ContractStatus};
pub use conversation::Conversation;
pub use interest::Interest;
pub use invoice::{Invoice, InvoiceStatus};
pub use message::Message;
pub use scout::{Scout, ScoutStatus};
pub use user::{User, UserStatus, UserType};

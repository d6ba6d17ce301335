//! Database models - SQLx-compatible structs for PostgreSQL tables

mod conversation;
mod engagement;
mod profile;
mod user;

pub use conversation::{ConversationModel, ConversationSummaryModel, MessageModel};
pub use engagement::{ContractModel, InterestModel, InvoiceModel, ScoutModel};
pub use profile::{CfoProfileModel, CompanyProfileModel};
pub use user::UserModel;

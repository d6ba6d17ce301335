//! # rextrix-service
//!
//! Application layer: marketplace services and the request/response DTOs
//! the HTTP layer speaks.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, AvatarService, CfoService, CompanyService, ContractService,
    ConversationService, InterestService, InvoiceService, ScoutService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, UploadSettings, UserService,
};

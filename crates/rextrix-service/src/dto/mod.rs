//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CfoSearchQuery, CreateContractRequest, CreateInterestRequest, CreateInvoiceRequest,
    CreateScoutRequest, LoginRequest, LogoutRequest, MessageHistoryQuery, RefreshTokenRequest,
    RegisterRequest, ScoutBox, ScoutBoxQuery, SendMessageRequest, StartConversationRequest,
    UpdateContractRequest, UpdateInvoiceRequest, UpdateScoutRequest, UpdateUserRequest,
    UpsertCfoProfileRequest, UpsertCompanyProfileRequest,
};

pub use responses::{
    ApiResponse, AuthResponse, AvatarResponse, CfoProfileResponse, CompanyProfileResponse,
    ContractResponse, ConversationResponse, CurrentUserResponse, HealthChecks, HealthResponse,
    InterestResponse, InvoiceResponse, LogoutResponse, MarkReadResponse, MessageResponse,
    PaginatedResponse, PaginationMeta, ReadinessResponse, ScoutResponse, SessionResponse,
    StartConversationResponse,
};

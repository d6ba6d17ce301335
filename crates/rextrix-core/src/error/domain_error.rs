//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Profile not found for user: {0}")]
    ProfileNotFound(Snowflake),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(Snowflake),

    #[error("Scout not found: {0}")]
    ScoutNotFound(Snowflake),

    #[error("Interest not found")]
    InterestNotFound,

    #[error("Contract not found: {0}")]
    ContractNotFound(Snowflake),

    #[error("Invoice not found: {0}")]
    InvoiceNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Cannot target yourself")]
    CannotTargetSelf,

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not a participant")]
    NotParticipant,

    #[error("Only {0} accounts can do this")]
    WrongUserType(&'static str),

    #[error("Account is not active")]
    AccountInactive,

    #[error("Not allowed: {0}")]
    NotAllowed(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Scout already sent to this user")]
    ScoutAlreadyExists,

    #[error("Interest already registered")]
    InterestAlreadyExists,

    #[error("Conversation already exists")]
    ConversationAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ProfileNotFound(_) => "UNKNOWN_PROFILE",
            Self::ConversationNotFound(_) => "UNKNOWN_CONVERSATION",
            Self::ScoutNotFound(_) => "UNKNOWN_SCOUT",
            Self::InterestNotFound => "UNKNOWN_INTEREST",
            Self::ContractNotFound(_) => "UNKNOWN_CONTRACT",
            Self::InvoiceNotFound(_) => "UNKNOWN_INVOICE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::CannotTargetSelf => "CANNOT_TARGET_SELF",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",

            // Authorization
            Self::NotParticipant => "NOT_PARTICIPANT",
            Self::WrongUserType(_) => "WRONG_USER_TYPE",
            Self::AccountInactive => "ACCOUNT_INACTIVE",
            Self::NotAllowed(_) => "NOT_ALLOWED",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::ScoutAlreadyExists => "SCOUT_ALREADY_EXISTS",
            Self::InterestAlreadyExists => "INTEREST_ALREADY_EXISTS",
            Self::ConversationAlreadyExists => "CONVERSATION_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ProfileNotFound(_)
                | Self::ConversationNotFound(_)
                | Self::ScoutNotFound(_)
                | Self::InterestNotFound
                | Self::ContractNotFound(_)
                | Self::InvoiceNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::WeakPassword(_)
                | Self::ContentTooLong { .. }
                | Self::CannotTargetSelf
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotParticipant
                | Self::WrongUserType(_)
                | Self::AccountInactive
                | Self::NotAllowed(_)
        )
    }

    /// Check if this is a conflict error. Illegal status changes count as conflicts
    /// with the current state.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::ScoutAlreadyExists
                | Self::InterestAlreadyExists
                | Self::ConversationAlreadyExists
                | Self::InvalidStatusTransition { .. }
        )
    }
}

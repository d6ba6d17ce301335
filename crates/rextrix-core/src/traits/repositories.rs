//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{
    CfoProfile, CompanyProfile, Contract, ContractStatus, Conversation, Interest, Invoice,
    InvoiceStatus, Message, Scout, ScoutStatus, User, UserStatus,
};
use crate::error::DomainError;
use crate::matching::CfoFilter;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Page-number pagination, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub per_page: u32,
}

impl PageQuery {
    pub const MAX_PER_PAGE: u32 = 100;

    /// Clamps `page` to at least 1 and `per_page` to `1..=MAX_PER_PAGE`
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, Self::MAX_PER_PAGE),
        }
    }

    #[inline]
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }

    #[inline]
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(1, 20)
    }
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update display name and avatar
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Change account status
    async fn set_status(&self, id: Snowflake, status: UserStatus) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Remove an account and everything that cascades from it.
    /// Returns false when no such user existed.
    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Profile Repositories
// ============================================================================

#[async_trait]
pub trait CfoProfileRepository: Send + Sync {
    /// Profile with legacy fields already normalized
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<CfoProfile>>;

    /// Insert or replace the profile of `profile.user_id`
    async fn upsert(&self, profile: &CfoProfile) -> RepoResult<()>;

    /// Active CFO profiles that may match `filter`, newest first.
    ///
    /// The result is a superset of the matching profiles; callers apply
    /// [`CfoFilter::matches`] to the rows.
    async fn search(&self, filter: &CfoFilter) -> RepoResult<Vec<CfoProfile>>;
}

#[async_trait]
pub trait CompanyProfileRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<CompanyProfile>>;

    async fn upsert(&self, profile: &CompanyProfile) -> RepoResult<()>;

    /// Active company profiles, newest first, with the total count
    async fn list(&self, page: PageQuery) -> RepoResult<(Vec<CompanyProfile>, i64)>;
}

// ============================================================================
// Conversation / Message Repositories
// ============================================================================

/// A conversation as shown in the inbox
#[derive(Debug, Clone)]
pub struct ConversationSummary {
    pub conversation: Conversation,
    pub last_message: Option<Message>,
    /// Messages from the other participant not yet read by the viewer
    pub unread_count: i64,
}

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Conversation>>;

    /// Find the conversation between two users, in either order
    async fn find_by_pair(&self, a: Snowflake, b: Snowflake) -> RepoResult<Option<Conversation>>;

    /// Fails with `ConversationAlreadyExists` if the pair already has one
    async fn create(&self, conversation: &Conversation) -> RepoResult<()>;

    /// Conversations of a user, most recently active first
    async fn list_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<ConversationSummary>>;
}

/// Cursor pagination for message history
#[derive(Debug, Clone, Default)]
pub struct MessageQuery {
    /// Only messages with an id lower than this
    pub before: Option<Snowflake>,
    pub limit: i64,
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Insert the message and bump the conversation's `last_message_at`
    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// Messages oldest first; with `before`, the page just preceding that id
    async fn list(&self, conversation_id: Snowflake, query: MessageQuery) -> RepoResult<Vec<Message>>;

    /// Mark every unread message not sent by `reader` as read. Returns the count.
    async fn mark_read(&self, conversation_id: Snowflake, reader: Snowflake) -> RepoResult<u64>;
}

// ============================================================================
// Scout / Interest Repositories
// ============================================================================

#[async_trait]
pub trait ScoutRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Scout>>;

    /// Fails with `ScoutAlreadyExists` on a duplicate `(sender, recipient)` pair
    async fn create(&self, scout: &Scout) -> RepoResult<()>;

    async fn list_sent(&self, sender_id: Snowflake) -> RepoResult<Vec<Scout>>;

    async fn list_received(&self, recipient_id: Snowflake) -> RepoResult<Vec<Scout>>;

    async fn update_status(&self, id: Snowflake, status: ScoutStatus) -> RepoResult<()>;
}

#[async_trait]
pub trait InterestRepository: Send + Sync {
    /// Fails with `InterestAlreadyExists` on a duplicate `(liker, target)` pair
    async fn create(&self, interest: &Interest) -> RepoResult<()>;

    /// Returns whether a row was removed
    async fn delete(&self, liker_id: Snowflake, target_id: Snowflake) -> RepoResult<bool>;

    async fn exists(&self, liker_id: Snowflake, target_id: Snowflake) -> RepoResult<bool>;

    /// Interests sent by a user, newest first
    async fn list_by_liker(&self, liker_id: Snowflake) -> RepoResult<Vec<Interest>>;
}

// ============================================================================
// Contract / Invoice Repositories
// ============================================================================

#[async_trait]
pub trait ContractRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Contract>>;

    async fn create(&self, contract: &Contract) -> RepoResult<()>;

    /// Contracts where the user is either party, newest first
    async fn list_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<Contract>>;

    async fn update_status(&self, id: Snowflake, status: ContractStatus) -> RepoResult<()>;
}

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Invoice>>;

    async fn create(&self, invoice: &Invoice) -> RepoResult<()>;

    /// Invoices of a contract ordered by billing period
    async fn list_by_contract(&self, contract_id: Snowflake) -> RepoResult<Vec<Invoice>>;

    async fn update_status(&self, id: Snowflake, status: InvoiceStatus) -> RepoResult<()>;
}

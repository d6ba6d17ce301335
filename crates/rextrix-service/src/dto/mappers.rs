//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use rextrix_core::{
    CfoProfile, CompanyProfile, Contract, ConversationSummary, Interest, Invoice, Message, Scout,
    Snowflake, User,
};

use super::responses::{
    CfoProfileResponse, CompanyProfileResponse, ContractResponse, ConversationResponse,
    CurrentUserResponse, InterestResponse, InvoiceResponse, MessageResponse, ScoutResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            user_type: user.user_type,
            status: user.status,
            display_name: user.display_name.clone(),
            avatar_url: user.avatar_url.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ============================================================================
// Profile Mappers
// ============================================================================

impl From<&CfoProfile> for CfoProfileResponse {
    fn from(p: &CfoProfile) -> Self {
        Self {
            user_id: p.user_id.to_string(),
            display_name: p.display_name.clone(),
            prefecture: p.prefecture,
            location: p.location.clone(),
            skills: p.skills.clone(),
            bio: p.bio.clone(),
            experience_years: p.experience_years,
            compensation_type: p.compensation_type,
            monthly_fee_min: p.monthly_fee_min,
            monthly_fee_max: p.monthly_fee_max,
            hourly_fee_min: p.hourly_fee_min,
            hourly_fee_max: p.hourly_fee_max,
            compensation_text: p.compensation_text.clone(),
            weekly_days: p.weekly_days,
            availability_text: p.availability_text.clone(),
            avatar_url: p.avatar_url.clone(),
            updated_at: p.updated_at,
        }
    }
}

impl From<&CompanyProfile> for CompanyProfileResponse {
    fn from(p: &CompanyProfile) -> Self {
        Self {
            user_id: p.user_id.to_string(),
            company_name: p.company_name.clone(),
            industry: p.industry.clone(),
            prefecture: p.prefecture,
            employee_count: p.employee_count,
            description: p.description.clone(),
            challenges: p.challenges.clone(),
            website_url: p.website_url.clone(),
            avatar_url: p.avatar_url.clone(),
            updated_at: p.updated_at,
        }
    }
}

// ============================================================================
// Message Mappers
// ============================================================================

impl From<&Message> for MessageResponse {
    fn from(m: &Message) -> Self {
        Self {
            id: m.id.to_string(),
            conversation_id: m.conversation_id.to_string(),
            sender_id: m.sender_id.to_string(),
            content: m.content.clone(),
            read_at: m.read_at,
            created_at: m.created_at,
        }
    }
}

impl ConversationResponse {
    /// Inbox row as seen by `viewer`
    pub fn for_viewer(summary: &ConversationSummary, viewer: Snowflake) -> Self {
        let conversation = &summary.conversation;
        let other = conversation
            .other_participant(viewer)
            .unwrap_or(conversation.participant_low);
        Self {
            id: conversation.id.to_string(),
            other_participant_id: other.to_string(),
            last_message: summary.last_message.as_ref().map(MessageResponse::from),
            unread_count: summary.unread_count,
            last_message_at: conversation.last_message_at,
            created_at: conversation.created_at,
        }
    }
}

// ============================================================================
// Scout / Interest Mappers
// ============================================================================

impl From<&Scout> for ScoutResponse {
    fn from(s: &Scout) -> Self {
        Self {
            id: s.id.to_string(),
            sender_id: s.sender_id.to_string(),
            recipient_id: s.recipient_id.to_string(),
            title: s.title.clone(),
            message: s.message.clone(),
            status: s.status,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

impl From<&Interest> for InterestResponse {
    fn from(i: &Interest) -> Self {
        Self {
            liker_id: i.liker_id.to_string(),
            target_id: i.target_id.to_string(),
            created_at: i.created_at,
        }
    }
}

// ============================================================================
// Contract / Invoice Mappers
// ============================================================================

impl From<&Contract> for ContractResponse {
    fn from(c: &Contract) -> Self {
        Self {
            id: c.id.to_string(),
            company_id: c.company_id.to_string(),
            cfo_id: c.cfo_id.to_string(),
            scout_id: c.scout_id.map(|id| id.to_string()),
            monthly_fee: c.monthly_fee,
            start_date: c.start_date,
            end_date: c.end_date,
            status: c.status,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl From<&Invoice> for InvoiceResponse {
    fn from(i: &Invoice) -> Self {
        Self {
            id: i.id.to_string(),
            contract_id: i.contract_id.to_string(),
            amount: i.amount,
            tax_amount: i.tax_amount,
            total: i.total(),
            period_start: i.period_start,
            period_end: i.period_end,
            due_date: i.due_date,
            status: i.status,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}

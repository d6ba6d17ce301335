//! Messaging handlers

use axum::extract::State;
use rextrix_service::dto::{
    ConversationResponse, MarkReadResponse, MessageHistoryQuery, MessageResponse,
    SendMessageRequest, StartConversationRequest, StartConversationResponse,
};
use rextrix_service::ConversationService;

use crate::extractors::{AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// GET /api/messages
pub async fn list_conversations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<ApiJson<Vec<ConversationResponse>>> {
    let service = ConversationService::new(state.service_context());
    Ok(ApiJson(service.list(auth.user_id).await?))
}

/// POST /api/messages
pub async fn start_conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<StartConversationRequest>,
) -> ApiResult<Created<ApiJson<StartConversationResponse>>> {
    let service = ConversationService::new(state.service_context());
    let response = service.start(auth.user_id, request).await?;
    Ok(Created(ApiJson(response)))
}

/// GET /api/messages/:conversation_id?before=..&limit=..
pub async fn get_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(conversation_id): IdPath,
    QueryParams(query): QueryParams<MessageHistoryQuery>,
) -> ApiResult<ApiJson<Vec<MessageResponse>>> {
    let service = ConversationService::new(state.service_context());
    let messages = service
        .list_messages(auth.user_id, conversation_id, query)
        .await?;
    Ok(ApiJson(messages))
}

/// POST /api/messages/:conversation_id
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(conversation_id): IdPath,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<ApiJson<MessageResponse>>> {
    let service = ConversationService::new(state.service_context());
    let message = service.send(auth.user_id, conversation_id, request).await?;
    Ok(Created(ApiJson(message)))
}

/// POST /api/messages/:conversation_id/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(conversation_id): IdPath,
) -> ApiResult<ApiJson<MarkReadResponse>> {
    let service = ConversationService::new(state.service_context());
    Ok(ApiJson(service.mark_read(auth.user_id, conversation_id).await?))
}

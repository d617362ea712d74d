//! Messaging inbox handlers

use axum::{
    extract::{Path, State},
    Json,
};
use eventlink_service::{
    ConversationResponse, ConversationService, MessageResponse, SendMessageRequest,
};

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// List the caller's conversations
///
/// GET /conversations
pub async fn list_conversations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ConversationResponse>>> {
    let service = ConversationService::new(state.service_context());
    let response = service.list_conversations(auth.user_id).await?;
    Ok(Json(response))
}

/// Send a message to a user (creates the conversation on demand)
///
/// POST /conversations/{user_id}/messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let recipient_id = user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))?;

    let service = ConversationService::new(state.service_context());
    let response = service
        .send_message(auth.user_id, recipient_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// List messages; opening the conversation marks it read
///
/// GET /conversations/{conversation_id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(conversation_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let conversation_id = conversation_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid conversation_id format"))?;

    let service = ConversationService::new(state.service_context());
    let response = service
        .list_messages(
            auth.user_id,
            conversation_id,
            pagination.before,
            pagination.limit,
        )
        .await?;
    Ok(Json(response))
}

/// Hide the conversation from the caller's view
///
/// DELETE /conversations/{conversation_id}
pub async fn delete_conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(conversation_id): Path<String>,
) -> ApiResult<NoContent> {
    let conversation_id = conversation_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid conversation_id format"))?;

    let service = ConversationService::new(state.service_context());
    service
        .delete_conversation(auth.user_id, conversation_id)
        .await?;
    Ok(NoContent)
}

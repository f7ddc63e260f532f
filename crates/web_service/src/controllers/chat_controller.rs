//! Conversation-level routes: create, list, reconstructed tree

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use tracing::info;
use uuid::Uuid;

use crate::auth::authenticate;
use crate::dto::{ConversationDTO, CreateChatRequest};
use crate::error::AppError;
use crate::server::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(create_chat)
        .service(list_chats)
        .service(get_tree);
}

/// POST /v1/chats - create a conversation (and its root node)
#[post("/chats")]
pub async fn create_chat(
    req: HttpRequest,
    body: web::Json<CreateChatRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let claims = authenticate(&req, &state.verifier)?;

    let conversation = state
        .engine
        .store()
        .create_conversation(&claims.username, body.into_inner().title)
        .await?;

    info!(
        "user {} created conversation {}",
        claims.username, conversation.id
    );
    Ok(HttpResponse::Created().json(ConversationDTO::from(conversation)))
}

/// GET /v1/chats - list the caller's conversations, most recent first
#[get("/chats")]
pub async fn list_chats(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let claims = authenticate(&req, &state.verifier)?;

    let conversations = state
        .engine
        .store()
        .list_conversations(&claims.username)
        .await?;
    let listed: Vec<ConversationDTO> = conversations.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(listed))
}

/// GET /v1/chats/{chat_id}/tree - the conversation's full reconstructed tree
#[get("/chats/{chat_id}/tree")]
pub async fn get_tree(
    req: HttpRequest,
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    authenticate(&req, &state.verifier)?;

    let trees = state.engine.reconstruct(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(trees))
}

//! Turn mutation routes: append, edit, regenerate, respond

use actix_web::{post, web, HttpRequest, HttpResponse};
use uuid::Uuid;

use crate::auth::authenticate;
use crate::dto::{
    AppendTurnRequest, EditRequest, EditResponse, RegenerateResponse, RespondRequest, TurnResponse,
};
use crate::error::AppError;
use crate::server::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(append_turn)
        .service(edit_branch)
        .service(regenerate_branch)
        .service(respond_continuation);
}

/// POST /v1/chats/{chat_id}/turns - new question under the conversation root
#[post("/chats/{chat_id}/turns")]
pub async fn append_turn(
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<AppendTurnRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    authenticate(&req, &state.verifier)?;

    let outcome = state
        .engine
        .append_turn(path.into_inner(), &body.question)
        .await?;
    Ok(HttpResponse::Created().json(TurnResponse::from(outcome)))
}

/// POST /v1/messages/{node_id}/edit - branch off an edited question
#[post("/messages/{node_id}/edit")]
pub async fn edit_branch(
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<EditRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    authenticate(&req, &state.verifier)?;

    let outcome = state
        .engine
        .edit_branch(path.into_inner(), &body.new_content)
        .await?;
    Ok(HttpResponse::Created().json(EditResponse::from(outcome)))
}

/// POST /v1/messages/{node_id}/regenerate - alternative answer under the original
#[post("/messages/{node_id}/regenerate")]
pub async fn regenerate_branch(
    req: HttpRequest,
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    authenticate(&req, &state.verifier)?;

    let outcome = state.engine.regenerate_branch(path.into_inner()).await?;
    Ok(HttpResponse::Created().json(RegenerateResponse::from(outcome)))
}

/// POST /v1/messages/{node_id}/respond - continue a branch from an assistant node
#[post("/messages/{node_id}/respond")]
pub async fn respond_continuation(
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<RespondRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    authenticate(&req, &state.verifier)?;

    let outcome = state
        .engine
        .respond_continuation(path.into_inner(), &body.new_question)
        .await?;
    Ok(HttpResponse::Created().json(TurnResponse::from(outcome)))
}

// gateway/src/api/chats.rs
use actix_web::{post, web, HttpRequest, HttpResponse};
use common::models::ChatMessage;
use common::Config;
use serde::Deserialize;
use serde_json::json;

use crate::backend::{BackendClient, UserRef};
use crate::error::GatewayError;
use crate::identity::IdentityStrategy;

#[derive(Debug, Deserialize)]
pub struct SendChatRequest {
    pub chat: Option<String>,
}

/// Append a chat to the target user's log, target addressed by id
#[post("/user/{id}/sendchat")]
pub async fn send_chat_by_id(
    req: HttpRequest,
    path: web::Path<(String,)>,
    body: web::Json<SendChatRequest>,
    strategy: web::Data<dyn IdentityStrategy>,
    backend: web::Data<BackendClient>,
    config: web::Data<Config>,
) -> Result<HttpResponse, GatewayError> {
    relay_chat(
        &req,
        UserRef::Id(&path.0),
        body.into_inner(),
        strategy.get_ref(),
        &backend,
        &config,
    )
    .await
}

/// Append a chat to the target user's log, target addressed by name
#[post("/user/send/{name}/chat")]
pub async fn send_chat_by_name(
    req: HttpRequest,
    path: web::Path<(String,)>,
    body: web::Json<SendChatRequest>,
    strategy: web::Data<dyn IdentityStrategy>,
    backend: web::Data<BackendClient>,
    config: web::Data<Config>,
) -> Result<HttpResponse, GatewayError> {
    relay_chat(
        &req,
        UserRef::Name(&path.0),
        body.into_inner(),
        strategy.get_ref(),
        &backend,
        &config,
    )
    .await
}

/// Both sendchat routes resolve to the same backend append semantics
async fn relay_chat(
    req: &HttpRequest,
    target: UserRef<'_>,
    body: SendChatRequest,
    strategy: &dyn IdentityStrategy,
    backend: &BackendClient,
    config: &Config,
) -> Result<HttpResponse, GatewayError> {
    let text = body
        .chat
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| GatewayError::InvalidInput("Message is required.".to_string()))?;

    let identity = strategy.current_identity(req)?;
    let message = ChatMessage::outbound(text, identity.id.clone());
    backend.append_chat(target, &message).await?;

    let mut response = HttpResponse::Ok();
    if let Some(cookie) = identity.session_cookie(&config.session) {
        response.cookie(cookie);
    }

    Ok(response.json(json!({ "message": "Chat sent" })))
}

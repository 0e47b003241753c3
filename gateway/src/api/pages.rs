// gateway/src/api/pages.rs
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use common::Config;
use serde::Deserialize;

use crate::backend::BackendClient;
use crate::error::GatewayError;
use crate::identity::IdentityStrategy;
use crate::views;

/// Landing view. Ensures the caller has an identity so a session cookie is
/// already in place before any user or chat request.
#[get("/")]
pub async fn home(
    req: HttpRequest,
    strategy: web::Data<dyn IdentityStrategy>,
    config: web::Data<Config>,
) -> Result<HttpResponse, GatewayError> {
    let identity = strategy.current_identity(&req)?;

    let mut response = HttpResponse::Ok();
    response.content_type(mime::TEXT_HTML_UTF_8);
    if let Some(cookie) = identity.session_cookie(&config.session) {
        response.cookie(cookie);
    }

    Ok(response.body(views::landing_page(None)))
}

/// Chat list for the current caller. A failed fetch degrades to the landing
/// view with an inline prompt instead of an error page.
#[get("/user/chats")]
pub async fn my_chats(
    req: HttpRequest,
    strategy: web::Data<dyn IdentityStrategy>,
    backend: web::Data<BackendClient>,
    config: web::Data<Config>,
) -> Result<HttpResponse, GatewayError> {
    let identity = strategy.current_identity(&req)?;

    let mut response = HttpResponse::Ok();
    response.content_type(mime::TEXT_HTML_UTF_8);
    if let Some(cookie) = identity.session_cookie(&config.session) {
        response.cookie(cookie);
    }

    match backend.list_chats(&identity.id).await {
        Ok(chats) => Ok(response.body(views::chat_list_page(&chats))),
        Err(e) => {
            tracing::warn!("Failed to fetch chat log for {}: {}", identity.id, e);
            Ok(response.body(views::landing_page(Some(views::CHATS_UNAVAILABLE_PROMPT))))
        }
    }
}

/// Chat view for a user record fetched by id
#[get("/user/{id}")]
pub async fn user_page(
    path: web::Path<(String,)>,
    backend: web::Data<BackendClient>,
) -> Result<HttpResponse, GatewayError> {
    let user = backend.get_user(&path.0).await?;

    Ok(HttpResponse::Ok()
        .content_type(mime::TEXT_HTML_UTF_8)
        .body(views::chat_page(&user)))
}

#[derive(Debug, Deserialize)]
pub struct LookupUserRequest {
    pub name: Option<String>,
}

/// Chat view for a user record looked up by name
#[post("/user/name/")]
pub async fn user_page_by_name(
    body: web::Json<LookupUserRequest>,
    backend: web::Data<BackendClient>,
) -> Result<HttpResponse, GatewayError> {
    let name = body
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| GatewayError::InvalidInput("Name is required.".to_string()))?;

    let user = backend.get_user_by_name(name).await?;

    Ok(HttpResponse::Ok()
        .content_type(mime::TEXT_HTML_UTF_8)
        .body(views::chat_page(&user)))
}

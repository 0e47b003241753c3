// gateway/src/api/users.rs
use actix_web::{post, web, HttpRequest, HttpResponse};
use common::Config;
use serde::Deserialize;
use serde_json::json;

use crate::backend::BackendClient;
use crate::error::GatewayError;
use crate::identity::IdentityStrategy;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
}

/// Create a user on the backend under the caller's Identity
#[post("/user/new/")]
pub async fn create_user(
    req: HttpRequest,
    body: web::Json<CreateUserRequest>,
    strategy: web::Data<dyn IdentityStrategy>,
    backend: web::Data<BackendClient>,
    config: web::Data<Config>,
) -> Result<HttpResponse, GatewayError> {
    let name = body
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| GatewayError::InvalidInput("Name is required.".to_string()))?;

    let identity = strategy.current_identity(&req)?;
    let user = backend.create_user(name, &identity.id).await?;

    tracing::info!("Created user {} for identity {}", user.name, identity.id);

    let mut response = HttpResponse::Ok();
    if let Some(cookie) = identity.session_cookie(&config.session) {
        response.cookie(cookie);
    }

    Ok(response.json(json!({
        "message": "User created",
        "user": user,
    })))
}

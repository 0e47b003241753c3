// gateway/src/backend.rs
use std::time::Duration;

use common::models::{ChatMessage, User};
use common::BackendConfig;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// How a backend call can fail. Transport problems, timeouts and unparseable
/// bodies all collapse to `Unavailable`; non-2xx statuses map by status code.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend has no matching user: {details}")]
    NotFound { details: String },

    #[error("backend rejected the request: {details}")]
    InvalidInput { details: String },

    #[error("failed to reach backend: {details}")]
    Unavailable { details: String },
}

/// Lookup key for a backend user record. The gateway exposes both id and
/// name based chat routes, so the client supports both.
#[derive(Debug, Clone, Copy)]
pub enum UserRef<'a> {
    Id(&'a str),
    Name(&'a str),
}

/// Thin typed wrapper over the backend chat service. One HTTP call per
/// operation, bounded by the configured timeout, never retried.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct NewUserPayload<'a> {
    name: &'a str,
    id: &'a str,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::Unavailable {
                details: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get_user(&self, id: &str) -> Result<User, BackendError> {
        let response = self
            .http
            .get(self.url(&format!("/user/{id}")))
            .send()
            .await
            .map_err(transport)?;
        parse_response(response).await
    }

    pub async fn get_user_by_name(&self, name: &str) -> Result<User, BackendError> {
        let response = self
            .http
            .get(self.url(&format!("/user/name/{name}")))
            .send()
            .await
            .map_err(transport)?;
        parse_response(response).await
    }

    pub async fn create_user(&self, name: &str, id: &str) -> Result<User, BackendError> {
        let response = self
            .http
            .post(self.url("/user/adduser/"))
            .json(&NewUserPayload { name, id })
            .send()
            .await
            .map_err(transport)?;
        parse_response(response).await
    }

    /// Append a chat to the target user's log. The body is the plain chat
    /// object; the backend fills in the owner's id and name on echo.
    pub async fn append_chat(
        &self,
        target: UserRef<'_>,
        message: &ChatMessage,
    ) -> Result<ChatMessage, BackendError> {
        let path = match target {
            UserRef::Id(id) => format!("/user/{id}/chat"),
            UserRef::Name(name) => format!("/user/name/{name}/chat"),
        };

        let response = self
            .http
            .post(self.url(&path))
            .json(message)
            .send()
            .await
            .map_err(transport)?;
        parse_response(response).await
    }

    pub async fn list_chats(&self, id: &str) -> Result<Vec<ChatMessage>, BackendError> {
        let response = self
            .http
            .get(self.url(&format!("/user/{id}/chats")))
            .send()
            .await
            .map_err(transport)?;
        parse_response(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn transport(err: reqwest::Error) -> BackendError {
    let details = if err.is_timeout() {
        "request timed out".to_string()
    } else {
        err.to_string()
    };
    BackendError::Unavailable { details }
}

async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, BackendError> {
    let status = response.status();

    if status.is_success() {
        // A 2xx body that fails to parse is treated as an unreachable
        // backend rather than guessed at.
        return response.json().await.map_err(|e| BackendError::Unavailable {
            details: format!("unparseable backend response: {e}"),
        });
    }

    // The backend reports errors as plain text bodies
    let details = response
        .text()
        .await
        .unwrap_or_default()
        .trim()
        .to_string();
    Err(classify_status(status, details))
}

fn classify_status(status: StatusCode, details: String) -> BackendError {
    match status {
        StatusCode::NOT_FOUND => BackendError::NotFound { details },
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            BackendError::InvalidInput { details }
        }
        _ => BackendError::Unavailable {
            details: format!("backend returned {status}: {details}"),
        },
    }
}

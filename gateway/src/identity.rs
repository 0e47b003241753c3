// gateway/src/identity.rs
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;
use common::SessionConfig;
use mac_address::get_mac_address;
use sha2::{Digest, Sha256};
use std::process::Command;
use std::sync::Arc;
use thiserror::Error;

use crate::session::SessionRegistry;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("no hardware network identifier available")]
    NoMacAddress,

    #[error("machine attributes unavailable: {0}")]
    MachineAttributes(String),
}

/// Identity resolved for the current request.
///
/// `fresh_token` is set when the session strategy minted a new session and
/// the response must carry the cookie.
#[derive(Debug, Clone)]
pub struct ResolvedIdentity {
    pub id: String,
    pub fresh_token: Option<String>,
}

impl ResolvedIdentity {
    /// Cookie carrying a newly minted session token, if one was issued
    pub fn session_cookie(&self, session: &SessionConfig) -> Option<Cookie<'static>> {
        let token = self.fresh_token.clone()?;
        Some(
            Cookie::build(session.cookie_name.clone(), token)
                .path("/")
                .http_only(true)
                .same_site(SameSite::Strict)
                .max_age(CookieDuration::seconds(session.ttl_seconds))
                .finish(),
        )
    }
}

/// Policy for deriving the caller Identity. Exactly one strategy is picked
/// at startup; the gateway never mixes them.
pub trait IdentityStrategy: Send + Sync {
    fn current_identity(&self, req: &HttpRequest) -> Result<ResolvedIdentity, IdentityError>;
}

/// Session-cookie identity: a UUID minted on first contact and pinned to the
/// caller's session until it expires.
pub struct SessionStrategy {
    registry: Arc<SessionRegistry>,
    cookie_name: String,
}

impl SessionStrategy {
    pub fn new(registry: Arc<SessionRegistry>, cookie_name: impl Into<String>) -> Self {
        Self {
            registry,
            cookie_name: cookie_name.into(),
        }
    }
}

impl IdentityStrategy for SessionStrategy {
    fn current_identity(&self, req: &HttpRequest) -> Result<ResolvedIdentity, IdentityError> {
        if let Some(cookie) = req.cookie(&self.cookie_name) {
            if let Some(identity) = self.registry.resolve(cookie.value()) {
                return Ok(ResolvedIdentity {
                    id: identity,
                    fresh_token: None,
                });
            }
        }

        let (identity, token) = self.registry.create();
        tracing::info!("Registered new session identity: {}", identity);

        Ok(ResolvedIdentity {
            id: identity,
            fresh_token: Some(token),
        })
    }
}

/// Machine-bound identity: SHA-256 over the MAC address and host name.
/// Deterministic for a given machine, computed fresh on every request,
/// never stored.
pub struct MachineHashStrategy;

impl IdentityStrategy for MachineHashStrategy {
    fn current_identity(&self, _req: &HttpRequest) -> Result<ResolvedIdentity, IdentityError> {
        let mac = get_mac_address()
            .map_err(|e| IdentityError::MachineAttributes(e.to_string()))?
            .ok_or(IdentityError::NoMacAddress)?;

        let hostname = Command::new("hostname")
            .output()
            .map_err(|e| IdentityError::MachineAttributes(e.to_string()))?;
        let hostname = String::from_utf8_lossy(&hostname.stdout).trim().to_string();

        Ok(ResolvedIdentity {
            id: hash_string(&format!("{}-{}", mac, hostname)),
            fresh_token: None,
        })
    }
}

/// Hash a string using SHA-256, hex-encoded
pub fn hash_string(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_hash_string_is_deterministic() {
        let first = hash_string("aa:bb:cc:dd:ee:ff-myhost");
        let second = hash_string("aa:bb:cc:dd:ee:ff-myhost");
        assert_eq!(first, second);
        assert_eq!(first.len(), 64); // SHA-256 produces 64 hex characters
    }

    #[test]
    fn test_session_strategy_mints_identity_without_cookie() {
        let registry = Arc::new(SessionRegistry::new(3600));
        let strategy = SessionStrategy::new(registry, "relay_session");

        let req = TestRequest::default().to_http_request();
        let resolved = strategy.current_identity(&req).unwrap();

        assert!(!resolved.id.is_empty());
        assert!(resolved.fresh_token.is_some());
    }

    #[test]
    fn test_session_strategy_reuses_identity_for_known_token() {
        let registry = Arc::new(SessionRegistry::new(3600));
        let strategy = SessionStrategy::new(registry, "relay_session");

        let first = strategy
            .current_identity(&TestRequest::default().to_http_request())
            .unwrap();
        let token = first.fresh_token.clone().unwrap();

        let req = TestRequest::default()
            .cookie(Cookie::new("relay_session", token))
            .to_http_request();
        let second = strategy.current_identity(&req).unwrap();

        assert_eq!(first.id, second.id);
        assert!(second.fresh_token.is_none());
    }

    #[test]
    fn test_stale_cookie_gets_a_fresh_identity() {
        let registry = Arc::new(SessionRegistry::new(3600));
        let strategy = SessionStrategy::new(registry, "relay_session");

        let req = TestRequest::default()
            .cookie(Cookie::new("relay_session", "stale-token"))
            .to_http_request();
        let resolved = strategy.current_identity(&req).unwrap();

        assert!(resolved.fresh_token.is_some());
    }
}

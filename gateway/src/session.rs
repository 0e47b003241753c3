// gateway/src/session.rs
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::identity::hash_string;

/// One caller's session: the Identity pinned to it and its activity timestamp
#[derive(Debug, Clone)]
struct SessionEntry {
    identity: String,
    last_active: DateTime<Utc>,
}

/// Server-side map from opaque session token to caller Identity.
///
/// Expiry is measured against last activity; expired entries report as
/// absent on lookup and are swept by the periodic cleanup task.
pub struct SessionRegistry {
    sessions: DashMap<String, SessionEntry>,
    ttl_seconds: i64,
}

impl SessionRegistry {
    pub fn new(ttl_seconds: i64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl_seconds,
        }
    }

    /// Look up the Identity for a session token, refreshing its activity
    pub fn resolve(&self, token: &str) -> Option<String> {
        let expired = {
            let entry = self.sessions.get(token)?;
            self.is_expired(&entry)
        };

        if expired {
            self.sessions.remove(token);
            tracing::debug!("Session expired for token");
            return None;
        }

        let mut entry = self.sessions.get_mut(token)?;
        entry.last_active = Utc::now();
        Some(entry.identity.clone())
    }

    /// Mint a new Identity under a fresh session token
    pub fn create(&self) -> (String, String) {
        let identity = Uuid::new_v4().to_string();
        let token = create_session_token();

        self.sessions.insert(
            token.clone(),
            SessionEntry {
                identity: identity.clone(),
                last_active: Utc::now(),
            },
        );

        (identity, token)
    }

    /// Drop every session idle past the TTL; returns how many were removed.
    /// Removals are counted inside the sweep itself since handlers keep
    /// inserting sessions while it runs.
    pub fn cleanup_expired(&self) -> usize {
        let mut removed = 0;
        self.sessions.retain(|_, entry| {
            let expired = Utc::now()
                .signed_duration_since(entry.last_active)
                .num_seconds()
                > self.ttl_seconds;
            if expired {
                removed += 1;
            }
            !expired
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn is_expired(&self, entry: &SessionEntry) -> bool {
        Utc::now()
            .signed_duration_since(entry.last_active)
            .num_seconds()
            > self.ttl_seconds
    }
}

/// Create a session token from a timestamp and a random component
fn create_session_token() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();

    let random_part: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();

    hash_string(&format!("{}-{}", timestamp, random_part))
}

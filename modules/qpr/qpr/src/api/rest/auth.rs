//! Bearer-token sessions.
//!
//! The session map lives in memory: a session is a thin identity lookup
//! over the durable profile store, and every request re-derives its
//! authorization from the database.

use axum::extract::FromRequestParts;
use dashmap::DashMap;
use http::header::AUTHORIZATION;
use http::request::Parts;
use uuid::Uuid;

use crate::api::rest::error::Problem;
use crate::api::rest::state::AppState;
use crate::domain::model::Identity;

#[derive(Default)]
pub struct Sessions {
    tokens: DashMap<String, Identity>,
}

impl Sessions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue an opaque bearer token for an authenticated identity.
    pub fn issue(&self, identity: Identity) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens.insert(token.clone(), identity);
        token
    }

    pub fn revoke(&self, token: &str) {
        self.tokens.remove(token);
    }

    #[must_use]
    pub fn resolve(&self, token: &str) -> Option<Identity> {
        self.tokens.get(token).map(|entry| entry.value().clone())
    }
}

/// Extractor resolving the caller identity from the `Authorization` header.
pub struct AuthSession {
    pub token: String,
    pub identity: Identity,
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = Problem;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(Problem::unauthorized)?;

        let identity = state
            .sessions
            .resolve(token)
            .ok_or_else(Problem::unauthorized)?;

        Ok(AuthSession {
            token: token.to_owned(),
            identity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpr_sdk::Role;

    fn identity() -> Identity {
        Identity {
            account_id: 1,
            employee_code: "905".to_owned(),
            role: Role::User,
        }
    }

    #[test]
    fn issued_tokens_resolve_until_revoked() {
        let sessions = Sessions::new();
        let token = sessions.issue(identity());
        assert_eq!(sessions.resolve(&token), Some(identity()));

        sessions.revoke(&token);
        assert_eq!(sessions.resolve(&token), None);
    }

    #[test]
    fn unknown_tokens_do_not_resolve() {
        let sessions = Sessions::new();
        assert_eq!(sessions.resolve("not-a-token"), None);
    }
}

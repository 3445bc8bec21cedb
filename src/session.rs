//! Explicit user sessions.
//!
//! A session is opened once the identity service has verified credentials and
//! is closed on logout. Handlers that need identity take an [`AuthSession`]
//! extractor instead of reading ambient state.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{DateTime, Utc};
use moka::future::Cache;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::User;
use crate::AppState;

/// Signed-in user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: Uuid,
    pub user: User,
    pub opened_at: DateTime<Utc>,
}

impl Session {
    /// Whether this session belongs to the given host.
    pub fn is_host_of(&self, host_id: i32) -> bool {
        self.user.is_host && self.user.id == host_id
    }
}

/// Live sessions keyed by bearer token; idle sessions expire
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<Uuid, Arc<Session>>,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(100_000)
                .time_to_idle(idle_ttl)
                .build(),
        }
    }

    /// Start a session for a verified user.
    pub async fn open(&self, user: User) -> Arc<Session> {
        let session = Arc::new(Session {
            token: Uuid::new_v4(),
            user,
            opened_at: Utc::now(),
        });
        self.sessions
            .insert(session.token, Arc::clone(&session))
            .await;
        info!("Session opened for user {}", session.user.id);
        session
    }

    pub async fn get(&self, token: &Uuid) -> Option<Arc<Session>> {
        self.sessions.get(token).await
    }

    /// End a session. Returns false when it was unknown or already expired.
    pub async fn close(&self, token: &Uuid) -> bool {
        match self.sessions.remove(token).await {
            Some(session) => {
                info!("Session closed for user {}", session.user.id);
                true
            }
            None => false,
        }
    }
}

/// Extractor for the caller's session from `Authorization: Bearer <token>`
pub struct AuthSession(pub Arc<Session>);

#[async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .and_then(|token| Uuid::parse_str(token.trim()).ok())
            .ok_or(AppError::Unauthorized)?;

        state
            .sessions
            .get(&token)
            .await
            .map(AuthSession)
            .ok_or(AppError::Unauthorized)
    }
}

//! Session route handlers
//!
//! Sessions are opened by the identity service after it has checked the
//! user's credentials. It proves itself with the shared identity key.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::db;
use crate::error::{AppError, Result};
use crate::models::User;
use crate::session::{AuthSession, Session};
use crate::AppState;

/// Header carrying the identity service's shared key
pub const IDENTITY_KEY_HEADER: &str = "x-identity-key";

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/session",
        post(open_session).get(current_session).delete(close_session),
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSessionRequest {
    pub user_id: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: Uuid,
    pub user: User,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            token: session.token,
            user: session.user.clone(),
        }
    }
}

/// Rejects unless the configured identity key was presented.
fn check_identity_key(state: &AppState, headers: &HeaderMap) -> Result<()> {
    let expected = state
        .config
        .identity_key
        .as_deref()
        .ok_or(AppError::Unauthorized)?;
    let presented = headers
        .get(IDENTITY_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    if identity_key_matches(expected, presented) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

/// Compare keys through their HMAC tags; `verify_slice` runs in constant time.
fn identity_key_matches(expected: &str, presented: &str) -> bool {
    type HmacSha256 = Hmac<Sha256>;

    let tag = |key: &str| {
        HmacSha256::new_from_slice(key.as_bytes())
            .ok()
            .map(|mac| mac.chain_update(IDENTITY_KEY_HEADER.as_bytes()))
    };

    let Some(presented_tag) = tag(presented).map(|mac| mac.finalize().into_bytes()) else {
        return false;
    };
    tag(expected).is_some_and(|mac| mac.verify_slice(&presented_tag).is_ok())
}

async fn open_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<OpenSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    check_identity_key(&state, &headers)?;

    let user = db::get_user(&state.db, req.user_id).await?;
    let session = state.sessions.open(user).await;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(session.as_ref()))))
}

async fn current_session(AuthSession(session): AuthSession) -> Json<SessionResponse> {
    Json(SessionResponse::from(session.as_ref()))
}

async fn close_session(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> StatusCode {
    state.sessions.close(&session.token).await;
    StatusCode::NO_CONTENT
}

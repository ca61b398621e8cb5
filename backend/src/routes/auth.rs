//! Authentication routes
//!
//! Registration, login, and logout. The session cookie is read and written
//! here, at the transport boundary; the layers below never see it.
//!
//! # Performance
//!
//! Password hashing and verification run on the blocking thread pool.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::CookieJar;
use gatehouse_shared::{CredentialsPayload, MessageResponse, PublicUser};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::services::AuthService;
use crate::state::AppState;

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
}

/// Register a new user
///
/// POST /api/auth/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<CredentialsPayload>,
) -> ApiResult<Json<PublicUser>> {
    let user = AuthService::register(state.users(), state.hasher(), &req).await?;
    info!(id = user.id, username = %user.username, "registered new user");
    Ok(Json(user))
}

/// Login and establish a session
///
/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<CredentialsPayload>,
) -> ApiResult<(CookieJar, Json<MessageResponse>)> {
    let user = AuthService::login(state.users(), state.hasher(), &req).await?;
    let cookie = state.sessions().create(user.clone()).await?;
    info!(id = user.id, username = %user.username, "login succeeded");
    Ok((
        jar.add(cookie),
        Json(MessageResponse::new(format!("Welcome {}!", user.username))),
    ))
}

/// Destroy the current session
///
/// GET /api/auth/logout
///
/// Idempotent: without a live session this still succeeds with
/// "no session". Only a store failure while destroying an existing
/// session is an error.
async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<MessageResponse>)> {
    let sessions = state.sessions();
    match sessions.require(&jar).await {
        Ok(current) => {
            sessions.destroy(&current.token).await?;
            info!(id = current.user.id, username = %current.user.username, "logged out");
            let jar = jar.remove(sessions.removal_cookie());
            Ok((jar, Json(MessageResponse::new("logged out!"))))
        }
        Err(ApiError::Unauthorized(_)) => {
            // Nothing to destroy; clear any stale cookie on the way out
            let jar = jar.remove(sessions.removal_cookie());
            Ok((jar, Json(MessageResponse::new("no session"))))
        }
        Err(err) => Err(err),
    }
}

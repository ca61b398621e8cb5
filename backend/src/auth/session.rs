//! Server-side session management
//!
//! A session maps an opaque token to a snapshot of the authenticated user
//! ({id, username} only, never the password hash). Per client the lifecycle
//! is Anonymous -> login -> Authenticated -> logout or expiry -> Anonymous.
//! The token crosses the transport boundary only inside a cookie; handlers
//! hand the [`CookieJar`] to this manager rather than touching headers.

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use gatehouse_shared::PublicUser;

use crate::config::SessionConfig;
use crate::error::ApiError;
use crate::repositories::SessionStore;

/// A live session resolved from the current request.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub token: String,
    pub user: PublicUser,
}

/// Issues, resolves, and destroys sessions, and owns the cookie contract.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    cookie_name: String,
    cookie_secure: bool,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, config: &SessionConfig) -> Self {
        Self {
            store,
            cookie_name: config.cookie_name.clone(),
            cookie_secure: config.cookie_secure,
        }
    }

    /// Session token carried by the request, if any.
    pub fn token(&self, jar: &CookieJar) -> Option<String> {
        jar.get(&self.cookie_name)
            .map(|cookie| cookie.value().to_string())
    }

    /// Create a session for `user` and return the cookie that carries it.
    ///
    /// The cookie is `HttpOnly` and `SameSite=Lax` with no Max-Age; session
    /// lifetime is enforced server-side by the store's TTL.
    pub async fn create(&self, user: PublicUser) -> Result<Cookie<'static>, ApiError> {
        let token = self.store.create(user).await?;
        Ok(Cookie::build((self.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .secure(self.cookie_secure)
            .same_site(SameSite::Lax)
            .build())
    }

    /// Resolve the request's session or fail with `Unauthorized`.
    ///
    /// Fails when no cookie is present and when the token maps to no live
    /// session (destroyed, expired, or never issued).
    pub async fn require(&self, jar: &CookieJar) -> Result<CurrentSession, ApiError> {
        let token = self
            .token(jar)
            .ok_or_else(|| ApiError::Unauthorized("No active session".to_string()))?;
        let record = self
            .store
            .get(&token)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("No active session".to_string()))?;
        Ok(CurrentSession {
            token,
            user: record.user,
        })
    }

    /// Destroy the session behind `token`. Returns whether one existed.
    ///
    /// A store failure here is [`ApiError::SessionDestroy`], which renders
    /// differently from both logout successes.
    pub async fn destroy(&self, token: &str) -> Result<bool, ApiError> {
        self.store
            .destroy(token)
            .await
            .map_err(|err| ApiError::SessionDestroy(anyhow::Error::new(err)))
    }

    /// Cookie that expires the session cookie on the client.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::from(self.cookie_name.clone());
        cookie.set_path("/");
        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemorySessionStore;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use chrono::Duration;

    fn test_config() -> SessionConfig {
        SessionConfig {
            cookie_name: "gatehouse.sid".to_string(),
            ttl_secs: 3600,
            cookie_secure: false,
        }
    }

    fn manager(ttl: Duration) -> SessionManager {
        SessionManager::new(Arc::new(MemorySessionStore::new(ttl)), &test_config())
    }

    fn sue() -> PublicUser {
        PublicUser {
            id: 2,
            username: "sue".to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_require_round_trips() {
        let sessions = manager(Duration::hours(1));
        let cookie = sessions.create(sue()).await.unwrap();

        let jar = CookieJar::new().add(cookie);
        let current = sessions.require(&jar).await.unwrap();
        assert_eq!(current.user, sue());
        assert!(!current.token.is_empty());
    }

    #[tokio::test]
    async fn require_without_cookie_is_unauthorized() {
        let sessions = manager(Duration::hours(1));
        let err = sessions.require(&CookieJar::new()).await.unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn require_with_stale_token_is_unauthorized() {
        let sessions = manager(Duration::hours(1));
        let jar = CookieJar::new().add(Cookie::new("gatehouse.sid", "stale-token"));

        let err = sessions.require(&jar).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn destroyed_sessions_no_longer_resolve() {
        let sessions = manager(Duration::hours(1));
        let cookie = sessions.create(sue()).await.unwrap();
        let jar = CookieJar::new().add(cookie);

        let current = sessions.require(&jar).await.unwrap();
        assert!(sessions.destroy(&current.token).await.unwrap());
        assert!(sessions.require(&jar).await.is_err());

        // Second destroy finds nothing, still succeeds
        assert!(!sessions.destroy(&current.token).await.unwrap());
    }

    #[tokio::test]
    async fn expired_sessions_do_not_resolve() {
        let sessions = manager(Duration::zero());
        let cookie = sessions.create(sue()).await.unwrap();
        let jar = CookieJar::new().add(cookie);

        assert!(sessions.require(&jar).await.is_err());
    }

    #[tokio::test]
    async fn session_cookie_attributes() {
        let sessions = manager(Duration::hours(1));
        let cookie = sessions.create(sue()).await.unwrap();

        assert_eq!(cookie.name(), "gatehouse.sid");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.secure(), Some(false));
        assert!(cookie.max_age().is_none());
    }

    #[tokio::test]
    async fn secure_flag_follows_config() {
        let config = SessionConfig {
            cookie_secure: true,
            ..test_config()
        };
        let sessions = SessionManager::new(
            Arc::new(MemorySessionStore::new(Duration::hours(1))),
            &config,
        );
        let cookie = sessions.create(sue()).await.unwrap();
        assert_eq!(cookie.secure(), Some(true));
    }

    #[test]
    fn removal_cookie_targets_the_session_cookie() {
        let sessions = manager(Duration::hours(1));
        let cookie = sessions.removal_cookie();
        assert_eq!(cookie.name(), "gatehouse.sid");
        assert_eq!(cookie.path(), Some("/"));
    }
}

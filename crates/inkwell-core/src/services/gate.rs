//! Authorization gate: from a request's token to a loaded identity.

use std::sync::Arc;

use crate::domain::UserProfile;
use crate::error::DomainError;
use crate::ports::{TokenService, UserRepository};

/// Pick the session token of a request: the cookie wins, the
/// `Authorization: Bearer <token>` header is the fallback.
pub fn select_token<'a>(
    cookie: Option<&'a str>,
    authorization: Option<&'a str>,
) -> Option<&'a str> {
    cookie.filter(|t| !t.is_empty()).or_else(|| {
        authorization
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
    })
}

/// Resolves a token into the identity acting on a request.
pub struct AuthGate {
    tokens: Arc<dyn TokenService>,
    users: Arc<dyn UserRepository>,
}

impl AuthGate {
    pub fn new(tokens: Arc<dyn TokenService>, users: Arc<dyn UserRepository>) -> Self {
        Self { tokens, users }
    }

    /// Every failure - no token, bad or expired token, identity gone - is
    /// `Unauthenticated`. Nothing is persisted.
    pub async fn authenticate(&self, token: Option<&str>) -> Result<UserProfile, DomainError> {
        let token = token
            .ok_or_else(|| DomainError::Unauthenticated("Not authorized, no token".to_string()))?;

        let user_id = self.tokens.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            DomainError::Unauthenticated("Not authorized, token failed".to_string())
        })?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(user_id = %user_id, "Token refers to a missing user");
                DomainError::Unauthenticated("Not authorized, user not found".to_string())
            })?;

        Ok(user.profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::ports::UserRepository;
    use crate::services::fakes::{FakeTokens, FakeUsers};
    use uuid::Uuid;

    #[test]
    fn test_cookie_is_preferred_over_header() {
        assert_eq!(
            select_token(Some("from-cookie"), Some("Bearer from-header")),
            Some("from-cookie")
        );
    }

    #[test]
    fn test_header_fallback() {
        assert_eq!(
            select_token(None, Some("Bearer from-header")),
            Some("from-header")
        );
        assert_eq!(select_token(Some(""), Some("Bearer abc")), Some("abc"));
        assert_eq!(select_token(None, Some("Basic abc")), None);
        assert_eq!(select_token(None, Some("Bearer ")), None);
        assert_eq!(select_token(None, None), None);
    }

    #[tokio::test]
    async fn test_authenticate_loads_identity() {
        let users = Arc::new(FakeUsers::default());
        let user = users
            .insert(User::new("A".into(), "a@x.com".into(), "h".into()))
            .await
            .unwrap();
        let gate = AuthGate::new(Arc::new(FakeTokens), users);

        let token = format!("token:{}", user.id);
        let profile = gate.authenticate(Some(&token)).await.unwrap();

        assert_eq!(profile.id, user.id);
    }

    #[tokio::test]
    async fn test_authenticate_failures_are_unauthenticated() {
        let gate = AuthGate::new(Arc::new(FakeTokens), Arc::new(FakeUsers::default()));

        for token in [
            None,
            Some("garbage".to_string()),
            Some(format!("token:{}", Uuid::new_v4())),
        ] {
            let err = gate.authenticate(token.as_deref()).await.unwrap_err();
            assert!(matches!(err, DomainError::Unauthenticated(_)));
        }
    }
}

//! Registration and login.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{User, UserProfile, mask_email};
use crate::error::DomainError;
use crate::ports::{PasswordService, TokenService, UserRepository};
use crate::validation::{NAME_MAX_CHARS, ValidationErrors, Validator};

/// Registration input.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login input.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// A freshly authenticated identity and its session token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: UserProfile,
    pub token: String,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    pub async fn register(&self, input: NewAccount) -> Result<Session, DomainError> {
        let mut v = Validator::new();
        let name = v.required_text("name", "Name", &input.name, NAME_MAX_CHARS);
        let email = v.email(&input.email);
        v.new_password(&input.password);
        let (name, email) = v.finish((name, email))?;

        if self.users.find_by_email(&email).await?.is_some() {
            tracing::debug!(user_email = %mask_email(&email), "Registration rejected, email taken");
            return Err(DomainError::Duplicate(
                "User with this email already exists".to_string(),
            ));
        }

        let password_hash = self.passwords.hash(&input.password)?;
        let user = self
            .users
            .insert(User::new(name, email, password_hash))
            .await?;
        let token = self.issue(&user)?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(Session {
            user: user.profile(),
            token,
        })
    }

    /// Verify credentials and refresh `last_login`. A wrong password leaves
    /// the stored user untouched.
    pub async fn login(&self, input: Credentials) -> Result<Session, DomainError> {
        let mut v = Validator::new();
        let email = v.email(&input.email);
        if input.password.is_empty() {
            v.reject("password", "Password is required");
        }
        let email = v.finish(email)?;

        let user = self.users.find_by_email(&email).await?.ok_or_else(|| {
            DomainError::Validation(ValidationErrors::single(
                "email",
                "User not found. Please register.",
            ))
        })?;

        if !self.passwords.verify(&input.password, &user.password_hash)? {
            tracing::warn!(user_id = %user.id, "Login rejected, wrong password");
            return Err(DomainError::Unauthenticated("Invalid password".to_string()));
        }

        let token = self.issue(&user)?;
        let user = self
            .users
            .record_login(user.id, Utc::now())
            .await?
            .ok_or_else(|| DomainError::user_not_found(user.id))?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(Session {
            user: user.profile(),
            token,
        })
    }

    fn issue(&self, user: &User) -> Result<String, DomainError> {
        self.tokens
            .issue(user.id)
            .map_err(|e| DomainError::Internal(format!("token issuance failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::{FakePasswords, FakeTokens, FakeUsers};

    fn service(users: Arc<FakeUsers>) -> AuthService {
        AuthService::new(users, Arc::new(FakePasswords), Arc::new(FakeTokens))
    }

    fn account(email: &str) -> NewAccount {
        NewAccount {
            name: "A".to_string(),
            email: email.to_string(),
            password: "password1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_normalizes_email_and_leaves_last_login_empty() {
        let users = Arc::new(FakeUsers::default());
        let session = service(users.clone())
            .register(account(" A@X.com "))
            .await
            .unwrap();

        assert_eq!(session.user.email, "a@x.com");
        assert!(session.user.last_login.is_none());
        assert_eq!(session.token, format!("token:{}", session.user.id));
        assert_eq!(users.count().await, 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_rejected() {
        let users = Arc::new(FakeUsers::default());
        let auth = service(users.clone());
        auth.register(account("a@x.com")).await.unwrap();

        let err = auth.register(account("A@x.com")).await.unwrap_err();

        assert!(matches!(err, DomainError::Duplicate(_)));
        assert_eq!(users.count().await, 1);
    }

    #[tokio::test]
    async fn test_register_reports_all_missing_fields() {
        let auth = service(Arc::new(FakeUsers::default()));
        let err = auth
            .register(NewAccount {
                name: String::new(),
                email: String::new(),
                password: String::new(),
            })
            .await
            .unwrap_err();

        let DomainError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.errors().len(), 3);
    }

    #[tokio::test]
    async fn test_login_wrong_password_keeps_last_login() {
        let users = Arc::new(FakeUsers::default());
        let auth = service(users.clone());
        let registered = auth.register(account("a@x.com")).await.unwrap();

        let err = auth
            .login(Credentials {
                email: "a@x.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Unauthenticated(_)));
        let stored = users.get(registered.user.id).await.unwrap();
        assert!(stored.last_login.is_none());
    }

    #[tokio::test]
    async fn test_login_sets_last_login() {
        let auth = service(Arc::new(FakeUsers::default()));
        auth.register(account("a@x.com")).await.unwrap();

        let session = auth
            .login(Credentials {
                email: "a@x.com".to_string(),
                password: "password1".to_string(),
            })
            .await
            .unwrap();

        assert!(session.user.last_login.is_some());
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_a_validation_error() {
        let auth = service(Arc::new(FakeUsers::default()));
        let err = auth
            .login(Credentials {
                email: "nobody@x.com".to_string(),
                password: "password1".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
    }
}

//! Profile reads and the profile-completion update.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{FieldUpdate, ProfileChanges, Socials, UserProfile};
use crate::error::DomainError;
use crate::ports::UserRepository;
use crate::validation::{BIO_MAX_CHARS, NAME_MAX_CHARS, SocialPlatform, Validator};

/// Partial profile update. `socials`, when present, replaces all three links.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: FieldUpdate<String>,
    pub email: FieldUpdate<String>,
    pub bio: FieldUpdate<String>,
    pub socials: FieldUpdate<Socials>,
}

impl ProfilePatch {
    fn validate(self) -> Result<ProfileChanges, DomainError> {
        let mut v = Validator::new();

        let name = self
            .name
            .map(|name| v.required_text("name", "Name", &name, NAME_MAX_CHARS));
        let email = self.email.map(|email| v.email(&email));
        let bio = self
            .bio
            .map(|bio| v.optional_text("bio", "Bio", &bio, BIO_MAX_CHARS));
        let socials = self.socials.map(|s| Socials {
            linkedin: s
                .linkedin
                .and_then(|l| v.social_link(SocialPlatform::LinkedIn, &l)),
            instagram: s
                .instagram
                .and_then(|l| v.social_link(SocialPlatform::Instagram, &l)),
            x: s.x.and_then(|l| v.social_link(SocialPlatform::X, &l)),
        });

        Ok(v.finish(ProfileChanges {
            name,
            email,
            bio,
            socials,
        })?)
    }
}

pub struct ProfileService {
    users: Arc<dyn UserRepository>,
}

impl ProfileService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Own or public profile; both exclude the password hash.
    pub async fn profile(&self, user_id: Uuid) -> Result<UserProfile, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(|u| u.profile())
            .ok_or_else(|| DomainError::user_not_found(user_id))
    }

    /// Validate `patch` and write only the fields it sets. Credentials and
    /// `last_login` are left as stored.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        patch: ProfilePatch,
    ) -> Result<UserProfile, DomainError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(user_id))?;

        let changes = patch.validate()?;

        if let Some(email) = changes.email.as_set() {
            if *email != user.email {
                if let Some(other) = self.users.find_by_email(email).await? {
                    if other.id != user.id {
                        return Err(DomainError::Duplicate(
                            "User with this email already exists".to_string(),
                        ));
                    }
                }
            }
        }

        let user = self
            .users
            .update_profile(user_id, changes, Utc::now())
            .await?
            .ok_or_else(|| DomainError::user_not_found(user_id))?;
        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(user.profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::services::fakes::FakeUsers;

    async fn setup() -> (ProfileService, Arc<FakeUsers>, User) {
        let users = Arc::new(FakeUsers::default());
        let mut user = User::new("Ada".into(), "ada@x.com".into(), "h".into());
        user.bio = Some("Engineer".into());
        let user = users.insert(user).await.unwrap();
        (ProfileService::new(users.clone()), users, user)
    }

    #[tokio::test]
    async fn test_absent_fields_are_kept() {
        let (service, _, user) = setup().await;

        let profile = service
            .update_profile(
                user.id,
                ProfilePatch {
                    name: FieldUpdate::Set("Ada L.".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(profile.name, "Ada L.");
        assert_eq!(profile.email, "ada@x.com");
        assert_eq!(profile.bio.as_deref(), Some("Engineer"));
    }

    #[tokio::test]
    async fn test_empty_bio_clears_it() {
        let (service, _, user) = setup().await;

        let profile = service
            .update_profile(
                user.id,
                ProfilePatch {
                    bio: FieldUpdate::Set(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(profile.bio.is_none());
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected_not_ignored() {
        let (service, users, user) = setup().await;

        let err = service
            .update_profile(
                user.id,
                ProfilePatch {
                    name: FieldUpdate::Set("  ".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(users.get(user.id).await.unwrap().name, "Ada");
    }

    #[tokio::test]
    async fn test_invalid_social_link_is_rejected() {
        let (service, _, user) = setup().await;

        let err = service
            .update_profile(
                user.id,
                ProfilePatch {
                    socials: FieldUpdate::Set(Socials {
                        linkedin: Some("https://example.com/ada".into()),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        let DomainError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.has_field("socials.linkedin"));
    }

    #[tokio::test]
    async fn test_taken_email_is_a_conflict() {
        let (service, users, user) = setup().await;
        users
            .insert(User::new("Bob".into(), "bob@x.com".into(), "h".into()))
            .await
            .unwrap();

        let err = service
            .update_profile(
                user.id,
                ProfilePatch {
                    email: FieldUpdate::Set("BOB@x.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_update_keeps_login_stamp_and_hash() {
        let (service, users, user) = setup().await;
        let login = Utc::now();
        users.record_login(user.id, login).await.unwrap();

        service
            .update_profile(
                user.id,
                ProfilePatch {
                    bio: FieldUpdate::Set("Compilers".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stored = users.get(user.id).await.unwrap();
        assert_eq!(stored.bio.as_deref(), Some("Compilers"));
        assert_eq!(stored.last_login, Some(login));
        assert_eq!(stored.password_hash, "h");
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let (service, _, _) = setup().await;
        let err = service.profile(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::FieldUpdate;

/// Social profile links. Each link is validated against its platform's URL shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Socials {
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub x: Option<String>,
}

/// User entity - a registered account, including its password hash.
///
/// Not `Serialize`; output goes through [`UserProfile`], which has no
/// password hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub socials: Socials,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps. `last_login` stays
    /// empty until the first successful login.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            bio: None,
            socials: Socials::default(),
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            bio: self.bio.clone(),
            socials: self.socials.clone(),
            last_login: self.last_login,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Validated changes to a user's editable profile fields.
///
/// Credentials and `last_login` are never part of it, so applying it cannot
/// clobber a concurrent login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub name: FieldUpdate<String>,
    pub email: FieldUpdate<String>,
    pub bio: FieldUpdate<Option<String>>,
    pub socials: FieldUpdate<Socials>,
}

impl ProfileChanges {
    pub fn apply_to(self, user: &mut User, at: DateTime<Utc>) {
        self.name.apply_to(&mut user.name);
        self.email.apply_to(&mut user.email);
        self.bio.apply_to(&mut user.bio);
        self.socials.apply_to(&mut user.socials);
        user.updated_at = at;
    }
}

/// Password-free view of a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub socials: Socials,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mask an email address for logging, keeping the first character and the domain.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}

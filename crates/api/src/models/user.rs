//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use freshcart_core::{Email, Role, UserId};

/// A registered user (domain type).
///
/// Carries the password hash and reset-token fields; use [`User::public`]
/// before serializing a user outward. Invariant: `reset_token` and
/// `reset_token_expires_at` are both present or both absent, and an expired
/// token is treated as absent.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address, unique and case-sensitive as stored.
    pub email: Email,
    /// Argon2 password hash. Never exposed outward.
    pub password_hash: String,
    /// Authorization role.
    pub role: Role,
    /// Pending password-reset token (6 numeric digits), if any.
    pub reset_token: Option<String>,
    /// Expiry of the pending reset token.
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The outward-facing view of this user, with the hash stripped.
    #[must_use]
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }

    /// The pending reset token, treating an expired token as absent.
    #[must_use]
    pub fn pending_reset_token(&self, now: DateTime<Utc>) -> Option<&str> {
        match (&self.reset_token, self.reset_token_expires_at) {
            (Some(token), Some(expires_at)) if expires_at > now => Some(token),
            _ => None,
        }
    }
}

/// The serializable view of a user. Every read path that sends a user to a
/// client goes through this type, so the hash field cannot leak.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// The identity attached to an order at checkout.
///
/// Checkout accepts both logged-in and guest carts, so the degraded case is
/// a first-class variant rather than a swallowed verification error.
#[derive(Debug, Clone)]
pub enum Identity {
    /// A verified bearer token that resolved to a live user record.
    Authenticated {
        id: UserId,
        name: String,
        email: Email,
    },
    /// No token, an invalid token, or a token for a deleted user.
    Anonymous,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_user(reset: Option<(&str, DateTime<Utc>)>) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(1),
            name: "Ada".to_string(),
            email: Email::parse("ada@example.com").unwrap(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$...".to_string(),
            role: Role::Customer,
            reset_token: reset.map(|(t, _)| t.to_string()),
            reset_token_expires_at: reset.map(|(_, e)| e),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_public_view_has_no_hash() {
        let user = sample_user(None);
        let json = serde_json::to_value(user.public()).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["role"], "customer");
    }

    #[test]
    fn test_pending_reset_token_live() {
        let now = Utc::now();
        let user = sample_user(Some(("123456", now + Duration::hours(1))));
        assert_eq!(user.pending_reset_token(now), Some("123456"));
    }

    #[test]
    fn test_pending_reset_token_expired_is_absent() {
        let now = Utc::now();
        let user = sample_user(Some(("123456", now - Duration::seconds(1))));
        assert_eq!(user.pending_reset_token(now), None);
    }

    #[test]
    fn test_pending_reset_token_none() {
        let user = sample_user(None);
        assert_eq!(user.pending_reset_token(Utc::now()), None);
    }
}

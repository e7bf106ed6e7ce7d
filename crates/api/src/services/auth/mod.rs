//! Authentication service: registration, login, password reset.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

use freshcart_core::{Email, Role};

use crate::db::{RepositoryError, users::UserRepository};
use crate::models::User;

/// How long a password-reset token stays redeemable.
const RESET_TOKEN_TTL: Duration = Duration::hours(1);

/// The special characters the password policy accepts.
const PASSWORD_SPECIALS: &str = "!@#$&*~";

/// Authentication service backed by the user repository.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new customer account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` for empty fields,
    /// `AuthError::InvalidEmail` or `AuthError::WeakPassword` for rejected
    /// values, and `AuthError::EmailTaken` if the email is already in use.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingField("name"));
        }
        if email.trim().is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        let email = Email::parse(email)?;
        validate_password(password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(password)?;

        // The unique index still closes the find-then-create race
        self.users
            .create(name, &email, &password_hash, Role::Customer)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })
    }

    /// Authenticate an email/password pair and return the matching user.
    ///
    /// The two failure modes stay distinct: `UserNotFound` for an unknown
    /// email and `WrongPassword` for a bad password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` or `AuthError::WrongPassword` on
    /// bad credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if email.trim().is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        // A malformed email cannot match any account
        let Ok(email) = Email::parse(email) else {
            return Err(AuthError::UserNotFound);
        };

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::WrongPassword);
        }

        Ok(user)
    }

    /// Start a password reset: store a fresh 6-digit token with a 1-hour
    /// expiry on the account, overwriting any pending one.
    ///
    /// Email delivery is not wired up; the token is emitted to the server
    /// log instead.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no account has this email.
    pub async fn request_password_reset(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        if email.trim().is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        let Ok(email) = Email::parse(email) else {
            return Err(AuthError::UserNotFound);
        };

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let token = generate_reset_token();
        let expires_at = now + RESET_TOKEN_TTL;
        self.users
            .set_reset_token(user.id, &token, expires_at)
            .await?;

        // Email delivery stub
        tracing::info!(
            email = %email,
            token = %token,
            expires_at = %expires_at,
            "Password reset token issued"
        );

        Ok(())
    }

    /// Redeem a reset token: validate it against the pending one, then store
    /// the new password and clear the token in a single write.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidResetToken` when the token does not match,
    /// `AuthError::ResetTokenExpired` when it has lapsed, and
    /// `AuthError::WeakPassword` when the replacement fails the policy.
    pub async fn reset_password(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        if email.trim().is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if token.trim().is_empty() {
            return Err(AuthError::MissingField("token"));
        }
        if new_password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        let Ok(email) = Email::parse(email) else {
            return Err(AuthError::UserNotFound);
        };

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        check_reset_token(&user, token, now)?;
        validate_password(new_password)?;

        let password_hash = hash_password(new_password)?;
        self.users
            .update_password_and_clear_reset(user.id, &password_hash)
            .await?;

        Ok(())
    }
}

/// Validate the submitted reset token against the user's pending one.
///
/// Token mismatch and expiry are reported as distinct errors; a missing
/// pending token counts as a mismatch.
fn check_reset_token(user: &User, submitted: &str, now: DateTime<Utc>) -> Result<(), AuthError> {
    let (Some(stored), Some(expires_at)) = (&user.reset_token, user.reset_token_expires_at) else {
        return Err(AuthError::InvalidResetToken);
    };
    if stored != submitted {
        return Err(AuthError::InvalidResetToken);
    }
    if expires_at <= now {
        return Err(AuthError::ResetTokenExpired);
    }
    Ok(())
}

/// Validate password strength.
///
/// Requires at least 8 characters with one uppercase letter, one lowercase
/// letter, one digit, and one of `!@#$&*~`.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < 8 {
        return Err(AuthError::WeakPassword(
            "Password must be at least 8 characters long".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(AuthError::WeakPassword(
            "Password must contain an uppercase letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(AuthError::WeakPassword(
            "Password must contain a lowercase letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AuthError::WeakPassword(
            "Password must contain a digit".to_string(),
        ));
    }
    if !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return Err(AuthError::WeakPassword(format!(
            "Password must contain one of {PASSWORD_SPECIALS}"
        )));
    }
    Ok(())
}

/// Generate a 6-digit password-reset token.
#[must_use]
fn generate_reset_token() -> String {
    use rand::Rng;
    let code: u32 = rand::rng().random_range(100_000..1_000_000);
    code.to_string()
}

/// Hash a password using Argon2id.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
///
/// A malformed stored hash is a server-side fault, not a wrong password.
fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHash)?;
    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

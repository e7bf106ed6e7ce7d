//! User repository for database operations.
//!
//! This is the credential store: user records with their argon2 hashes,
//! roles, and password-reset fields. Row types are private; everything
//! leaving this module is a domain [`User`].

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use freshcart_core::{Email, Role, UserId};

use super::{RepositoryError, map_unique_violation};
use crate::models::User;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, reset_token, reset_token_expires_at, \
     created_at, updated_at";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    reset_token: Option<String>,
    reset_token_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, RepositoryError> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role: Role = row.role.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            name: row.name,
            email,
            password_hash: row.password_hash,
            role,
            reset_token: row.reset_token,
            reset_token_expires_at: row.reset_token_expires_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their email address (exact, case-sensitive match).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if the stored record is invalid.
    pub async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if the stored record is invalid.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Create a new user.
    ///
    /// The unique index on `email` is the real uniqueness guarantee; callers
    /// may pre-check with [`Self::find_by_email`] for a friendlier error,
    /// but the index closes the find-then-create race.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists, and
    /// `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
        role: Role,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (name, email, password_hash, role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(name)
        .bind(email.as_str())
        .bind(password_hash)
        .bind(role.to_string())
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "email already exists"))?;

        User::try_from(row)
    }

    /// List all users, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    /// Count all users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Partially update a user's profile fields. `None` leaves a field
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no user has this ID,
    /// `RepositoryError::Conflict` on a duplicate email, and
    /// `RepositoryError::Database` for other database errors.
    pub async fn update_profile(
        &self,
        id: UserId,
        name: Option<&str>,
        email: Option<&Email>,
        role: Option<Role>,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET \
                 name = COALESCE($2, name), \
                 email = COALESCE($3, email), \
                 role = COALESCE($4, role), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(email.map(Email::as_str))
        .bind(role.map(|r| r.to_string()))
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "email already exists"))?
        .ok_or(RepositoryError::NotFound)?;

        User::try_from(row)
    }

    /// Delete a user.
    ///
    /// Returns `true` if a user was deleted, `false` if none had this ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Store a pending password-reset token and its expiry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no user has this ID.
    pub async fn set_reset_token(
        &self,
        id: UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE users SET reset_token = $2, reset_token_expires_at = $3, updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(token)
        .bind(expires_at)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Store a new password hash and clear the reset fields in the same
    /// statement, making the reset token single-use.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no user has this ID.
    pub async fn update_password_and_clear_reset(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, reset_token = NULL, \
                 reset_token_expires_at = NULL, updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

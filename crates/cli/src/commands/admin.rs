//! Admin user management commands.

use freshcart_core::{Email, Role};

use freshcart_api::db::users::UserRepository;
use freshcart_api::services::auth::{hash_password, validate_password};

use super::CliError;

/// Create an admin user.
///
/// The password is subject to the same policy as registration.
pub async fn create(email: &str, name: &str, password: &str) -> Result<(), CliError> {
    let email = Email::parse(email).map_err(|e| CliError::Invalid(e.to_string()))?;
    validate_password(password).map_err(|e| CliError::Invalid(e.to_string()))?;
    let password_hash = hash_password(password).map_err(|e| CliError::Invalid(e.to_string()))?;

    let pool = super::connect().await?;
    let user = UserRepository::new(&pool)
        .create(name, &email, &password_hash, Role::Admin)
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "Admin user created");
    Ok(())
}

//! Registration and login

use crypto_core::jwt::JwtKeys;
use crypto_core::{hash_password, verify_password};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::BlogStore;
use crate::error::{BlogError, Result};
use crate::models::{NewUser, User};
use crate::validators::{validate_email, validate_name, validate_password, MAX_NAME_LEN};

#[derive(Debug, Clone)]
pub struct UserInput {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct AuthData {
    pub token: String,
    pub user_id: Uuid,
}

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn BlogStore>,
    keys: Arc<JwtKeys>,
}

impl AuthService {
    pub fn new(store: Arc<dyn BlogStore>, keys: Arc<JwtKeys>) -> Self {
        Self { store, keys }
    }

    /// Register a new user.
    ///
    /// Input is validated before the store is touched. The returned record
    /// still holds the password hash; callers must not serialize it outward.
    pub async fn register(&self, input: UserInput) -> Result<User> {
        if !validate_email(&input.email) {
            return Err(BlogError::invalid("E-mail is invalid"));
        }
        if !validate_password(&input.password) {
            return Err(BlogError::invalid("Password too short"));
        }
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(BlogError::invalid("Name is required"));
        }
        if !validate_name(&name) {
            return Err(BlogError::invalid(format!(
                "Name must be at most {} characters",
                MAX_NAME_LEN
            )));
        }

        if self.store.find_user_by_email(&input.email).await?.is_some() {
            warn!(email = %input.email, "Registration rejected, email already in use");
            return Err(BlogError::EmailAlreadyExists);
        }

        let password = input.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

        let user = self
            .store
            .create_user(NewUser {
                email: input.email,
                name,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Check credentials and issue a bearer token
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthData> {
        let Some(user) = self.store.find_user_by_email(email).await? else {
            warn!(email = %email, "Login failed, unknown email");
            return Err(BlogError::InvalidCredentials("User not found."));
        };

        let password = password.to_string();
        let password_hash = user.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
                .await??;

        if !matches {
            warn!(user_id = %user.id, "Login failed, incorrect password");
            return Err(BlogError::InvalidCredentials("Password is incorrect."));
        }

        let token = self.keys.issue(user.id, &user.email)?;

        info!(user_id = %user.id, "User logged in");
        Ok(AuthData {
            token,
            user_id: user.id,
        })
    }
}

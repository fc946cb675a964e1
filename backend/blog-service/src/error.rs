use async_graphql::ErrorExtensions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BlogError>;

/// Message shown in place of any internal failure
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred.";

/// One field-level validation message, surfaced in the `data` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMessage {
    pub message: String,
}

impl FieldMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("{message}")]
    Validation {
        message: String,
        data: Vec<FieldMessage>,
    },

    #[error("User already exist")]
    EmailAlreadyExists,

    #[error("{0}")]
    InvalidCredentials(&'static str),

    #[error("Not authenticated!")]
    Unauthenticated,

    #[error("Not authorized!")]
    Unauthorized,

    #[error("{0}")]
    NotFound(&'static str),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl BlogError {
    /// Validation failure carrying only a message
    pub fn invalid(message: impl Into<String>) -> Self {
        BlogError::Validation {
            message: message.into(),
            data: Vec::new(),
        }
    }

    /// Validation failure with field-level detail under "Invalid input."
    pub fn invalid_input(data: Vec<FieldMessage>) -> Self {
        BlogError::Validation {
            message: "Invalid input.".to_string(),
            data,
        }
    }

    /// Numeric status surfaced to callers
    pub fn status(&self) -> u16 {
        match self {
            BlogError::Validation { .. } | BlogError::EmailAlreadyExists => 422,
            BlogError::InvalidCredentials(_) => 401,
            BlogError::Unauthenticated | BlogError::Unauthorized => 403,
            BlogError::NotFound(_) => 404,
            BlogError::Database(_) | BlogError::Internal(_) => 500,
        }
    }

    pub fn field_messages(&self) -> &[FieldMessage] {
        match self {
            BlogError::Validation { data, .. } => data,
            _ => &[],
        }
    }

    /// Message safe to show to callers. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            BlogError::Database(_) | BlogError::Internal(_) => GENERIC_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl ErrorExtensions for BlogError {
    fn extend(&self) -> async_graphql::Error {
        let status = self.status();
        let data = serde_json::to_value(self.field_messages())
            .ok()
            .and_then(|json| async_graphql::Value::from_json(json).ok())
            .filter(|_| !self.field_messages().is_empty());

        async_graphql::Error::new(self.public_message()).extend_with(move |_, ext| {
            ext.set("status", status);
            if let Some(data) = data.clone() {
                ext.set("data", data);
            }
        })
    }
}

// Conversions from external error types
impl From<sqlx::Error> for BlogError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!(error = %err, "Database error");
        BlogError::Database(err.to_string())
    }
}

impl From<crypto_core::PasswordError> for BlogError {
    fn from(err: crypto_core::PasswordError) -> Self {
        tracing::error!(error = %err, "Password hashing error");
        BlogError::Internal(err.to_string())
    }
}

impl From<crypto_core::TokenError> for BlogError {
    fn from(err: crypto_core::TokenError) -> Self {
        tracing::error!(error = %err, "Token signing error");
        BlogError::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for BlogError {
    fn from(err: tokio::task::JoinError) -> Self {
        BlogError::Internal(format!("blocking task failed: {err}"))
    }
}

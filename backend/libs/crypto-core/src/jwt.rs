/// JWT issuance and validation for the blog backend
///
/// Tokens are HS256-signed with a single server-held secret. The secret is
/// loaded once at startup and handed to both the issuer (login) and the
/// verifier (request middleware) through a shared `JwtKeys` value.
///
/// ## Usage
///
/// ```rust
/// use crypto_core::jwt::JwtKeys;
/// use uuid::Uuid;
///
/// let keys = JwtKeys::from_secret("an-example-secret-that-is-at-least-32-bytes").unwrap();
/// let user_id = Uuid::new_v4();
/// let token = keys.issue(user_id, "reader@example.com").unwrap();
/// let claims = keys.verify(&token).unwrap();
/// assert_eq!(claims.user_id, user_id.to_string());
/// ```
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Constants
// ============================================================================

/// Access token lifetime when no override is configured
pub const DEFAULT_TOKEN_EXPIRY_SECONDS: i64 = 3600;

/// Shortest accepted HMAC secret
pub const MIN_SECRET_BYTES: usize = 32;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

// ============================================================================
// Data Structures
// ============================================================================

/// Identity claim carried inside a bearer token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User ID as UUID string
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Email address at the time of login
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Parse the subject as a UUID. `None` for an empty or foreign id.
    pub fn user_uuid(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.user_id).ok()
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret too short: need at least {MIN_SECRET_BYTES} bytes, got {0}")]
    WeakSecret(usize),

    #[error("Token expired")]
    Expired,

    #[error("Token validation failed: {0}")]
    Invalid(jsonwebtoken::errors::Error),

    #[error("Failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

// ============================================================================
// Keys
// ============================================================================

/// Signing and verification keys derived from the shared secret.
///
/// Cheap to clone; immutable after construction.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry: Duration,
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtKeys")
            .field("secret", &"[REDACTED]")
            .field("expiry_seconds", &self.expiry.num_seconds())
            .finish()
    }
}

impl JwtKeys {
    /// Build keys from an HMAC secret.
    ///
    /// ## Errors
    ///
    /// Returns `TokenError::WeakSecret` if the secret is shorter than
    /// `MIN_SECRET_BYTES`.
    pub fn from_secret(secret: &str) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_BYTES {
            return Err(TokenError::WeakSecret(secret.len()));
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry: Duration::seconds(DEFAULT_TOKEN_EXPIRY_SECONDS),
        })
    }

    /// Override the token lifetime
    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    // ========================================================================
    // Token Generation
    // ========================================================================

    /// Issue a token for `user_id` valid from now until `now + expiry`
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, email, Utc::now())
    }

    /// Issue a token as if signed at `issued_at`
    pub fn issue_at(
        &self,
        user_id: Uuid,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            user_id: user_id.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.expiry).timestamp(),
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding).map_err(TokenError::Signing)
    }

    // ========================================================================
    // Token Validation
    // ========================================================================

    /// Validate signature, algorithm and expiry, then return the claims.
    ///
    /// `token` is the bare token without any scheme prefix.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e),
            })
    }
}

// ============================================================================
// Tests
// ============================================================================

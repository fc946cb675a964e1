/// Integration tests for crypto-core tokens and passwords
///
/// This test module covers:
/// - Token wire format (`userId`, `email`, `iat`, `exp`)
/// - Algorithm pinning to HS256
/// - Keys rebuilt from the same secret verify each other's tokens
/// - A complete register/login credential lifecycle
use chrono::{Duration, Utc};
use crypto_core::jwt::{JwtKeys, DEFAULT_TOKEN_EXPIRY_SECONDS, MIN_SECRET_BYTES};
use crypto_core::{hash_password, verify_password, TokenError};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use uuid::Uuid;

const TEST_SECRET: &str = "integration-secret-for-crypto-core-0123456789";

#[derive(Serialize)]
struct RawClaims<'a> {
    #[serde(rename = "userId")]
    user_id: &'a str,
    email: &'a str,
    iat: i64,
    exp: i64,
}

fn sign_raw(algorithm: Algorithm, claims: &RawClaims<'_>) -> String {
    encode(
        &Header::new(algorithm),
        claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

#[test]
fn test_externally_signed_token_verifies() {
    let keys = JwtKeys::from_secret(TEST_SECRET).unwrap();
    let user_id = Uuid::new_v4().to_string();
    let now = Utc::now().timestamp();

    let token = sign_raw(
        Algorithm::HS256,
        &RawClaims {
            user_id: &user_id,
            email: "reader@example.com",
            iat: now,
            exp: now + 60,
        },
    );

    let claims = keys.verify(&token).unwrap();
    assert_eq!(claims.user_id, user_id);
    assert_eq!(claims.email, "reader@example.com");
}

#[test]
fn test_other_hmac_algorithms_rejected() {
    let keys = JwtKeys::from_secret(TEST_SECRET).unwrap();
    let user_id = Uuid::new_v4().to_string();
    let now = Utc::now().timestamp();
    let claims = RawClaims {
        user_id: &user_id,
        email: "reader@example.com",
        iat: now,
        exp: now + 60,
    };

    for algorithm in [Algorithm::HS384, Algorithm::HS512] {
        let token = sign_raw(algorithm, &claims);
        assert!(
            matches!(keys.verify(&token), Err(TokenError::Invalid(_))),
            "{:?} must be rejected",
            algorithm
        );
    }
}

#[test]
fn test_keys_from_same_secret_are_interchangeable() {
    let issuer = JwtKeys::from_secret(TEST_SECRET).unwrap();
    let verifier = JwtKeys::from_secret(TEST_SECRET).unwrap();
    let user_id = Uuid::new_v4();

    let token = issuer.issue(user_id, "reader@example.com").unwrap();
    let claims = verifier.verify(&token).unwrap();

    assert_eq!(claims.user_uuid(), Some(user_id));
    assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_EXPIRY_SECONDS);
}

#[test]
fn test_token_expired_one_second_past_exp() {
    let keys = JwtKeys::from_secret(TEST_SECRET).unwrap();
    let issued = Utc::now() - Duration::seconds(DEFAULT_TOKEN_EXPIRY_SECONDS + 1);

    let token = keys.issue_at(Uuid::new_v4(), "reader@example.com", issued).unwrap();
    assert!(matches!(keys.verify(&token), Err(TokenError::Expired)));
}

#[test]
fn test_secret_length_boundary() {
    let short = "a".repeat(MIN_SECRET_BYTES - 1);
    assert!(matches!(
        JwtKeys::from_secret(&short),
        Err(TokenError::WeakSecret(_))
    ));

    let exact = "a".repeat(MIN_SECRET_BYTES);
    assert!(JwtKeys::from_secret(&exact).is_ok());
}

#[test]
fn test_complete_credential_lifecycle() {
    let keys = JwtKeys::from_secret(TEST_SECRET).unwrap();
    let user_id = Uuid::new_v4();

    // Registration
    let stored_hash = hash_password("hunter22").unwrap();

    // Login
    assert!(!verify_password("hunter23", &stored_hash).unwrap());
    assert!(verify_password("hunter22", &stored_hash).unwrap());
    let token = keys.issue(user_id, "reader@example.com").unwrap();

    // Authenticated request
    let claims = keys.verify(&token).unwrap();
    assert_eq!(claims.user_uuid(), Some(user_id));
}

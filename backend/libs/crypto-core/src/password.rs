/// Password hashing and verification using Argon2id
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

/// Memory cost in KiB. Fixed so every stored hash has the same work factor.
const MEMORY_COST_KIB: u32 = 19_456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Invalid password hash format: {0}")]
    MalformedHash(String),
}

fn argon2() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
        .map_err(|e| PasswordError::Hashing(e.to_string()))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password using Argon2id
///
/// ## Security
///
/// - Algorithm: Argon2id, v0x13, fixed cost parameters
/// - Salt: Random 16-byte salt generated per password
///
/// CPU-bound and deliberately slow; async callers should run it on a
/// blocking thread.
///
/// ## Returns
///
/// PHC-formatted hash string safe for database storage
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = argon2()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hashing(e.to_string()))?
        .to_string();

    Ok(hash)
}

/// Verify a password against its PHC hash
///
/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash cannot be
/// parsed or verification itself fails.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

    match argon2()?.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Hashing(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_valid_password() {
        let hash = hash_password("hunter22").expect("should hash password successfully");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("hunter22", &hash).expect("should verify successfully"));
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("hunter22").expect("should hash password successfully");
        assert!(!verify_password("hunter23", &hash).expect("verification should succeed"));
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let hash1 = hash_password("hunter22").expect("should hash successfully");
        let hash2 = hash_password("hunter22").expect("should hash successfully");
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let hash = hash_password("plaintext-secret").expect("should hash successfully");
        assert!(!hash.contains("plaintext-secret"));
    }

    #[test]
    fn test_fixed_cost_parameters_recorded_in_hash() {
        let hash = hash_password("hunter22").expect("should hash successfully");
        assert!(hash.contains("m=19456,t=2,p=1"));
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let result = verify_password("hunter22", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }
}

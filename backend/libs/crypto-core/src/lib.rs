//! Shared credential primitives for the blog backend
//!
//! - `jwt`: HS256 bearer token issuance and verification
//! - `password`: Argon2id password hashing

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtKeys, TokenError};
pub use password::{hash_password, verify_password, PasswordError};

//! Blog Service Middleware

pub mod auth;
pub mod jwt;

pub use auth::{ensure_owner, require_auth};
pub use jwt::{AuthenticatedUser, JwtMiddleware};

//! Authorization guards invoked by each operation

use uuid::Uuid;

use crate::error::{BlogError, Result};
use crate::middleware::jwt::AuthenticatedUser;

/// Verify the caller is authenticated and return the identity.
///
/// Call before any store access.
pub fn require_auth(user: Option<&AuthenticatedUser>) -> Result<&AuthenticatedUser> {
    user.ok_or(BlogError::Unauthenticated)
}

/// Check the caller owns a loaded resource.
///
/// Call after the resource is loaded and before any mutation.
pub fn ensure_owner(user: &AuthenticatedUser, resource_owner_id: Uuid) -> Result<()> {
    if user.user_id != resource_owner_id {
        tracing::warn!(
            user_id = %user.user_id,
            owner_id = %resource_owner_id,
            "Ownership check failed"
        );
        return Err(BlogError::Unauthorized);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Uuid::new_v4(),
            email: "reader@example.com".to_string(),
        }
    }

    #[test]
    fn test_require_auth_without_identity() {
        assert!(matches!(require_auth(None), Err(BlogError::Unauthenticated)));
    }

    #[test]
    fn test_require_auth_with_identity() {
        let user = user();
        assert_eq!(require_auth(Some(&user)).unwrap(), &user);
    }

    #[test]
    fn test_owner_passes() {
        let user = user();
        assert!(ensure_owner(&user, user.user_id).is_ok());
    }

    #[test]
    fn test_non_owner_rejected() {
        let result = ensure_owner(&user(), Uuid::new_v4());
        assert!(matches!(result, Err(BlogError::Unauthorized)));
    }
}

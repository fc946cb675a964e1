use std::sync::Arc;

use crate::db::BlogStore;
use crate::error::{BlogError, Result};
use crate::middleware::{require_auth, AuthenticatedUser};
use crate::models::{Post, User};

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn BlogStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }

    /// The caller's own record
    pub async fn me(&self, user: Option<&AuthenticatedUser>) -> Result<User> {
        let user = require_auth(user)?;

        self.store
            .find_user_by_id(user.user_id)
            .await?
            .ok_or(BlogError::NotFound("No user found!"))
    }

    /// Every post the user created, oldest first
    pub async fn posts_of(&self, user_id: uuid::Uuid) -> Result<Vec<Post>> {
        self.store.find_posts_by_creator(user_id, None, 0).await
    }
}

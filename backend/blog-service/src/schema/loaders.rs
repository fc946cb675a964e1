//! DataLoader for post creators
//!
//! `Post.creator` goes through `UserLoader`, so a page of posts resolves its
//! creators with one `find_users_by_ids` call instead of one lookup per post.

use async_graphql::dataloader::Loader;
use async_graphql::ErrorExtensions;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::BlogStore;
use crate::models::User;

#[derive(Clone)]
pub struct UserLoader {
    store: Arc<dyn BlogStore>,
}

impl UserLoader {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl Loader<Uuid> for UserLoader {
    type Value = User;
    type Error = async_graphql::Error;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        tracing::debug!(count = keys.len(), "Batch loading users");

        let users = self
            .store
            .find_users_by_ids(keys)
            .await
            .map_err(|e| e.extend())?;

        Ok(users.into_iter().map(|user| (user.id, user)).collect())
    }
}

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::BlogStore;
use crate::error::{BlogError, Result};
use crate::models::{NewPost, NewUser, Post, PostChanges, User};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    /// Insertion order doubles as creation order
    posts: Vec<Post>,
}

/// In-process store backed by a single lock.
///
/// Each method holds the lock for its whole read-check-write, which gives the
/// same per-operation atomicity the database provides.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        Ok(self.inner.read().await.users.get(&user_id).cloned())
    }

    async fn find_users_by_ids(&self, user_ids: &[Uuid]) -> Result<Vec<User>> {
        let inner = self.inner.read().await;
        Ok(user_ids
            .iter()
            .filter_map(|id| inner.users.get(id).cloned())
            .collect())
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(BlogError::EmailAlreadyExists);
        }

        let user = user.into_user(Utc::now());
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn create_post(&self, post: NewPost) -> Result<Post> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&post.creator_id) {
            return Err(BlogError::NotFound("User Not Found."));
        }

        let post = post.into_post(Utc::now());
        inner.posts.push(post.clone());
        Ok(post)
    }

    async fn find_post_by_id(&self, post_id: Uuid) -> Result<Option<Post>> {
        let inner = self.inner.read().await;
        Ok(inner.posts.iter().find(|p| p.id == post_id).cloned())
    }

    async fn find_posts_by_creator(
        &self,
        creator_id: Uuid,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<Post>> {
        let inner = self.inner.read().await;
        let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let limit = limit
            .map(|l| usize::try_from(l.max(0)).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);

        Ok(inner
            .posts
            .iter()
            .filter(|p| p.creator_id == creator_id)
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_posts(&self) -> Result<i64> {
        let inner = self.inner.read().await;
        Ok(inner.posts.len() as i64)
    }

    async fn update_post(&self, post_id: Uuid, changes: PostChanges) -> Result<Option<Post>> {
        let mut inner = self.inner.write().await;
        let Some(post) = inner.posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(None);
        };

        post.apply(changes, Utc::now());
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.posts.len();
        inner.posts.retain(|p| p.id != post_id);
        Ok(inner.posts.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: "Reader".to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
        }
    }

    fn new_post(creator_id: Uuid, title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: "Some content here".to_string(),
            image_url: None,
            creator_id,
        }
    }

    #[tokio::test]
    async fn test_email_uniqueness_enforced() {
        let store = MemoryStore::new();
        store.create_user(new_user("a@example.com")).await.unwrap();

        let result = store.create_user(new_user("a@example.com")).await;
        assert!(matches!(result, Err(BlogError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn test_post_requires_existing_creator() {
        let store = MemoryStore::new();
        let result = store.create_post(new_post(Uuid::new_v4(), "Hello World")).await;

        assert!(matches!(result, Err(BlogError::NotFound(_))));
        assert_eq!(store.count_posts().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_posts_by_creator_paging() {
        let store = MemoryStore::new();
        let alice = store.create_user(new_user("alice@example.com")).await.unwrap();
        let bob = store.create_user(new_user("bob@example.com")).await.unwrap();

        for title in ["First", "Second", "Third"] {
            store.create_post(new_post(alice.id, title)).await.unwrap();
        }
        store.create_post(new_post(bob.id, "Other")).await.unwrap();

        let page = store.find_posts_by_creator(alice.id, Some(2), 2).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title, "Third");

        let all = store.find_posts_by_creator(alice.id, None, 0).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(store.count_posts().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_update_keeps_image_when_not_given() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("a@example.com")).await.unwrap();
        let mut post = new_post(user.id, "Hello World");
        post.image_url = Some("images/cover.png".to_string());
        let post = store.create_post(post).await.unwrap();

        let updated = store
            .update_post(
                post.id,
                PostChanges {
                    title: "New title".to_string(),
                    content: "New content".to_string(),
                    image_url: None,
                },
            )
            .await
            .unwrap()
            .expect("post exists");

        assert_eq!(updated.title, "New title");
        assert_eq!(updated.image_url.as_deref(), Some("images/cover.png"));
        assert_eq!(updated.creator_id, user.id);
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("a@example.com")).await.unwrap();
        let post = store.create_post(new_post(user.id, "Hello World")).await.unwrap();

        assert!(store.delete_post(post.id).await.unwrap());
        assert!(!store.delete_post(post.id).await.unwrap());
        assert!(store
            .find_posts_by_creator(user.id, None, 0)
            .await
            .unwrap()
            .is_empty());
    }
}

//! Persistence for users and posts
//!
//! Operations are expressed against `BlogStore` so the service layer runs
//! unchanged over PostgreSQL (`PgStore`) or the in-process `MemoryStore`.
//! A user's posts are looked up through `posts.creator_id`; no owned-post
//! list is stored on the user record.

pub mod memory;
pub mod pool;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{NewPost, NewUser, Post, PostChanges, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait BlogStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>>;

    /// Batch lookup; missing ids are skipped
    async fn find_users_by_ids(&self, user_ids: &[Uuid]) -> Result<Vec<User>>;

    /// Insert a user. Fails with `EmailAlreadyExists` if the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User>;

    /// Insert a post. Fails with `NotFound` if the creator does not exist.
    async fn create_post(&self, post: NewPost) -> Result<Post>;

    async fn find_post_by_id(&self, post_id: Uuid) -> Result<Option<Post>>;

    /// Posts of one creator in creation order. `limit: None` returns all.
    async fn find_posts_by_creator(
        &self,
        creator_id: Uuid,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<Post>>;

    /// Count of all posts across all users
    async fn count_posts(&self) -> Result<i64>;

    /// Returns `None` if the post no longer exists
    async fn update_post(&self, post_id: Uuid, changes: PostChanges) -> Result<Option<Post>>;

    /// Returns whether a post was removed
    async fn delete_post(&self, post_id: Uuid) -> Result<bool>;
}

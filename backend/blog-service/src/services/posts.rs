//! Post operations
//!
//! Every operation runs `require_auth` before touching the store. Update and
//! delete load the post first (404), then run `ensure_owner` (403), then
//! mutate.

use std::sync::Arc;
use tracing::info;

use crate::db::BlogStore;
use crate::error::{BlogError, Result};
use crate::middleware::{ensure_owner, require_auth, AuthenticatedUser};
use crate::models::{NewPost, Post, PostChanges};
use crate::validators::{parse_post_id, validate_post_input};

/// Fixed page size for `list`
pub const POSTS_PER_PAGE: i64 = 2;

#[derive(Debug, Clone)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

impl PostInput {
    fn image_url(&self) -> Option<String> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
    }
}

/// One page of the caller's posts plus the global post count
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total_posts: i64,
}

#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn BlogStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, user: Option<&AuthenticatedUser>, input: PostInput) -> Result<Post> {
        let user = require_auth(user)?;
        validate_post_input(&input.title, &input.content)?;

        let creator = self
            .store
            .find_user_by_id(user.user_id)
            .await?
            .ok_or(BlogError::NotFound("User Not Found."))?;

        let image_url = input.image_url();
        let post = self
            .store
            .create_post(NewPost {
                title: input.title,
                content: input.content,
                image_url,
                creator_id: creator.id,
            })
            .await?;

        info!(post_id = %post.id, user_id = %creator.id, "Post created");
        Ok(post)
    }

    /// Caller's posts for a 1-based page. `totalPosts` counts every post.
    pub async fn list(&self, user: Option<&AuthenticatedUser>, page: Option<i32>) -> Result<PostPage> {
        let user = require_auth(user)?;

        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(BlogError::invalid("Page must be at least 1"));
        }
        let offset = (i64::from(page) - 1) * POSTS_PER_PAGE;

        let total_posts = self.store.count_posts().await?;
        let posts = self
            .store
            .find_posts_by_creator(user.user_id, Some(POSTS_PER_PAGE), offset)
            .await?;

        Ok(PostPage { posts, total_posts })
    }

    pub async fn get(&self, user: Option<&AuthenticatedUser>, id: &str) -> Result<Post> {
        require_auth(user)?;
        let post_id = parse_post_id(id)?;

        self.store
            .find_post_by_id(post_id)
            .await?
            .ok_or(BlogError::NotFound("No post found!"))
    }

    pub async fn update(
        &self,
        user: Option<&AuthenticatedUser>,
        id: &str,
        input: PostInput,
    ) -> Result<Post> {
        let user = require_auth(user)?;
        let post_id = parse_post_id(id)?;
        validate_post_input(&input.title, &input.content)?;

        let post = self
            .store
            .find_post_by_id(post_id)
            .await?
            .ok_or(BlogError::NotFound("No post found!"))?;
        ensure_owner(user, post.creator_id)?;

        let image_url = input.image_url();
        let updated = self
            .store
            .update_post(
                post.id,
                PostChanges {
                    title: input.title,
                    content: input.content,
                    image_url,
                },
            )
            .await?
            .ok_or(BlogError::NotFound("No post found!"))?;

        info!(post_id = %updated.id, user_id = %user.user_id, "Post updated");
        Ok(updated)
    }

    pub async fn delete(&self, user: Option<&AuthenticatedUser>, id: &str) -> Result<()> {
        let user = require_auth(user)?;
        let post_id = parse_post_id(id)?;

        let post = self
            .store
            .find_post_by_id(post_id)
            .await?
            .ok_or(BlogError::NotFound("No post found!"))?;
        ensure_owner(user, post.creator_id)?;

        if !self.store.delete_post(post.id).await? {
            return Err(BlogError::NotFound("No post found!"));
        }

        info!(post_id = %post.id, user_id = %user.user_id, "Post deleted");
        Ok(())
    }
}

//! PostgreSQL-backed store

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::BlogStore;
use crate::error::{BlogError, Result};
use crate::models::{NewPost, NewUser, Post, PostChanges, User};

const USER_COLUMNS: &str = "id, email, name, password_hash, created_at, updated_at";
const POST_COLUMNS: &str = "id, title, content, image_url, creator_id, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

#[async_trait]
impl BlogStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }

    async fn find_users_by_ids(&self, user_ids: &[Uuid]) -> Result<Vec<User>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)"
        ))
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let result = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, email, name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(e) if is_unique_violation(&e) => Err(BlogError::EmailAlreadyExists),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_post(&self, post: NewPost) -> Result<Post> {
        let result = sqlx::query_as::<_, Post>(&format!(
            r#"
            INSERT INTO posts (id, title, content, image_url, creator_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image_url)
        .bind(post.creator_id)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(post) => Ok(post),
            Err(e) if is_foreign_key_violation(&e) => Err(BlogError::NotFound("User Not Found.")),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_post_by_id(&self, post_id: Uuid) -> Result<Option<Post>> {
        let post =
            sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1"))
                .bind(post_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(post)
    }

    async fn find_posts_by_creator(
        &self,
        creator_id: Uuid,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<Post>> {
        // LIMIT NULL is "no limit" in PostgreSQL
        let posts = sqlx::query_as::<_, Post>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE creator_id = $1
            ORDER BY created_at ASC, id ASC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(creator_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn count_posts(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM posts")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get::<i64, _>("count"))
    }

    async fn update_post(&self, post_id: Uuid, changes: PostChanges) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!(
            r#"
            UPDATE posts
            SET title = $2,
                content = $3,
                image_url = COALESCE($4, image_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(post_id)
        .bind(&changes.title)
        .bind(&changes.content)
        .bind(&changes.image_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

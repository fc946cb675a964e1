use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Blog post. `creator_id` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub creator_id: Uuid,
}

impl NewPost {
    pub fn into_post(self, now: DateTime<Utc>) -> Post {
        Post {
            id: Uuid::new_v4(),
            title: self.title,
            content: self.content,
            image_url: self.image_url,
            creator_id: self.creator_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Editable fields of a post. `image_url: None` keeps the current image.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

impl Post {
    pub fn apply(&mut self, changes: PostChanges, now: DateTime<Utc>) {
        self.title = changes.title;
        self.content = changes.content;
        if let Some(image_url) = changes.image_url {
            self.image_url = Some(image_url);
        }
        self.updated_at = now;
    }
}

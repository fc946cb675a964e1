//! Post type, queries and mutations

use async_graphql::dataloader::DataLoader;
use async_graphql::{
    Context, ErrorExtensions, InputObject, Object, Result as GraphQLResult, SimpleObject, ID,
};
use chrono::{DateTime, Utc};

use super::caller;
use super::loaders::UserLoader;
use super::user::UserObject;
use crate::error::BlogError;
use crate::models::Post;
use crate::services::{PostInput, PostService};

pub struct PostObject(pub Post);

#[Object(name = "Post")]
impl PostObject {
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn content(&self) -> &str {
        &self.0.content
    }

    async fn image_url(&self) -> Option<&str> {
        self.0.image_url.as_deref()
    }

    async fn creator(&self, ctx: &Context<'_>) -> GraphQLResult<UserObject> {
        let loader = ctx.data::<DataLoader<UserLoader>>()?;
        let user = loader
            .load_one(self.0.creator_id)
            .await?
            .ok_or_else(|| BlogError::NotFound("User Not Found.").extend())?;

        Ok(UserObject(user))
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }
}

#[derive(SimpleObject)]
pub struct PostData {
    pub posts: Vec<PostObject>,
    pub total_posts: i64,
}

#[derive(InputObject, Clone, Debug)]
pub struct PostInputData {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

impl From<PostInputData> for PostInput {
    fn from(input: PostInputData) -> Self {
        Self {
            title: input.title,
            content: input.content,
            image_url: input.image_url,
        }
    }
}

#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    /// The caller's posts, two per page
    async fn posts(&self, ctx: &Context<'_>, page: Option<i32>) -> GraphQLResult<PostData> {
        let service = ctx.data::<PostService>()?;
        let page = service
            .list(caller(ctx), page)
            .await
            .map_err(|e| e.extend())?;

        Ok(PostData {
            posts: page.posts.into_iter().map(PostObject).collect(),
            total_posts: page.total_posts,
        })
    }

    async fn post(&self, ctx: &Context<'_>, id: ID) -> GraphQLResult<PostObject> {
        let service = ctx.data::<PostService>()?;
        let post = service
            .get(caller(ctx), id.as_str())
            .await
            .map_err(|e| e.extend())?;

        Ok(PostObject(post))
    }
}

#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    async fn create_post(
        &self,
        ctx: &Context<'_>,
        post_input: PostInputData,
    ) -> GraphQLResult<PostObject> {
        let service = ctx.data::<PostService>()?;
        let post = service
            .create(caller(ctx), post_input.into())
            .await
            .map_err(|e| e.extend())?;

        Ok(PostObject(post))
    }

    async fn update_post(
        &self,
        ctx: &Context<'_>,
        id: ID,
        post_input: PostInputData,
    ) -> GraphQLResult<PostObject> {
        let service = ctx.data::<PostService>()?;
        let post = service
            .update(caller(ctx), id.as_str(), post_input.into())
            .await
            .map_err(|e| e.extend())?;

        Ok(PostObject(post))
    }

    async fn delete_post(&self, ctx: &Context<'_>, id: ID) -> GraphQLResult<String> {
        let service = ctx.data::<PostService>()?;
        service
            .delete(caller(ctx), id.as_str())
            .await
            .map_err(|e| e.extend())?;

        Ok("Post Deleted Successfully".to_string())
    }
}

//! User type and the `user` query

use async_graphql::{Context, ErrorExtensions, Object, Result as GraphQLResult, ID};
use chrono::{DateTime, Utc};

use super::caller;
use super::post::PostObject;
use crate::models::User;
use crate::services::UserService;

/// Public view of a user. The password hash has no field here.
pub struct UserObject(pub User);

#[Object(name = "User")]
impl UserObject {
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    /// Posts created by this user, oldest first
    async fn posts(&self, ctx: &Context<'_>) -> GraphQLResult<Vec<PostObject>> {
        let users = ctx.data::<UserService>()?;
        let posts = users.posts_of(self.0.id).await.map_err(|e| e.extend())?;
        Ok(posts.into_iter().map(PostObject).collect())
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }
}

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// The authenticated caller's own record
    async fn user(&self, ctx: &Context<'_>) -> GraphQLResult<UserObject> {
        let users = ctx.data::<UserService>()?;
        let user = users.me(caller(ctx)).await.map_err(|e| e.extend())?;
        Ok(UserObject(user))
    }
}

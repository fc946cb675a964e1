//! Authentication schema and resolvers

use async_graphql::{
    Context, ErrorExtensions, InputObject, Object, Result as GraphQLResult, SimpleObject, ID,
};

use super::user::UserObject;
use crate::services::{AuthService, UserInput};

#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "AuthData")]
pub struct AuthPayload {
    pub token: String,
    pub user_id: ID,
}

#[derive(InputObject, Clone, Debug)]
pub struct UserInputData {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl From<UserInputData> for UserInput {
    fn from(input: UserInputData) -> Self {
        Self {
            email: input.email,
            name: input.name,
            password: input.password,
        }
    }
}

#[derive(Default)]
pub struct AuthQuery;

#[Object]
impl AuthQuery {
    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> GraphQLResult<AuthPayload> {
        let auth = ctx.data::<AuthService>()?;
        let data = auth.login(&email, &password).await.map_err(|e| e.extend())?;

        Ok(AuthPayload {
            token: data.token,
            user_id: ID(data.user_id.to_string()),
        })
    }
}

#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        user_input: UserInputData,
    ) -> GraphQLResult<UserObject> {
        let auth = ctx.data::<AuthService>()?;
        let user = auth
            .register(user_input.into())
            .await
            .map_err(|e| e.extend())?;

        Ok(UserObject(user))
    }
}

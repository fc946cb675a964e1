//! GraphQL schema
//!
//! Resolvers read the caller from the request data (`AuthenticatedUser`,
//! attached by the HTTP handler) and delegate to `services`.

pub mod auth;
pub mod loaders;
pub mod post;
pub mod user;

use async_graphql::{dataloader::DataLoader, Context, EmptySubscription, MergedObject, Schema};
use crypto_core::jwt::JwtKeys;
use std::sync::Arc;

use crate::config::GraphQLConfig;
use crate::db::BlogStore;
use crate::middleware::AuthenticatedUser;
use crate::services::{AuthService, PostService, UserService};

#[derive(MergedObject, Default)]
pub struct QueryRoot(auth::AuthQuery, post::PostQuery, user::UserQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(auth::AuthMutation, post::PostMutation);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema over a store and signing keys
pub fn build_schema(
    store: Arc<dyn BlogStore>,
    keys: Arc<JwtKeys>,
    config: &GraphQLConfig,
) -> AppSchema {
    let mut builder = Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(AuthService::new(store.clone(), keys))
    .data(PostService::new(store.clone()))
    .data(UserService::new(store.clone()))
    .data(DataLoader::new(loaders::UserLoader::new(store), tokio::spawn))
    .limit_depth(config.max_depth)
    .limit_complexity(config.max_complexity);

    if !config.introspection {
        builder = builder.disable_introspection();
    }

    builder.finish()
}

/// Identity attached to the current request, if any
pub(crate) fn caller<'a>(ctx: &'a Context<'_>) -> Option<&'a AuthenticatedUser> {
    ctx.data_opt::<AuthenticatedUser>()
}

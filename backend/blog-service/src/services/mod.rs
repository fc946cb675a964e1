//! Business logic for the GraphQL resolvers
//!
//! Services take the caller's identity as `Option<&AuthenticatedUser>` and
//! return `BlogError`, leaving GraphQL concerns to `schema`.

pub mod auth;
pub mod posts;
pub mod users;

pub use auth::{AuthData, AuthService, UserInput};
pub use posts::{PostInput, PostPage, PostService, POSTS_PER_PAGE};
pub use users::UserService;

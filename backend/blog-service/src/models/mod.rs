//! Data models for blog-service
//!
//! - User: registered author with a hashed password
//! - Post: a blog entry owned by exactly one user

pub mod post;
pub mod user;

pub use post::{NewPost, Post, PostChanges};
pub use user::{NewUser, User};

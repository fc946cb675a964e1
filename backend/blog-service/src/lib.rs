//! Blog backend: user accounts and posts behind a single GraphQL endpoint.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod schema;
pub mod services;
pub mod validators;

pub use error::{BlogError, Result};

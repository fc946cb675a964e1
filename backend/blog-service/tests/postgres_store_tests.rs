//! PgStore tests against a live PostgreSQL
//!
//! Run with `DATABASE_URL=postgres://... cargo test -- --ignored`.

use blog_service::config::DatabaseConfig;
use blog_service::db::{pool, BlogStore, PgStore};
use blog_service::models::{NewPost, NewUser, PostChanges};
use blog_service::BlogError;
use uuid::Uuid;

async fn create_test_store() -> PgStore {
    let config = DatabaseConfig {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
        max_connections: 2,
        min_connections: 1,
        acquire_timeout_secs: 5,
        connect_timeout_secs: 5,
    };
    let pool = pool::create_pool(&config)
        .await
        .expect("Failed to create test pool");
    pool::migrate(&pool).await.expect("Failed to migrate");
    PgStore::new(pool)
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        name: "Reader".to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
    }
}

fn unique_email() -> String {
    format!("{}@example.com", Uuid::new_v4())
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_duplicate_email_maps_to_conflict() {
    let store = create_test_store().await;
    let email = unique_email();

    store.create_user(new_user(&email)).await.unwrap();
    let err = store.create_user(new_user(&email)).await.unwrap_err();

    assert!(matches!(err, BlogError::EmailAlreadyExists));
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_post_for_unknown_creator_is_not_found() {
    let store = create_test_store().await;

    let err = store
        .create_post(NewPost {
            title: "Hello World".to_string(),
            content: "Some content here".to_string(),
            image_url: None,
            creator_id: Uuid::new_v4(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status(), 404);
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_post_lifecycle() {
    let store = create_test_store().await;
    let user = store.create_user(new_user(&unique_email())).await.unwrap();

    let post = store
        .create_post(NewPost {
            title: "Hello World".to_string(),
            content: "Some content here".to_string(),
            image_url: Some("images/cat.png".to_string()),
            creator_id: user.id,
        })
        .await
        .unwrap();

    let updated = store
        .update_post(
            post.id,
            PostChanges {
                title: "Goodbye World".to_string(),
                content: "Other content".to_string(),
                image_url: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Goodbye World");
    assert_eq!(updated.image_url.as_deref(), Some("images/cat.png"));

    let listed = store.find_posts_by_creator(user.id, None, 0).await.unwrap();
    assert_eq!(listed.len(), 1);

    assert!(store.delete_post(post.id).await.unwrap());
    assert!(store.find_post_by_id(post.id).await.unwrap().is_none());
    assert!(!store.delete_post(post.id).await.unwrap());
}

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use crypto_core::jwt::JwtKeys;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::prelude::*;

use blog_service::config::Config;
use blog_service::db::{self, BlogStore, MemoryStore, PgStore};
use blog_service::handlers;
use blog_service::middleware::JwtMiddleware;
use blog_service::schema::build_schema;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,blog_service=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_thread_ids(true)
                .with_target(true),
        )
        .init();

    info!("Starting blog-service...");

    let config = Config::from_env().context("Failed to load configuration")?;

    let store: Arc<dyn BlogStore> = match &config.database {
        Some(db_config) => {
            let pool = db::pool::create_pool(db_config)
                .await
                .context("Failed to connect to database")?;
            db::pool::migrate(&pool)
                .await
                .context("Failed to run database migrations")?;
            Arc::new(PgStore::new(pool))
        }
        None => Arc::new(MemoryStore::new()),
    };

    let keys = JwtKeys::from_secret(&config.jwt.secret)
        .context("Failed to initialize JWT keys")?
        .with_expiry(chrono::Duration::seconds(config.jwt.expiry_seconds));
    let keys = Arc::new(keys);

    let schema = build_schema(store, keys.clone(), &config.graphql);
    let uploads = web::Data::new(config.uploads.clone());
    let playground = config.graphql.playground;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!(
        addr = %bind_addr,
        workers = config.server.workers,
        playground,
        "blog-service listening"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(JwtMiddleware::new(keys.clone()))
            .wrap(Logger::default())
            .app_data(web::Data::new(schema.clone()))
            .app_data(uploads.clone())
            .configure(|cfg| handlers::configure(cfg, playground))
    })
    .workers(config.server.workers)
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run()
    .await?;

    Ok(())
}

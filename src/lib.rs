mod authentication;
pub mod cache;
pub mod config;
pub mod context;
pub mod data_formats;
pub mod db_helpers;
pub mod errors;
mod handlers;
pub mod models;
pub mod telemetry;

use anyhow::Context;
pub use anyhow::Result;
use axum::http::StatusCode;
use axum::{routing::*, Extension, Json, Router};
pub use errors::{RequestError, RequestErrorJsonWrapper};
use handlers::*;
use sqlx::{
    migrate::{MigrateDatabase, Migrator},
    sqlite::SqlitePoolOptions,
    Sqlite, SqlitePool,
};
use std::{
    net::{SocketAddr, TcpListener},
    sync::Arc,
    time::Duration,
};
use tower_http::trace::TraceLayer;

use crate::{cache::MemoryCache, config::AppConfig, context::ContextProvider};

pub type JsonResponse<T> = (StatusCode, Json<T>);

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Shared by every handler through an `Extension`.
pub struct AppState {
    pub pool: SqlitePool,
    pub context: ContextProvider,
    pub jwt_secret: String,
}

impl AppState {
    pub fn new(pool: SqlitePool, jwt_secret: String, context_ttl: Duration) -> Self {
        AppState {
            pool,
            context: ContextProvider::new(Arc::new(MemoryCache::new()), context_ttl),
            jwt_secret,
        }
    }

    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let pool = init_db(&config.database_url).await?;
        Ok(Self::new(
            pool,
            config.jwt_secret.clone(),
            config.context_cache_ttl,
        ))
    }
}

pub async fn run_app(app: Router, address: SocketAddr) -> Result<()> {
    tracing::info!(%address, "server started");
    axum::Server::bind(&address)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

pub async fn init_db(db_url: &str) -> Result<SqlitePool> {
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        tracing::info!(db_url, "creating database");
        Sqlite::create_database(db_url)
            .await
            .context("Failed to create database")?;
    }
    let pool = SqlitePool::connect(db_url).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// A private in-memory database, kept on a single connection so it outlives each query.
pub async fn init_memory_db() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    tracing::info!("running migrations");
    MIGRATOR
        .run(pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("migrations completed");
    Ok(())
}

pub fn get_random_free_port() -> (u16, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Could not bind a free port");
    match listener.local_addr() {
        Ok(addr) => (addr.port(), addr),
        Err(_) => panic!("Could not get a free port"),
    }
}

/// Lowercase ASCII slug: word characters kept, whitespace and dashes collapsed to one `-`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_dash = true;
        }
    }
    slug
}

pub fn make_router() -> Router {
    let admin = Router::new()
        .route(
            "/categories",
            get(admin_list_categories).post(admin_create_category),
        )
        .route(
            "/categories/:slug",
            put(admin_update_category).delete(admin_delete_category),
        )
        .route("/posts", get(admin_list_posts).post(admin_create_post))
        .route("/posts-restore", post(admin_bulk_restore_posts))
        .route(
            "/posts/:slug",
            get(admin_get_post)
                .put(admin_update_post)
                .delete(admin_delete_post),
        )
        .route("/posts/:slug/restore", post(admin_restore_post))
        .route("/authors", get(admin_list_authors).post(admin_create_author))
        .route(
            "/authors/:id",
            put(admin_update_author).delete(admin_delete_author),
        )
        .route("/pages", get(admin_list_pages).post(admin_create_page))
        .route(
            "/pages/:slug",
            put(admin_update_page).delete(admin_delete_page),
        );

    Router::new()
        .route("/", get(home))
        .route("/check_health", get(alive))
        .route("/blog", get(list_posts))
        .route("/blog/:slug", get(detail_post))
        .route("/blog/category/:slug", get(posts_by_category))
        .route("/pages/:slug", get(page_detail))
        .route("/users/login", post(login_user))
        .route("/users", post(register_user))
        .route("/user", get(get_current_user))
        .nest("/admin", admin)
        .fallback(not_found)
}

/// The router with state and request tracing attached.
pub fn build_app(state: Arc<AppState>) -> Router {
    make_router()
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_matches_url_rules() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Rust -- is   fun!  "), "rust-is-fun");
        assert_eq!(slugify("don't panic"), "dont-panic");
        assert_eq!(slugify("snake_case title"), "snake_case-title");
        assert_eq!(slugify("¡¡¡"), "");
    }
}

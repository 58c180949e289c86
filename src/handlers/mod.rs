use axum::{
    http::{StatusCode, Uri},
    Json,
};
use sqlx::SqlitePool;

use crate::{
    data_formats::{CategoryResponse, PostResponse},
    db_helpers,
    errors::RequestError,
    models::Post,
};

mod admin_handlers;
mod blog_handlers;
mod page_handlers;
mod user_handlers;

pub use admin_handlers::*;
pub use blog_handlers::*;
pub use page_handlers::*;
pub use user_handlers::*;

type JsonResult<T> = Result<Json<T>, RequestError>;

// ----------------- Helper Handlers -----------------
pub async fn alive() -> &'static str {
    "alive"
}

pub async fn not_found(uri: Uri) -> Result<(), (StatusCode, String)> {
    Err((
        StatusCode::NOT_FOUND,
        format!("URL {} provided was not found", uri),
    ))
}

/// Attaches each post's categories.
async fn post_responses(
    pool: &SqlitePool,
    posts: Vec<Post>,
) -> Result<Vec<PostResponse>, RequestError> {
    let ids: Vec<i64> = posts.iter().map(|post| post.id).collect();
    let mut categories = db_helpers::categories_for_posts(pool, &ids).await?;
    Ok(posts
        .into_iter()
        .map(|post| {
            let post_categories = categories
                .remove(&post.id)
                .unwrap_or_default()
                .into_iter()
                .map(CategoryResponse::from)
                .collect();
            PostResponse::new(post, post_categories)
        })
        .collect())
}

async fn post_response(pool: &SqlitePool, post: Post) -> Result<PostResponse, RequestError> {
    post_responses(pool, vec![post])
        .await?
        .pop()
        .ok_or(RequestError::ServerError)
}

use std::sync::Arc;

use axum::{extract::Path, Extension, Json};
use chrono::Utc;

use crate::{
    data_formats::{
        CategoryPostsWrapper, CategoryResponse, HomeWrapper, MultiplePostsWrapper, PostWrapper,
    },
    db_helpers,
    errors::RequestError,
    AppState,
};

use super::{post_response, post_responses, JsonResult};

// ----------------- Blog Handlers -----------------
pub async fn home(Extension(state): Extension<Arc<AppState>>) -> JsonResult<HomeWrapper> {
    let pool = &state.pool;
    let now = Utc::now();

    let categories = db_helpers::categories_for_home(pool)
        .await?
        .into_iter()
        .map(CategoryResponse::from)
        .collect();
    let popular_posts = post_responses(pool, db_helpers::for_home_popular(pool, now).await?).await?;
    let latest_posts = post_responses(pool, db_helpers::for_home_latest(pool, now).await?).await?;
    let featured_post = match db_helpers::for_home_featured(pool, now).await? {
        Some(post) => Some(post_response(pool, post).await?),
        None => None,
    };

    Ok(Json(HomeWrapper {
        categories,
        popular_posts,
        latest_posts,
        featured_post,
        site: state.context.site(pool).await?,
    }))
}

pub async fn list_posts(
    Extension(state): Extension<Arc<AppState>>,
) -> JsonResult<MultiplePostsWrapper> {
    let pool = &state.pool;
    let posts = db_helpers::published_posts(pool, Utc::now()).await?;
    let posts = post_responses(pool, posts).await?;
    Ok(Json(MultiplePostsWrapper::new(
        posts,
        Some(state.context.site(pool).await?),
    )))
}

pub async fn detail_post(
    Extension(state): Extension<Arc<AppState>>,
    Path(slug): Path<String>,
) -> JsonResult<PostWrapper> {
    let pool = &state.pool;
    let post = db_helpers::get_published_post_by_slug(pool, &slug, Utc::now())
        .await?
        .ok_or(RequestError::NotFound("Post not found"))?;
    Ok(Json(PostWrapper {
        post: post_response(pool, post).await?,
        site: Some(state.context.site(pool).await?),
    }))
}

pub async fn posts_by_category(
    Extension(state): Extension<Arc<AppState>>,
    Path(slug): Path<String>,
) -> JsonResult<CategoryPostsWrapper> {
    let pool = &state.pool;
    let category = db_helpers::get_category_by_slug(pool, &slug)
        .await?
        .ok_or(RequestError::NotFound("Category not found"))?;
    let posts = db_helpers::published_posts_in_category(pool, category.id, Utc::now()).await?;
    let posts = post_responses(pool, posts).await?;
    Ok(Json(CategoryPostsWrapper {
        category: category.into(),
        post_count: posts.len(),
        posts,
        site: state.context.site(pool).await?,
    }))
}

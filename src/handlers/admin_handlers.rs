use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;

use crate::{
    authentication::AuthUser,
    data_formats::{
        AdminPageQueryParams, AdminPostQueryParams, AuthorProfile, AuthorWrapper, BulkRestoreRequest, CategoryResponse,
        CategoryWrapper, CreateCategoryRequest, CreatePageRequest, CreatePostRequest,
        MultipleAuthorsWrapper, MultipleCategoriesWrapper, MultiplePagesWrapper,
        MultiplePostsWrapper, PageResponse, PageWrapper, PostWrapper, RestoredWrapper,
        SaveAuthorRequest, UpdateCategoryRequest, UpdatePageRequest, UpdatePostRequest,
    },
    db_helpers,
    errors::RequestError,
    AppState,
};

use super::{post_response, post_responses, JsonResult};

// ----------------- Category Admin -----------------
pub async fn admin_list_categories(
    _: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
) -> JsonResult<MultipleCategoriesWrapper> {
    let categories = db_helpers::list_categories(&state.pool)
        .await?
        .into_iter()
        .map(CategoryResponse::from)
        .collect();
    Ok(Json(MultipleCategoriesWrapper { categories }))
}

pub async fn admin_create_category(
    _: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    Json(CreateCategoryRequest { name, slug }): Json<CreateCategoryRequest>,
) -> JsonResult<CategoryWrapper> {
    let category = db_helpers::insert_category(&state.pool, &name, slug, Utc::now()).await?;
    Ok(Json(CategoryWrapper {
        category: category.into(),
    }))
}

pub async fn admin_update_category(
    _: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(request): Json<UpdateCategoryRequest>,
) -> JsonResult<CategoryWrapper> {
    let category =
        db_helpers::update_category_in_db(&state.pool, &slug, request, Utc::now()).await?;
    Ok(Json(CategoryWrapper {
        category: category.into(),
    }))
}

pub async fn admin_delete_category(
    _: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<StatusCode, RequestError> {
    db_helpers::delete_category_in_db(&state.pool, &slug).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ----------------- Post Admin -----------------
pub async fn admin_list_posts(
    _: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<AdminPostQueryParams>,
) -> JsonResult<MultiplePostsWrapper> {
    let posts = db_helpers::list_all_posts(&state.pool, params).await?;
    let posts = post_responses(&state.pool, posts).await?;
    Ok(Json(MultiplePostsWrapper::new(posts, None)))
}

pub async fn admin_get_post(
    _: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    Path(slug): Path<String>,
) -> JsonResult<PostWrapper> {
    let post = db_helpers::get_post_by_slug(&state.pool, &slug)
        .await?
        .ok_or(RequestError::NotFound("Post not found"))?;
    Ok(Json(PostWrapper {
        post: post_response(&state.pool, post).await?,
        site: None,
    }))
}

pub async fn admin_create_post(
    user: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<CreatePostRequest>,
) -> JsonResult<PostWrapper> {
    let post = db_helpers::insert_post(&state.pool, user.id, request, Utc::now()).await?;
    tracing::info!(slug = %post.slug, user_id = user.id, "post created");
    Ok(Json(PostWrapper {
        post: post_response(&state.pool, post).await?,
        site: None,
    }))
}

pub async fn admin_update_post(
    _: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(request): Json<UpdatePostRequest>,
) -> JsonResult<PostWrapper> {
    let post = db_helpers::update_post_in_db(&state.pool, &slug, request, Utc::now()).await?;
    Ok(Json(PostWrapper {
        post: post_response(&state.pool, post).await?,
        site: None,
    }))
}

pub async fn admin_delete_post(
    _: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    Path(slug): Path<String>,
) -> JsonResult<PostWrapper> {
    let post = db_helpers::soft_delete_post_in_db(&state.pool, &slug, Utc::now()).await?;
    tracing::info!(slug = %post.slug, "post soft-deleted");
    Ok(Json(PostWrapper {
        post: post_response(&state.pool, post).await?,
        site: None,
    }))
}

pub async fn admin_restore_post(
    _: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    Path(slug): Path<String>,
) -> JsonResult<PostWrapper> {
    let post = db_helpers::restore_post_in_db(&state.pool, &slug, Utc::now()).await?;
    tracing::info!(slug = %post.slug, "post restored");
    Ok(Json(PostWrapper {
        post: post_response(&state.pool, post).await?,
        site: None,
    }))
}

pub async fn admin_bulk_restore_posts(
    _: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    Json(BulkRestoreRequest { slugs }): Json<BulkRestoreRequest>,
) -> JsonResult<RestoredWrapper> {
    let restored = db_helpers::bulk_restore_posts_in_db(&state.pool, &slugs, Utc::now()).await?;
    tracing::info!(restored, "posts restored in bulk");
    Ok(Json(RestoredWrapper { restored }))
}

// ----------------- Author Admin -----------------
pub async fn admin_list_authors(
    _: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
) -> JsonResult<MultipleAuthorsWrapper> {
    let authors = db_helpers::list_authors(&state.pool)
        .await?
        .into_iter()
        .map(AuthorProfile::from)
        .collect();
    Ok(Json(MultipleAuthorsWrapper { authors }))
}

pub async fn admin_create_author(
    user: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<SaveAuthorRequest>,
) -> JsonResult<AuthorWrapper> {
    let user_id = request.user_id.unwrap_or(user.id);
    let author = db_helpers::insert_author(&state.pool, user_id, request, Utc::now()).await?;
    state.context.invalidate_site_author();
    Ok(Json(AuthorWrapper {
        author: author.into(),
    }))
}

pub async fn admin_update_author(
    _: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(request): Json<SaveAuthorRequest>,
) -> JsonResult<AuthorWrapper> {
    let author = db_helpers::update_author_in_db(&state.pool, id, request, Utc::now()).await?;
    state.context.invalidate_site_author();
    Ok(Json(AuthorWrapper {
        author: author.into(),
    }))
}

pub async fn admin_delete_author(
    _: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, RequestError> {
    db_helpers::delete_author_in_db(&state.pool, id).await?;
    state.context.invalidate_site_author();
    Ok(StatusCode::NO_CONTENT)
}

// ----------------- Page Admin -----------------
pub async fn admin_list_pages(
    _: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<AdminPageQueryParams>,
) -> JsonResult<MultiplePagesWrapper> {
    let pages = db_helpers::list_pages(&state.pool, params)
        .await?
        .into_iter()
        .map(PageResponse::from)
        .collect();
    Ok(Json(MultiplePagesWrapper { pages }))
}

pub async fn admin_create_page(
    _: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<CreatePageRequest>,
) -> JsonResult<PageWrapper> {
    let page = db_helpers::insert_page(&state.pool, request, Utc::now()).await?;
    state.context.invalidate_footer_pages();
    Ok(Json(PageWrapper {
        page: page.into(),
        site: None,
    }))
}

pub async fn admin_update_page(
    _: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(request): Json<UpdatePageRequest>,
) -> JsonResult<PageWrapper> {
    let page = db_helpers::update_page_in_db(&state.pool, &slug, request, Utc::now()).await?;
    state.context.invalidate_footer_pages();
    Ok(Json(PageWrapper {
        page: page.into(),
        site: None,
    }))
}

pub async fn admin_delete_page(
    _: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<StatusCode, RequestError> {
    db_helpers::delete_page_in_db(&state.pool, &slug).await?;
    state.context.invalidate_footer_pages();
    Ok(StatusCode::NO_CONTENT)
}

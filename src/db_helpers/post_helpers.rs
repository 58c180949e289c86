use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool};

use crate::{
    data_formats::{AdminPostQueryParams, CreatePostRequest, UpdatePostRequest},
    errors::RequestError,
    models::{Post, PostStatus},
    slugify,
};

use super::{
    bind_params, bind_params_as, category_ids_by_slugs, nullable, placeholders, QueryBuilder,
    SqlParam,
};

// The stored status never says 'deleted'; project it from deleted_at.
const POST_QUERY: &str = r#"
    SELECT posts.id,
           posts.title,
           posts.content,
           posts.slug,
           CASE WHEN posts.deleted_at IS NOT NULL THEN 'deleted' ELSE posts.status END AS status,
           posts.publish_at,
           posts.deleted_at,
           posts.is_featured,
           posts.image,
           posts.user_id,
           users.username AS author_username,
           posts.created_at,
           posts.updated_at
    FROM posts
        JOIN users ON users.id = posts.user_id"#;

const NEWEST_FIRST: &str = " ORDER BY posts.created_at DESC, posts.id DESC";

const HOME_LATEST_LIMIT: i64 = 3;
const HOME_POPULAR_LIMIT: i64 = 5;

/// Named post filters; each maps to one SQL condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostScope {
    /// Every row, dead ones included.
    All,
    Alive,
    Dead,
    Published,
    Drafts,
    Archived,
    Featured,
}

impl PostScope {
    fn condition(self, now: DateTime<Utc>) -> Option<(&'static str, Vec<SqlParam>)> {
        let published = "posts.deleted_at IS NULL AND posts.status = 'published' AND posts.publish_at <= ?";
        match self {
            PostScope::All => None,
            PostScope::Alive => Some(("posts.deleted_at IS NULL", vec![])),
            PostScope::Dead => Some(("posts.deleted_at IS NOT NULL", vec![])),
            PostScope::Published => Some((published, vec![now.into()])),
            PostScope::Drafts => Some((
                "posts.deleted_at IS NULL AND posts.status = 'draft'",
                vec![],
            )),
            PostScope::Archived => Some((
                "posts.deleted_at IS NULL AND posts.status = 'archived'",
                vec![],
            )),
            PostScope::Featured => Some((
                "posts.deleted_at IS NULL AND posts.status = 'published' AND posts.publish_at <= ? AND posts.is_featured = 1",
                vec![now.into()],
            )),
        }
    }

    fn filter(self, builder: QueryBuilder, now: DateTime<Utc>) -> QueryBuilder {
        match self.condition(now) {
            Some((condition, params)) => builder.add_filter(condition, params),
            None => builder,
        }
    }
}

async fn fetch_posts(
    pool: &SqlitePool,
    builder: QueryBuilder,
    limit: Option<i64>,
) -> Result<Vec<Post>, RequestError> {
    let builder = builder.append(NEWEST_FIRST, vec![]);
    let builder = match limit {
        Some(limit) => builder.append(" LIMIT ?", vec![SqlParam::Int(limit)]),
        None => builder,
    };
    let (query, params) = builder.build();
    let posts = bind_params_as(sqlx::query_as::<Sqlite, Post>(&query), params)
        .fetch_all(pool)
        .await?;
    Ok(posts)
}

/// Posts in `scope`, newest first.
pub async fn posts_in_scope(
    pool: &SqlitePool,
    scope: PostScope,
    now: DateTime<Utc>,
    limit: Option<i64>,
) -> Result<Vec<Post>, RequestError> {
    let builder = scope.filter(QueryBuilder::where_clause(POST_QUERY), now);
    fetch_posts(pool, builder, limit).await
}

pub async fn published_posts(
    pool: &SqlitePool,
    now: DateTime<Utc>,
) -> Result<Vec<Post>, RequestError> {
    posts_in_scope(pool, PostScope::Published, now, None).await
}

pub async fn featured_posts(
    pool: &SqlitePool,
    now: DateTime<Utc>,
) -> Result<Vec<Post>, RequestError> {
    posts_in_scope(pool, PostScope::Featured, now, None).await
}

/// Published posts ranked by popularity.
///
/// There is no popularity signal yet, so this is creation order.
pub async fn popular_posts(
    pool: &SqlitePool,
    now: DateTime<Utc>,
    limit: Option<i64>,
) -> Result<Vec<Post>, RequestError> {
    posts_in_scope(pool, PostScope::Published, now, limit).await
}

pub async fn for_home_latest(
    pool: &SqlitePool,
    now: DateTime<Utc>,
) -> Result<Vec<Post>, RequestError> {
    posts_in_scope(pool, PostScope::Published, now, Some(HOME_LATEST_LIMIT)).await
}

pub async fn for_home_popular(
    pool: &SqlitePool,
    now: DateTime<Utc>,
) -> Result<Vec<Post>, RequestError> {
    popular_posts(pool, now, Some(HOME_POPULAR_LIMIT)).await
}

pub async fn for_home_featured(
    pool: &SqlitePool,
    now: DateTime<Utc>,
) -> Result<Option<Post>, RequestError> {
    let mut posts = posts_in_scope(pool, PostScope::Featured, now, Some(1)).await?;
    Ok(posts.pop())
}

pub async fn get_published_post_by_slug(
    pool: &SqlitePool,
    slug: &str,
    now: DateTime<Utc>,
) -> Result<Option<Post>, RequestError> {
    let builder = PostScope::Published
        .filter(QueryBuilder::where_clause(POST_QUERY), now)
        .add_param("posts.slug", Some(slug));
    let mut posts = fetch_posts(pool, builder, Some(1)).await?;
    Ok(posts.pop())
}

/// Any post by slug, dead or alive.
pub async fn get_post_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Post>, RequestError> {
    let builder = QueryBuilder::where_clause(POST_QUERY).add_param("posts.slug", Some(slug));
    let mut posts = fetch_posts(pool, builder, Some(1)).await?;
    Ok(posts.pop())
}

pub async fn published_posts_in_category(
    pool: &SqlitePool,
    category_id: i64,
    now: DateTime<Utc>,
) -> Result<Vec<Post>, RequestError> {
    let builder = PostScope::Published
        .filter(QueryBuilder::where_clause(POST_QUERY), now)
        .add_filter(
            "posts.id IN (SELECT post_id FROM post_categories WHERE category_id = ?)",
            vec![SqlParam::Int(category_id)],
        );
    fetch_posts(pool, builder, None).await
}

/// Admin listing over every row, filtered by effective status and deletion.
pub async fn list_all_posts(
    pool: &SqlitePool,
    AdminPostQueryParams { status, deleted }: AdminPostQueryParams,
) -> Result<Vec<Post>, RequestError> {
    let mut builder = QueryBuilder::where_clause(POST_QUERY);
    builder = match status {
        Some(PostStatus::Deleted) => builder.add_filter("posts.deleted_at IS NOT NULL", vec![]),
        Some(status) => builder
            .add_filter("posts.deleted_at IS NULL", vec![])
            .add_param("posts.status", Some(status)),
        None => builder,
    };
    builder = match deleted {
        Some(true) => builder.add_filter("posts.deleted_at IS NOT NULL", vec![]),
        Some(false) => builder.add_filter("posts.deleted_at IS NULL", vec![]),
        None => builder,
    };
    fetch_posts(pool, builder, None).await
}

pub async fn insert_post(
    pool: &SqlitePool,
    user_id: i64,
    CreatePostRequest {
        title,
        content,
        slug,
        status,
        publish_at,
        is_featured,
        image,
        categories,
    }: CreatePostRequest,
    now: DateTime<Utc>,
) -> Result<Post, RequestError> {
    let status = status.unwrap_or(PostStatus::Draft);
    if status == PostStatus::Deleted {
        return Err(RequestError::RunTimeError(
            "A post cannot be created as deleted",
        ));
    }
    let slug = slug.unwrap_or_else(|| slugify(&title));

    let mut tx = pool.begin().await?;
    let category_ids = category_ids_by_slugs(&mut tx, &categories).await?;
    let (post_id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO posts (title, content, slug, status, publish_at, is_featured, image, user_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(&slug)
    .bind(status.as_str())
    .bind(publish_at.unwrap_or(now))
    .bind(is_featured)
    .bind(image.filter(|i| !i.trim().is_empty()))
    .bind(user_id)
    .bind(now)
    .bind(now)
    .fetch_one(&mut tx)
    .await?;
    link_categories(&mut tx, post_id, &category_ids).await?;
    tx.commit().await?;

    get_post_by_slug(pool, &slug)
        .await?
        .ok_or(RequestError::ServerError)
}

async fn link_categories(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    post_id: i64,
    category_ids: &[i64],
) -> Result<(), RequestError> {
    sqlx::query("DELETE FROM post_categories WHERE post_id = ?")
        .bind(post_id)
        .execute(&mut *tx)
        .await?;
    for category_id in category_ids {
        sqlx::query("INSERT INTO post_categories (post_id, category_id) VALUES (?, ?)")
            .bind(post_id)
            .bind(category_id)
            .execute(&mut *tx)
            .await?;
    }
    Ok(())
}

pub async fn update_post_in_db(
    pool: &SqlitePool,
    slug: &str,
    UpdatePostRequest {
        title,
        content,
        slug: new_slug,
        status,
        publish_at,
        is_featured,
        image,
        categories,
    }: UpdatePostRequest,
    now: DateTime<Utc>,
) -> Result<Post, RequestError> {
    if status == Some(PostStatus::Deleted) {
        return Err(RequestError::RunTimeError(
            "Use the delete endpoint to delete a post",
        ));
    }
    let post = get_post_by_slug(pool, slug)
        .await?
        .ok_or(RequestError::NotFound("Post not found"))?;

    let (query, params) = QueryBuilder::set_clause("UPDATE posts")
        .add_param("title", title)
        .add_param("content", content)
        .add_param("slug", new_slug.clone())
        .add_param("status", status)
        .add_param("publish_at", publish_at)
        .add_param("is_featured", is_featured)
        .add_param("image", image.map(nullable))
        .add_param("updated_at", Some(now))
        .append(" WHERE id = ?", vec![SqlParam::Int(post.id)])
        .build();

    let mut tx = pool.begin().await?;
    if let Some(categories) = categories {
        let category_ids = category_ids_by_slugs(&mut tx, &categories).await?;
        link_categories(&mut tx, post.id, &category_ids).await?;
    }
    bind_params(sqlx::query(&query), params)
        .execute(&mut tx)
        .await?;
    tx.commit().await?;

    let slug = new_slug.as_deref().unwrap_or(slug);
    get_post_by_slug(pool, slug)
        .await?
        .ok_or(RequestError::NotFound("Post not found"))
}

/// Soft delete. Deleting again only refreshes `deleted_at`.
pub async fn soft_delete_post_in_db(
    pool: &SqlitePool,
    slug: &str,
    now: DateTime<Utc>,
) -> Result<Post, RequestError> {
    let result = sqlx::query("UPDATE posts SET deleted_at = ?, updated_at = ? WHERE slug = ?")
        .bind(now)
        .bind(now)
        .bind(slug)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Post not found"));
    }
    get_post_by_slug(pool, slug)
        .await?
        .ok_or(RequestError::NotFound("Post not found"))
}

/// Brings a post back as a draft, whatever it was before deletion.
pub async fn restore_post_in_db(
    pool: &SqlitePool,
    slug: &str,
    now: DateTime<Utc>,
) -> Result<Post, RequestError> {
    let result = sqlx::query(
        "UPDATE posts SET deleted_at = NULL, status = 'draft', updated_at = ? WHERE slug = ?",
    )
    .bind(now)
    .bind(slug)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Post not found"));
    }
    get_post_by_slug(pool, slug)
        .await?
        .ok_or(RequestError::NotFound("Post not found"))
}

/// Admin bulk action: clears `deleted_at` and keeps each post's stored status.
pub async fn bulk_restore_posts_in_db(
    pool: &SqlitePool,
    slugs: &[String],
    now: DateTime<Utc>,
) -> Result<u64, RequestError> {
    if slugs.is_empty() {
        return Ok(0);
    }
    let query = format!(
        "UPDATE posts SET deleted_at = NULL, updated_at = ? WHERE deleted_at IS NOT NULL AND slug IN ({})",
        placeholders(slugs.len())
    );
    let params = std::iter::once(SqlParam::Timestamp(now))
        .chain(slugs.iter().map(|s| SqlParam::from(s.as_str())))
        .collect();

    let mut tx = pool.begin().await?;
    let result = bind_params(sqlx::query(&query), params)
        .execute(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::db_helpers::{insert_category, test_support};

    fn slugs(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[tokio::test]
    async fn draft_becomes_visible_once_published() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "writer").await;
        insert_category(&pool, "Tech", Some("tech".into()), Utc::now())
            .await
            .unwrap();

        let mut request = test_support::post_request("hello", PostStatus::Draft, Utc::now());
        request.title = "Hello".into();
        request.slug = Some("hello".into());
        request.status = None;
        request.publish_at = None;
        request.categories = vec!["tech".into()];
        let post = insert_post(&pool, user.id, request, Utc::now()).await.unwrap();
        assert_eq!(post.status, PostStatus::Draft);

        let now = Utc::now();
        assert!(published_posts(&pool, now).await.unwrap().is_empty());

        update_post_in_db(
            &pool,
            "hello",
            UpdatePostRequest {
                status: Some(PostStatus::Published),
                publish_at: Some(now - Duration::minutes(1)),
                ..Default::default()
            },
            now,
        )
        .await
        .unwrap();

        let now = Utc::now();
        assert_eq!(slugs(&published_posts(&pool, now).await.unwrap()), vec!["hello"]);
        assert_eq!(slugs(&for_home_latest(&pool, now).await.unwrap()), vec!["hello"]);
        let category = crate::db_helpers::get_category_by_slug(&pool, "tech")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            slugs(&published_posts_in_category(&pool, category.id, now).await.unwrap()),
            vec!["hello"]
        );
    }

    #[tokio::test]
    async fn category_listing_keeps_only_its_published_posts() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "writer").await;
        let tech = insert_category(&pool, "Tech", Some("tech".into()), Utc::now())
            .await
            .unwrap();
        let life = insert_category(&pool, "Life", Some("life".into()), Utc::now())
            .await
            .unwrap();
        let past = Utc::now() - Duration::hours(1);
        let future = Utc::now() + Duration::hours(1);

        let posts = [
            ("rust", PostStatus::Published, past, "tech"),
            ("wip", PostStatus::Draft, past, "tech"),
            ("soon", PostStatus::Published, future, "tech"),
            ("shelved", PostStatus::Archived, past, "tech"),
            ("binned", PostStatus::Published, past, "tech"),
            ("garden", PostStatus::Published, past, "life"),
        ];
        for (slug, status, publish_at, category) in posts {
            let mut request = test_support::post_request(slug, status, publish_at);
            request.categories = vec![category.into()];
            insert_post(&pool, user.id, request, Utc::now()).await.unwrap();
        }
        soft_delete_post_in_db(&pool, "binned", Utc::now()).await.unwrap();

        let now = Utc::now();
        assert_eq!(
            slugs(&published_posts_in_category(&pool, tech.id, now).await.unwrap()),
            vec!["rust"]
        );
        assert_eq!(
            slugs(&published_posts_in_category(&pool, life.id, now).await.unwrap()),
            vec!["garden"]
        );

        // the scheduled post shows up once its time comes
        let later = future + Duration::minutes(1);
        assert_eq!(
            slugs(&published_posts_in_category(&pool, tech.id, later).await.unwrap()),
            vec!["soon", "rust"]
        );
    }

    #[tokio::test]
    async fn published_excludes_future_dead_and_unpublished() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "writer").await;
        let past = Utc::now() - Duration::hours(1);
        let future = Utc::now() + Duration::hours(1);
        test_support::post(&pool, user.id, "live", PostStatus::Published, past).await;
        test_support::post(&pool, user.id, "scheduled", PostStatus::Published, future).await;
        test_support::post(&pool, user.id, "draft", PostStatus::Draft, past).await;
        test_support::post(&pool, user.id, "old", PostStatus::Archived, past).await;
        test_support::post(&pool, user.id, "gone", PostStatus::Published, past).await;
        soft_delete_post_in_db(&pool, "gone", Utc::now()).await.unwrap();

        let now = Utc::now();
        let published = published_posts(&pool, now).await.unwrap();
        assert_eq!(slugs(&published), vec!["live"]);
        for post in &published {
            assert!(post.is_published(now));
        }
        assert_eq!(
            slugs(&posts_in_scope(&pool, PostScope::Drafts, now, None).await.unwrap()),
            vec!["draft"]
        );
        assert_eq!(
            slugs(&posts_in_scope(&pool, PostScope::Archived, now, None).await.unwrap()),
            vec!["old"]
        );
        assert_eq!(
            slugs(&posts_in_scope(&pool, PostScope::Dead, now, None).await.unwrap()),
            vec!["gone"]
        );
        assert_eq!(
            posts_in_scope(&pool, PostScope::Alive, now, None)
                .await
                .unwrap()
                .len(),
            4
        );
        assert!(get_published_post_by_slug(&pool, "scheduled", now)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn alive_and_dead_partition_all_posts() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "writer").await;
        for slug in ["a", "b", "c"] {
            test_support::post(&pool, user.id, slug, PostStatus::Draft, Utc::now()).await;
        }
        soft_delete_post_in_db(&pool, "b", Utc::now()).await.unwrap();

        let now = Utc::now();
        let all = posts_in_scope(&pool, PostScope::All, now, None).await.unwrap();
        let alive = posts_in_scope(&pool, PostScope::Alive, now, None).await.unwrap();
        let dead = posts_in_scope(&pool, PostScope::Dead, now, None).await.unwrap();
        assert_eq!(all.len(), alive.len() + dead.len());
        for post in &all {
            assert_eq!(post.is_dead(), post.deleted_at.is_some());
            assert_eq!(post.is_dead(), post.status == PostStatus::Deleted);
        }
    }

    #[tokio::test]
    async fn delete_is_idempotent_and_restore_resets_to_draft() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "writer").await;
        let past = Utc::now() - Duration::minutes(5);
        test_support::post(&pool, user.id, "hello", PostStatus::Published, past).await;

        let first = soft_delete_post_in_db(&pool, "hello", Utc::now()).await.unwrap();
        assert!(first.is_dead());
        assert_eq!(first.status, PostStatus::Deleted);

        let later = Utc::now() + Duration::seconds(5);
        let second = soft_delete_post_in_db(&pool, "hello", later).await.unwrap();
        assert!(second.is_dead());
        assert_eq!(second.status, PostStatus::Deleted);
        assert!(second.deleted_at > first.deleted_at);

        let restored = restore_post_in_db(&pool, "hello", Utc::now()).await.unwrap();
        assert!(restored.deleted_at.is_none());
        assert_eq!(restored.status, PostStatus::Draft);
        assert!(published_posts(&pool, Utc::now()).await.unwrap().is_empty());

        let missing = soft_delete_post_in_db(&pool, "nope", Utc::now()).await;
        assert!(matches!(missing, Err(RequestError::NotFound(_))));
    }

    #[tokio::test]
    async fn bulk_restore_keeps_prior_status() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "writer").await;
        let past = Utc::now() - Duration::minutes(5);
        test_support::post(&pool, user.id, "one", PostStatus::Published, past).await;
        test_support::post(&pool, user.id, "two", PostStatus::Archived, past).await;
        test_support::post(&pool, user.id, "three", PostStatus::Draft, past).await;
        for slug in ["one", "two"] {
            soft_delete_post_in_db(&pool, slug, Utc::now()).await.unwrap();
        }

        let restored = bulk_restore_posts_in_db(
            &pool,
            &["one".into(), "two".into(), "three".into()],
            Utc::now(),
        )
        .await
        .unwrap();
        assert_eq!(restored, 2);

        let one = get_post_by_slug(&pool, "one").await.unwrap().unwrap();
        assert_eq!(one.status, PostStatus::Published);
        let two = get_post_by_slug(&pool, "two").await.unwrap().unwrap();
        assert_eq!(two.status, PostStatus::Archived);
    }

    #[tokio::test]
    async fn home_lists_are_bounded_and_newest_first() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "writer").await;
        let past = Utc::now() - Duration::minutes(5);
        for i in 0..7 {
            test_support::post(&pool, user.id, &format!("post-{}", i), PostStatus::Published, past)
                .await;
        }
        test_support::post(&pool, user.id, "hidden", PostStatus::Draft, past).await;

        let now = Utc::now();
        let latest = for_home_latest(&pool, now).await.unwrap();
        assert_eq!(slugs(&latest), vec!["post-6", "post-5", "post-4"]);
        assert!(latest.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        let popular = for_home_popular(&pool, now).await.unwrap();
        assert_eq!(popular.len(), 5);
        assert!(popular.iter().all(|p| p.is_published(now)));
    }

    #[tokio::test]
    async fn featured_needs_published_and_flag() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "writer").await;
        let past = Utc::now() - Duration::minutes(5);
        assert!(for_home_featured(&pool, Utc::now()).await.unwrap().is_none());

        let mut draft = test_support::post_request("draft-star", PostStatus::Draft, past);
        draft.is_featured = true;
        insert_post(&pool, user.id, draft, Utc::now()).await.unwrap();
        let mut star = test_support::post_request("star", PostStatus::Published, past);
        star.is_featured = true;
        insert_post(&pool, user.id, star, Utc::now()).await.unwrap();
        test_support::post(&pool, user.id, "plain", PostStatus::Published, past).await;

        let now = Utc::now();
        assert_eq!(slugs(&featured_posts(&pool, now).await.unwrap()), vec!["star"]);
        assert_eq!(
            for_home_featured(&pool, now).await.unwrap().map(|p| p.slug),
            Some("star".to_string())
        );
    }

    #[tokio::test]
    async fn admin_listing_filters_by_effective_status() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "writer").await;
        let past = Utc::now() - Duration::minutes(5);
        test_support::post(&pool, user.id, "pub", PostStatus::Published, past).await;
        test_support::post(&pool, user.id, "gone", PostStatus::Published, past).await;
        soft_delete_post_in_db(&pool, "gone", Utc::now()).await.unwrap();

        let all = list_all_posts(&pool, AdminPostQueryParams::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        let published = list_all_posts(
            &pool,
            AdminPostQueryParams {
                status: Some(PostStatus::Published),
                deleted: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(slugs(&published), vec!["pub"]);
        let deleted = list_all_posts(
            &pool,
            AdminPostQueryParams {
                status: None,
                deleted: Some(true),
            },
        )
        .await
        .unwrap();
        assert_eq!(slugs(&deleted), vec!["gone"]);
    }

    #[tokio::test]
    async fn update_rejects_deleted_status_and_duplicate_slug() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "writer").await;
        test_support::post(&pool, user.id, "a", PostStatus::Draft, Utc::now()).await;
        test_support::post(&pool, user.id, "b", PostStatus::Draft, Utc::now()).await;

        let deleted = update_post_in_db(
            &pool,
            "a",
            UpdatePostRequest {
                status: Some(PostStatus::Deleted),
                ..Default::default()
            },
            Utc::now(),
        )
        .await;
        assert!(matches!(deleted, Err(RequestError::RunTimeError(_))));

        let duplicate = update_post_in_db(
            &pool,
            "a",
            UpdatePostRequest {
                slug: Some("b".into()),
                ..Default::default()
            },
            Utc::now(),
        )
        .await;
        assert!(matches!(duplicate, Err(RequestError::DatabaseError(_))));
    }
}

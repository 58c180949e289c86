use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    data_formats::UpdateCategoryRequest, errors::RequestError, models::Category, slugify,
};

use super::{bind_params, bind_params_as, placeholders, QueryBuilder, SqlParam};

const CATEGORY_QUERY: &str = "SELECT id, name, slug, created_at, updated_at FROM categories";

const HOME_CATEGORY_LIMIT: i64 = 4;

#[derive(sqlx::FromRow)]
struct PostCategory {
    post_id: i64,
    id: i64,
    name: String,
    slug: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<Category>, RequestError> {
    let categories =
        sqlx::query_as::<Sqlite, Category>(&format!("{} ORDER BY name ASC", CATEGORY_QUERY))
            .fetch_all(pool)
            .await?;
    Ok(categories)
}

/// First four categories by name.
pub async fn categories_for_home(pool: &SqlitePool) -> Result<Vec<Category>, RequestError> {
    let categories = sqlx::query_as::<Sqlite, Category>(&format!(
        "{} ORDER BY name ASC LIMIT ?",
        CATEGORY_QUERY
    ))
    .bind(HOME_CATEGORY_LIMIT)
    .fetch_all(pool)
    .await?;
    Ok(categories)
}

pub async fn get_category_by_slug(
    pool: &SqlitePool,
    slug: &str,
) -> Result<Option<Category>, RequestError> {
    let category = sqlx::query_as::<Sqlite, Category>(&format!("{} WHERE slug = ?", CATEGORY_QUERY))
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(category)
}

pub async fn insert_category(
    pool: &SqlitePool,
    name: &str,
    slug: Option<String>,
    now: DateTime<Utc>,
) -> Result<Category, RequestError> {
    let slug = slug.unwrap_or_else(|| slugify(name));
    let mut tx = pool.begin().await?;
    let category = sqlx::query_as::<Sqlite, Category>(
        r#"
        INSERT INTO categories (name, slug, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, name, slug, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(slug)
    .bind(now)
    .bind(now)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(category)
}

pub async fn update_category_in_db(
    pool: &SqlitePool,
    slug: &str,
    UpdateCategoryRequest { name, slug: new_slug }: UpdateCategoryRequest,
    now: DateTime<Utc>,
) -> Result<Category, RequestError> {
    let builder = QueryBuilder::set_clause("UPDATE categories")
        .add_param("name", name)
        .add_param("slug", new_slug.clone());
    if builder.is_empty() {
        return get_category_by_slug(pool, slug)
            .await?
            .ok_or(RequestError::NotFound("Category not found"));
    }
    let (query, params) = builder
        .add_param("updated_at", Some(now))
        .append(" WHERE slug = ?", vec![SqlParam::from(slug)])
        .build();

    let mut tx = pool.begin().await?;
    let result = bind_params(sqlx::query(&query), params)
        .execute(&mut tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Category not found"));
    }
    tx.commit().await?;

    let slug = new_slug.as_deref().unwrap_or(slug);
    get_category_by_slug(pool, slug)
        .await?
        .ok_or(RequestError::NotFound("Category not found"))
}

pub async fn delete_category_in_db(pool: &SqlitePool, slug: &str) -> Result<(), RequestError> {
    let result = sqlx::query("DELETE FROM categories WHERE slug = ?")
        .bind(slug)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Category not found"));
    }
    Ok(())
}

/// Resolves category slugs to ids, failing on any unknown slug.
pub(crate) async fn category_ids_by_slugs<'c, E>(
    executor: E,
    slugs: &[String],
) -> Result<Vec<i64>, RequestError>
where
    E: Executor<'c, Database = Sqlite>,
{
    if slugs.is_empty() {
        return Ok(vec![]);
    }
    let query = format!(
        "SELECT id FROM categories WHERE slug IN ({})",
        placeholders(slugs.len())
    );
    let params = slugs.iter().map(|s| SqlParam::from(s.as_str())).collect();
    let ids: Vec<(i64,)> = bind_params_as(sqlx::query_as(&query), params)
        .fetch_all(executor)
        .await?;

    let mut unique = slugs.to_vec();
    unique.sort();
    unique.dedup();
    if ids.len() != unique.len() {
        return Err(RequestError::RunTimeError("Unknown category"));
    }
    Ok(ids.into_iter().map(|(id,)| id).collect())
}

/// Categories of each given post, keyed by post id.
pub async fn categories_for_posts(
    pool: &SqlitePool,
    post_ids: &[i64],
) -> Result<HashMap<i64, Vec<Category>>, RequestError> {
    let mut result: HashMap<i64, Vec<Category>> = HashMap::new();
    if post_ids.is_empty() {
        return Ok(result);
    }
    let query = format!(
        r#"
        SELECT post_categories.post_id, categories.id, categories.name, categories.slug,
               categories.created_at, categories.updated_at
        FROM categories
            JOIN post_categories ON post_categories.category_id = categories.id
        WHERE post_categories.post_id IN ({})
        ORDER BY categories.name ASC
        "#,
        placeholders(post_ids.len())
    );
    let params = post_ids.iter().map(|id| SqlParam::Int(*id)).collect();
    let rows: Vec<PostCategory> = bind_params_as(sqlx::query_as(&query), params)
        .fetch_all(pool)
        .await?;
    for PostCategory {
        post_id,
        id,
        name,
        slug,
        created_at,
        updated_at,
    } in rows
    {
        result.entry(post_id).or_default().push(Category {
            id,
            name,
            slug,
            created_at,
            updated_at,
        });
    }
    Ok(result)
}

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool};

use crate::{
    data_formats::{AdminPageQueryParams, CreatePageRequest, FooterPage, UpdatePageRequest},
    errors::RequestError,
    models::Page,
    slugify,
};

use super::{bind_params, bind_params_as, QueryBuilder, SqlParam};

const PAGE_QUERY: &str = "SELECT id, title, slug, content, is_active, show_in_footer, created_at, updated_at FROM pages";

pub async fn list_pages(
    pool: &SqlitePool,
    AdminPageQueryParams { search }: AdminPageQueryParams,
) -> Result<Vec<Page>, RequestError> {
    let mut builder = QueryBuilder::where_clause(PAGE_QUERY);
    if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", search.trim());
        builder = builder.add_filter(
            "(title LIKE ? OR content LIKE ?)",
            vec![SqlParam::from(pattern.as_str()), SqlParam::Text(pattern)],
        );
    }
    let (query, params) = builder.append(" ORDER BY title ASC", vec![]).build();
    let pages = bind_params_as(sqlx::query_as::<Sqlite, Page>(&query), params)
        .fetch_all(pool)
        .await?;
    Ok(pages)
}

pub async fn get_page_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Page>, RequestError> {
    let page = sqlx::query_as::<Sqlite, Page>(&format!("{} WHERE slug = ?", PAGE_QUERY))
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(page)
}

pub async fn get_active_page_by_slug(
    pool: &SqlitePool,
    slug: &str,
) -> Result<Option<Page>, RequestError> {
    let page = sqlx::query_as::<Sqlite, Page>(&format!(
        "{} WHERE slug = ? AND is_active = 1",
        PAGE_QUERY
    ))
    .bind(slug)
    .fetch_optional(pool)
    .await?;
    Ok(page)
}

/// Active pages linked from the footer, title and slug only.
pub async fn footer_pages(pool: &SqlitePool) -> Result<Vec<FooterPage>, RequestError> {
    let pages = sqlx::query_as::<Sqlite, FooterPage>(
        "SELECT title, slug FROM pages WHERE is_active = 1 AND show_in_footer = 1 ORDER BY title ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(pages)
}

pub async fn insert_page(
    pool: &SqlitePool,
    CreatePageRequest {
        title,
        content,
        slug,
        is_active,
        show_in_footer,
    }: CreatePageRequest,
    now: DateTime<Utc>,
) -> Result<Page, RequestError> {
    let slug = slug.unwrap_or_else(|| slugify(&title));
    let mut tx = pool.begin().await?;
    let page = sqlx::query_as::<Sqlite, Page>(
        r#"
        INSERT INTO pages (title, slug, content, is_active, show_in_footer, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id, title, slug, content, is_active, show_in_footer, created_at, updated_at
        "#,
    )
    .bind(title)
    .bind(slug)
    .bind(content)
    .bind(is_active)
    .bind(show_in_footer)
    .bind(now)
    .bind(now)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(page)
}

pub async fn update_page_in_db(
    pool: &SqlitePool,
    slug: &str,
    UpdatePageRequest {
        title,
        content,
        slug: new_slug,
        is_active,
        show_in_footer,
    }: UpdatePageRequest,
    now: DateTime<Utc>,
) -> Result<Page, RequestError> {
    let (query, params) = QueryBuilder::set_clause("UPDATE pages")
        .add_param("title", title)
        .add_param("content", content)
        .add_param("slug", new_slug.clone())
        .add_param("is_active", is_active)
        .add_param("show_in_footer", show_in_footer)
        .add_param("updated_at", Some(now))
        .append(" WHERE slug = ?", vec![SqlParam::from(slug)])
        .build();

    let result = bind_params(sqlx::query(&query), params)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Page not found"));
    }

    let slug = new_slug.as_deref().unwrap_or(slug);
    get_page_by_slug(pool, slug)
        .await?
        .ok_or(RequestError::NotFound("Page not found"))
}

pub async fn delete_page_in_db(pool: &SqlitePool, slug: &str) -> Result<(), RequestError> {
    let result = sqlx::query("DELETE FROM pages WHERE slug = ?")
        .bind(slug)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Page not found"));
    }
    Ok(())
}

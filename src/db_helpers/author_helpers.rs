use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::{data_formats::SaveAuthorRequest, errors::RequestError, models::Author};

use super::{bind_params, nullable, QueryBuilder, SqlParam};

const AUTHOR_QUERY: &str = r#"
    SELECT authors.id,
           authors.user_id,
           users.username,
           authors.bio,
           authors.avatar,
           authors.website_url,
           authors.twitter_url,
           authors.github_url,
           authors.is_site_author,
           authors.created_at,
           authors.updated_at
    FROM authors
        JOIN users ON users.id = authors.user_id"#;

pub async fn list_authors(pool: &SqlitePool) -> Result<Vec<Author>, RequestError> {
    let authors =
        sqlx::query_as::<Sqlite, Author>(&format!("{} ORDER BY users.username ASC", AUTHOR_QUERY))
            .fetch_all(pool)
            .await?;
    Ok(authors)
}

pub async fn get_author_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Author>, RequestError> {
    let author = sqlx::query_as::<Sqlite, Author>(&format!("{} WHERE authors.id = ?", AUTHOR_QUERY))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(author)
}

/// The single author flagged as the site's author, if any.
pub async fn site_author(pool: &SqlitePool) -> Result<Option<Author>, RequestError> {
    let author = sqlx::query_as::<Sqlite, Author>(&format!(
        "{} WHERE authors.is_site_author = 1 LIMIT 1",
        AUTHOR_QUERY
    ))
    .fetch_optional(pool)
    .await?;
    Ok(author)
}

/// Unflags every site author except `keep`; must run in the same transaction as the write.
async fn clear_site_author_flag(
    tx: &mut Transaction<'_, Sqlite>,
    keep: Option<i64>,
    now: DateTime<Utc>,
) -> Result<(), RequestError> {
    let cleared = sqlx::query(
        "UPDATE authors SET is_site_author = 0, updated_at = ? WHERE is_site_author = 1 AND (? IS NULL OR id != ?)",
    )
    .bind(now)
    .bind(keep)
    .bind(keep)
    .execute(&mut *tx)
    .await?;
    if cleared.rows_affected() > 0 {
        tracing::debug!(keep = ?keep, "previous site author unflagged");
    }
    Ok(())
}

pub async fn insert_author(
    pool: &SqlitePool,
    user_id: i64,
    SaveAuthorRequest {
        bio,
        avatar,
        website_url,
        twitter_url,
        github_url,
        is_site_author,
        ..
    }: SaveAuthorRequest,
    now: DateTime<Utc>,
) -> Result<Author, RequestError> {
    let is_site_author = is_site_author.unwrap_or(false);
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    let mut tx = pool.begin().await?;
    if is_site_author {
        clear_site_author_flag(&mut tx, None, now).await?;
    }
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO authors (user_id, bio, avatar, website_url, twitter_url, github_url, is_site_author, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(bio.unwrap_or_default())
    .bind(non_empty(avatar))
    .bind(non_empty(website_url))
    .bind(non_empty(twitter_url))
    .bind(non_empty(github_url))
    .bind(is_site_author)
    .bind(now)
    .bind(now)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;

    get_author_by_id(pool, id)
        .await?
        .ok_or(RequestError::ServerError)
}

pub async fn update_author_in_db(
    pool: &SqlitePool,
    id: i64,
    SaveAuthorRequest {
        user_id,
        bio,
        avatar,
        website_url,
        twitter_url,
        github_url,
        is_site_author,
    }: SaveAuthorRequest,
    now: DateTime<Utc>,
) -> Result<Author, RequestError> {
    let (query, params) = QueryBuilder::set_clause("UPDATE authors")
        .add_param("user_id", user_id)
        .add_param("bio", bio)
        .add_param("avatar", avatar.map(nullable))
        .add_param("website_url", website_url.map(nullable))
        .add_param("twitter_url", twitter_url.map(nullable))
        .add_param("github_url", github_url.map(nullable))
        .add_param("is_site_author", is_site_author)
        .add_param("updated_at", Some(now))
        .append(" WHERE id = ?", vec![SqlParam::Int(id)])
        .build();

    let mut tx = pool.begin().await?;
    if is_site_author == Some(true) {
        clear_site_author_flag(&mut tx, Some(id), now).await?;
    }
    let result = bind_params(sqlx::query(&query), params)
        .execute(&mut tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Author not found"));
    }
    tx.commit().await?;

    get_author_by_id(pool, id)
        .await?
        .ok_or(RequestError::NotFound("Author not found"))
}

pub async fn delete_author_in_db(pool: &SqlitePool, id: i64) -> Result<(), RequestError> {
    let result = sqlx::query("DELETE FROM authors WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Author not found"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db_helpers::test_support;

    fn flagged(is_site_author: bool) -> SaveAuthorRequest {
        SaveAuthorRequest {
            bio: Some("writes things".into()),
            is_site_author: Some(is_site_author),
            ..Default::default()
        }
    }

    async fn flagged_ids(pool: &SqlitePool) -> Vec<i64> {
        list_authors(pool)
            .await
            .unwrap()
            .into_iter()
            .filter(|a| a.is_site_author)
            .map(|a| a.id)
            .collect()
    }

    #[tokio::test]
    async fn second_site_author_takes_over_the_flag() {
        let pool = test_support::pool().await;
        let ana = test_support::user(&pool, "ana").await;
        let bob = test_support::user(&pool, "bob").await;

        let first = insert_author(&pool, ana.id, flagged(true), Utc::now())
            .await
            .unwrap();
        let second = insert_author(&pool, bob.id, flagged(true), Utc::now())
            .await
            .unwrap();

        assert_eq!(flagged_ids(&pool).await, vec![second.id]);
        let first = get_author_by_id(&pool, first.id).await.unwrap().unwrap();
        assert!(!first.is_site_author);
        assert_eq!(site_author(&pool).await.unwrap().map(|a| a.id), Some(second.id));
    }

    #[tokio::test]
    async fn flagging_through_update_unflags_the_rest() {
        let pool = test_support::pool().await;
        let ana = test_support::user(&pool, "ana").await;
        let bob = test_support::user(&pool, "bob").await;
        let first = insert_author(&pool, ana.id, flagged(true), Utc::now())
            .await
            .unwrap();
        let second = insert_author(&pool, bob.id, flagged(false), Utc::now())
            .await
            .unwrap();
        assert_eq!(flagged_ids(&pool).await, vec![first.id]);

        let updated = update_author_in_db(&pool, second.id, flagged(true), Utc::now())
            .await
            .unwrap();
        assert!(updated.is_site_author);
        assert_eq!(flagged_ids(&pool).await, vec![second.id]);

        // re-saving the current site author keeps it flagged
        update_author_in_db(&pool, second.id, flagged(true), Utc::now())
            .await
            .unwrap();
        assert_eq!(flagged_ids(&pool).await, vec![second.id]);
    }

    #[tokio::test]
    async fn storage_rejects_a_second_flag_written_directly() {
        let pool = test_support::pool().await;
        let ana = test_support::user(&pool, "ana").await;
        let bob = test_support::user(&pool, "bob").await;
        insert_author(&pool, ana.id, flagged(true), Utc::now())
            .await
            .unwrap();
        let other = insert_author(&pool, bob.id, flagged(false), Utc::now())
            .await
            .unwrap();

        let result = sqlx::query("UPDATE authors SET is_site_author = 1 WHERE id = ?")
            .bind(other.id)
            .execute(&pool)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn no_site_author_and_missing_rows() {
        let pool = test_support::pool().await;
        assert!(site_author(&pool).await.unwrap().is_none());
        let missing = update_author_in_db(&pool, 42, flagged(false), Utc::now()).await;
        assert!(matches!(missing, Err(RequestError::NotFound(_))));
        let missing = delete_author_in_db(&pool, 42).await;
        assert!(matches!(missing, Err(RequestError::NotFound(_))));
    }

    #[tokio::test]
    async fn one_author_per_user() {
        let pool = test_support::pool().await;
        let ana = test_support::user(&pool, "ana").await;
        insert_author(&pool, ana.id, flagged(false), Utc::now())
            .await
            .unwrap();
        let duplicate = insert_author(&pool, ana.id, flagged(false), Utc::now()).await;
        assert!(matches!(duplicate, Err(RequestError::DatabaseError(_))));
    }
}

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool};

use crate::{data_formats::RegisterRequest, errors::RequestError, models::User};

const USER_QUERY: &str = "SELECT id, username, email, password, created_at FROM users";

pub async fn insert_user(pool: &SqlitePool, user: &RegisterRequest) -> Result<User, RequestError> {
    let mut tx = pool.begin().await?;
    let user = sqlx::query_as::<Sqlite, User>(
        r#"
        INSERT INTO users (email, username, password, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, username, email, password, created_at
        "#,
    )
    .bind(&user.email)
    .bind(&user.username)
    .bind(&user.password)
    .bind(Utc::now())
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(user)
}

pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, RequestError> {
    let user = sqlx::query_as::<Sqlite, User>(&format!("{} WHERE email = ?", USER_QUERY))
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, RequestError> {
    let user = sqlx::query_as::<Sqlite, User>(&format!("{} WHERE id = ?", USER_QUERY))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

use chrono::{DateTime, Utc};
use sqlx::{
    query::{Query, QueryAs},
    sqlite::SqliteArguments,
    Sqlite,
};

use crate::models::PostStatus;

mod author_helpers;
mod category_helpers;
mod page_helpers;
mod post_helpers;
mod user_helpers;

pub use author_helpers::*;
pub use category_helpers::*;
pub use page_helpers::*;
pub use post_helpers::*;
pub use user_helpers::*;

/// A value bound into a dynamically built statement.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SqlParam {
    Text(String),
    Int(i64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    Null,
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_owned())
    }
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Int(value)
    }
}

impl From<bool> for SqlParam {
    fn from(value: bool) -> Self {
        SqlParam::Bool(value)
    }
}

impl From<DateTime<Utc>> for SqlParam {
    fn from(value: DateTime<Utc>) -> Self {
        SqlParam::Timestamp(value)
    }
}

impl From<PostStatus> for SqlParam {
    fn from(value: PostStatus) -> Self {
        SqlParam::Text(value.as_str().to_owned())
    }
}

/// Empty strings become NULL, for optional URL columns.
pub(crate) fn nullable(value: String) -> SqlParam {
    if value.trim().is_empty() {
        SqlParam::Null
    } else {
        SqlParam::Text(value)
    }
}

/// Builds `SET a = ?, b = ?` or `WHERE a = ? AND b = ?` lists from optional parts.
pub(crate) struct QueryBuilder {
    query: String,
    params: Vec<SqlParam>,
    prefix: &'static str,
    seperator: &'static str,
    counter: usize,
}

impl QueryBuilder {
    fn new(initial: impl Into<String>, prefix: &'static str, seperator: &'static str) -> Self {
        Self {
            query: initial.into(),
            params: vec![],
            prefix,
            seperator,
            counter: 0,
        }
    }

    pub(crate) fn set_clause(initial: impl Into<String>) -> Self {
        Self::new(initial, " SET ", ", ")
    }

    pub(crate) fn where_clause(initial: impl Into<String>) -> Self {
        Self::new(initial, " WHERE ", " AND ")
    }

    pub(crate) fn add_filter(mut self, filter: &str, params: Vec<SqlParam>) -> Self {
        self.query.push_str(if self.counter == 0 {
            self.prefix
        } else {
            self.seperator
        });
        self.query.push_str(filter);
        self.params.extend(params);
        self.counter += 1;
        self
    }

    pub(crate) fn add_param<T: Into<SqlParam>>(self, column: &str, param: Option<T>) -> Self {
        match param {
            Some(value) => self.add_filter(&format!("{} = ?", column), vec![value.into()]),
            None => self,
        }
    }

    /// Appends raw text after the list, e.g. the `WHERE` of an update or an `ORDER BY`.
    pub(crate) fn append(mut self, tail: &str, params: Vec<SqlParam>) -> Self {
        self.query.push_str(tail);
        self.params.extend(params);
        self
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.counter == 0
    }

    pub(crate) fn build(self) -> (String, Vec<SqlParam>) {
        (self.query, self.params)
    }
}

pub(crate) fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: Vec<SqlParam>,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            SqlParam::Text(value) => query.bind(value),
            SqlParam::Int(value) => query.bind(value),
            SqlParam::Bool(value) => query.bind(value),
            SqlParam::Timestamp(value) => query.bind(value),
            SqlParam::Null => query.bind(Option::<String>::None),
        };
    }
    query
}

pub(crate) fn bind_params_as<'q, O>(
    mut query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    params: Vec<SqlParam>,
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            SqlParam::Text(value) => query.bind(value),
            SqlParam::Int(value) => query.bind(value),
            SqlParam::Bool(value) => query.bind(value),
            SqlParam::Timestamp(value) => query.bind(value),
            SqlParam::Null => query.bind(Option::<String>::None),
        };
    }
    query
}

/// `?, ?, ?` for an `IN (...)` list of `len` items.
pub(crate) fn placeholders(len: usize) -> String {
    vec!["?"; len].join(", ")
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, Utc};
    use sqlx::SqlitePool;

    use crate::{
        data_formats::{CreatePostRequest, RegisterRequest},
        models::{Post, PostStatus, User},
    };

    pub async fn pool() -> SqlitePool {
        crate::init_memory_db().await.unwrap()
    }

    pub async fn user(pool: &SqlitePool, username: &str) -> User {
        super::insert_user(
            pool,
            &RegisterRequest {
                email: format!("{}@example.com", username),
                password: "not-hashed-in-tests".into(),
                username: username.into(),
            },
        )
        .await
        .unwrap()
    }

    pub fn post_request(slug: &str, status: PostStatus, publish_at: DateTime<Utc>) -> CreatePostRequest {
        CreatePostRequest {
            title: slug.to_uppercase(),
            content: format!("content of {}", slug),
            slug: Some(slug.into()),
            status: Some(status),
            publish_at: Some(publish_at),
            is_featured: false,
            image: None,
            categories: vec![],
        }
    }

    pub async fn post(
        pool: &SqlitePool,
        user_id: i64,
        slug: &str,
        status: PostStatus,
        publish_at: DateTime<Utc>,
    ) -> Post {
        super::insert_post(pool, user_id, post_request(slug, status, publish_at), Utc::now())
            .await
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clause_joins_present_params() {
        let (query, params) = QueryBuilder::set_clause("UPDATE posts")
            .add_param("title", Some("Hello"))
            .add_param::<String>("content", None)
            .add_param("is_featured", Some(true))
            .append(" WHERE id = ?", vec![SqlParam::Int(3)])
            .build();
        assert_eq!(query, "UPDATE posts SET title = ?, is_featured = ? WHERE id = ?");
        assert_eq!(
            params,
            vec![
                SqlParam::Text("Hello".into()),
                SqlParam::Bool(true),
                SqlParam::Int(3)
            ]
        );
    }

    #[test]
    fn where_clause_without_filters_is_untouched() {
        let builder = QueryBuilder::where_clause("SELECT * FROM posts");
        assert!(builder.is_empty());
        let (query, params) = builder.build();
        assert_eq!(query, "SELECT * FROM posts");
        assert!(params.is_empty());
    }

    #[test]
    fn empty_strings_are_null() {
        assert_eq!(nullable("  ".into()), SqlParam::Null);
        assert_eq!(nullable("x".into()), SqlParam::Text("x".into()));
        assert_eq!(placeholders(3), "?, ?, ?");
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle status of a post.
///
/// Storage never holds `Deleted`; reads report it whenever `deleted_at` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
    Archived,
    Deleted,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
            PostStatus::Deleted => "deleted",
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub status: PostStatus,
    pub publish_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_featured: bool,
    pub image: Option<String>,
    pub user_id: i64,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_dead(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        self.is_alive() && self.status == PostStatus::Published && self.publish_at <= now
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Author {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub bio: String,
    pub avatar: Option<String>,
    pub website_url: Option<String>,
    pub twitter_url: Option<String>,
    pub github_url: Option<String>,
    pub is_site_author: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Page {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub is_active: bool,
    pub show_in_footer: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

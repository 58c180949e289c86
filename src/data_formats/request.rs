use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::PostStatus;

// ----------------- User Request -----------------
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

// ----------------- Category Request -----------------
#[derive(Deserialize, Serialize, Debug)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
}

// ----------------- Post Request -----------------
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub status: Option<PostStatus>,
    #[serde(default)]
    pub publish_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub image: Option<String>,
    /// Category slugs.
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub status: Option<PostStatus>,
    pub publish_at: Option<DateTime<Utc>>,
    pub is_featured: Option<bool>,
    /// An empty string clears the image.
    pub image: Option<String>,
    pub categories: Option<Vec<String>>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct BulkRestoreRequest {
    pub slugs: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct AdminPostQueryParams {
    #[serde(default)]
    pub status: Option<PostStatus>,
    #[serde(default)]
    pub deleted: Option<bool>,
}

// ----------------- Author Request -----------------
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SaveAuthorRequest {
    /// Defaults to the authenticated user when creating.
    pub user_id: Option<i64>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub website_url: Option<String>,
    pub twitter_url: Option<String>,
    pub github_url: Option<String>,
    pub is_site_author: Option<bool>,
}

// ----------------- Page Request -----------------
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub show_in_footer: bool,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdatePageRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub is_active: Option<bool>,
    pub show_in_footer: Option<bool>,
}

/// `search` matches a substring of the title or the content.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct AdminPageQueryParams {
    #[serde(default)]
    pub search: Option<String>,
}

fn default_true() -> bool {
    true
}

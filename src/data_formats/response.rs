use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Author, Category, Page, Post, PostStatus, User};

#[derive(Deserialize, Serialize, Debug)]
pub struct UserResponse {
    pub email: String,
    pub token: String,
    pub username: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CategoryResponse {
    pub name: String,
    pub slug: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub slug: String,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub publish_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_featured: bool,
    pub image: Option<String>,
    pub author: String,
    pub categories: Vec<CategoryResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public author card, also what the context cache holds.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorProfile {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub bio: String,
    pub avatar: Option<String>,
    pub website_url: Option<String>,
    pub twitter_url: Option<String>,
    pub github_url: Option<String>,
    pub is_site_author: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub is_active: bool,
    pub show_in_footer: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct FooterPage {
    pub title: String,
    pub slug: String,
}

/// Site-wide context attached to every public view.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SiteContext {
    pub site_author: Option<AuthorProfile>,
    pub footer_pages: Vec<FooterPage>,
}

impl From<Category> for CategoryResponse {
    fn from(Category { name, slug, .. }: Category) -> Self {
        CategoryResponse { name, slug }
    }
}

impl PostResponse {
    pub fn new(
        Post {
            slug,
            title,
            content,
            status,
            publish_at,
            deleted_at,
            is_featured,
            image,
            author_username,
            created_at,
            updated_at,
            ..
        }: Post,
        categories: Vec<CategoryResponse>,
    ) -> Self {
        PostResponse {
            slug,
            title,
            content,
            status,
            publish_at,
            deleted_at,
            is_featured,
            image,
            author: author_username,
            categories,
            created_at,
            updated_at,
        }
    }
}

impl From<Author> for AuthorProfile {
    fn from(
        Author {
            id,
            user_id,
            username,
            bio,
            avatar,
            website_url,
            twitter_url,
            github_url,
            is_site_author,
            ..
        }: Author,
    ) -> Self {
        AuthorProfile {
            id,
            user_id,
            username,
            bio,
            avatar,
            website_url,
            twitter_url,
            github_url,
            is_site_author,
        }
    }
}

impl From<Page> for PageResponse {
    fn from(
        Page {
            title,
            slug,
            content,
            is_active,
            show_in_footer,
            created_at,
            updated_at,
            ..
        }: Page,
    ) -> Self {
        PageResponse {
            title,
            slug,
            content,
            is_active,
            show_in_footer,
            created_at,
            updated_at,
        }
    }
}

impl UserResponse {
    pub fn new(User { username, email, .. }: User, token: String) -> Self {
        UserResponse {
            username,
            email,
            token,
        }
    }
}

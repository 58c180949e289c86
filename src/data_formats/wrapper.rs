use serde::{Deserialize, Serialize};

use super::response::{
    AuthorProfile, CategoryResponse, PageResponse, PostResponse, SiteContext,
};

#[derive(Debug, Deserialize, Serialize)]
pub struct UserWrapper<T> {
    pub user: T,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PostWrapper {
    pub post: PostResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<SiteContext>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MultiplePostsWrapper {
    pub posts: Vec<PostResponse>,
    #[serde(rename = "postsCount")]
    pub post_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<SiteContext>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CategoryPostsWrapper {
    pub category: CategoryResponse,
    pub posts: Vec<PostResponse>,
    #[serde(rename = "postsCount")]
    pub post_count: usize,
    pub site: SiteContext,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeWrapper {
    pub categories: Vec<CategoryResponse>,
    pub popular_posts: Vec<PostResponse>,
    pub latest_posts: Vec<PostResponse>,
    pub featured_post: Option<PostResponse>,
    pub site: SiteContext,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CategoryWrapper {
    pub category: CategoryResponse,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MultipleCategoriesWrapper {
    pub categories: Vec<CategoryResponse>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AuthorWrapper {
    pub author: AuthorProfile,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MultipleAuthorsWrapper {
    pub authors: Vec<AuthorProfile>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PageWrapper {
    pub page: PageResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<SiteContext>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MultiplePagesWrapper {
    pub pages: Vec<PageResponse>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RestoredWrapper {
    pub restored: u64,
}

impl<T> UserWrapper<T> {
    pub fn wrap_with_user_data(request: T) -> UserWrapper<T> {
        UserWrapper { user: request }
    }
}

impl MultiplePostsWrapper {
    pub fn new(posts: Vec<PostResponse>, site: Option<SiteContext>) -> Self {
        MultiplePostsWrapper {
            post_count: posts.len(),
            posts,
            site,
        }
    }
}

//! Site-wide context shared by every public view.
//!
//! Values are read through a [`Cache`] under fixed keys and dropped again by
//! the admin write paths that change them.

use std::{future::Future, sync::Arc, time::Duration};

use serde::{de::DeserializeOwned, Serialize};
use sqlx::SqlitePool;

use crate::{
    cache::Cache,
    data_formats::{AuthorProfile, FooterPage, SiteContext},
    db_helpers,
    errors::RequestError,
};

pub const SITE_AUTHOR_KEY: &str = "site_author";
pub const FOOTER_PAGES_KEY: &str = "footer_pages";

pub const DEFAULT_CONTEXT_TTL: Duration = Duration::from_secs(60 * 60);

pub struct ContextProvider {
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl ContextProvider {
    pub fn new(cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    pub async fn site_author(&self, pool: &SqlitePool) -> Result<Option<AuthorProfile>, RequestError> {
        self.read_through(SITE_AUTHOR_KEY, || async {
            let author = db_helpers::site_author(pool).await?;
            Ok::<_, RequestError>(author.map(AuthorProfile::from))
        })
        .await
    }

    pub async fn footer_pages(&self, pool: &SqlitePool) -> Result<Vec<FooterPage>, RequestError> {
        self.read_through(FOOTER_PAGES_KEY, || db_helpers::footer_pages(pool))
            .await
    }

    pub async fn site(&self, pool: &SqlitePool) -> Result<SiteContext, RequestError> {
        Ok(SiteContext {
            site_author: self.site_author(pool).await?,
            footer_pages: self.footer_pages(pool).await?,
        })
    }

    pub fn invalidate_site_author(&self) {
        tracing::debug!(key = SITE_AUTHOR_KEY, "context invalidated");
        self.cache.delete(SITE_AUTHOR_KEY);
    }

    pub fn invalidate_footer_pages(&self) {
        tracing::debug!(key = FOOTER_PAGES_KEY, "context invalidated");
        self.cache.delete(FOOTER_PAGES_KEY);
    }

    /// Returns the cached value under `key`, or loads, stores and returns it.
    async fn read_through<T, F, Fut>(&self, key: &str, load: F) -> Result<T, RequestError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, RequestError>>,
    {
        if let Some(cached) = self.cache.get(key) {
            match serde_json::from_value(cached) {
                Ok(value) => {
                    tracing::debug!(key, "context cache hit");
                    return Ok(value);
                }
                Err(e) => tracing::warn!(key, error = %e, "discarding unreadable cache entry"),
            }
        }
        tracing::debug!(key, "context cache miss");
        let value = load().await?;
        let stored = serde_json::to_value(&value).map_err(|_| RequestError::ServerError)?;
        self.cache.set(key, stored, self.ttl);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;

    use super::*;
    use crate::{
        cache::MemoryCache,
        data_formats::{CreatePageRequest, SaveAuthorRequest},
        db_helpers::test_support,
    };

    fn provider(ttl: Duration) -> ContextProvider {
        ContextProvider::new(Arc::new(MemoryCache::new()), ttl)
    }

    #[tokio::test]
    async fn read_through_loads_once_within_ttl() {
        let context = provider(DEFAULT_CONTEXT_TTL);
        let lookups = AtomicUsize::new(0);
        for _ in 0..2 {
            let value: Vec<String> = context
                .read_through("k", || async {
                    lookups.fetch_add(1, Ordering::SeqCst);
                    Ok(vec!["x".to_string()])
                })
                .await
                .unwrap();
            assert_eq!(value, vec!["x".to_string()]);
        }
        assert_eq!(lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_entries_are_reloaded() {
        let context = provider(Duration::from_millis(20));
        let lookups = AtomicUsize::new(0);
        let load = || async {
            lookups.fetch_add(1, Ordering::SeqCst);
            Ok(1_i64)
        };
        context.read_through("k", load).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        context.read_through("k", load).await.unwrap();
        assert_eq!(lookups.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn site_author_is_served_from_cache_until_invalidated() {
        let pool = test_support::pool().await;
        let context = provider(DEFAULT_CONTEXT_TTL);
        let ana = test_support::user(&pool, "ana").await;
        db_helpers::insert_author(
            &pool,
            ana.id,
            SaveAuthorRequest {
                is_site_author: Some(true),
                ..Default::default()
            },
            Utc::now(),
        )
        .await
        .unwrap();

        let first = context.site_author(&pool).await.unwrap();
        assert_eq!(first.as_ref().map(|a| a.username.as_str()), Some("ana"));

        // a write that bypasses the app is not seen until the entry goes away
        sqlx::query("UPDATE authors SET is_site_author = 0")
            .execute(&pool)
            .await
            .unwrap();
        assert_eq!(context.site_author(&pool).await.unwrap(), first);

        context.invalidate_site_author();
        assert!(context.site_author(&pool).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn footer_pages_follow_invalidation() {
        let pool = test_support::pool().await;
        let context = provider(DEFAULT_CONTEXT_TTL);
        assert!(context.footer_pages(&pool).await.unwrap().is_empty());

        db_helpers::insert_page(
            &pool,
            CreatePageRequest {
                title: "About".into(),
                content: "hi".into(),
                slug: None,
                is_active: true,
                show_in_footer: true,
            },
            Utc::now(),
        )
        .await
        .unwrap();
        assert!(context.footer_pages(&pool).await.unwrap().is_empty());

        context.invalidate_footer_pages();
        let site = context.site(&pool).await.unwrap();
        assert_eq!(site.footer_pages.len(), 1);
        assert!(site.site_author.is_none());
    }
}

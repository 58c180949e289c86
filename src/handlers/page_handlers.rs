use std::sync::Arc;

use axum::{extract::Path, Extension, Json};

use crate::{data_formats::PageWrapper, db_helpers, errors::RequestError, AppState};

use super::JsonResult;

pub async fn page_detail(
    Extension(state): Extension<Arc<AppState>>,
    Path(slug): Path<String>,
) -> JsonResult<PageWrapper> {
    let page = db_helpers::get_active_page_by_slug(&state.pool, &slug)
        .await?
        .ok_or(RequestError::NotFound("Page not found"))?;
    Ok(Json(PageWrapper {
        page: page.into(),
        site: Some(state.context.site(&state.pool).await?),
    }))
}

use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::JsonResponse;

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    NotAuthorized(&'static str),
    #[error("Forbidden")]
    Forbidden,
    #[error("{0}")]
    RunTimeError(&'static str),
    #[error("{0}")]
    Validation(String),
    #[error("Internal Server Error")]
    ServerError,
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct RequestErrorJsonWrapper {
    pub errors: RequestErrorJson,
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct RequestErrorJson {
    pub body: Vec<String>,
}

impl RequestErrorJsonWrapper {
    pub fn new(error: &str) -> RequestErrorJsonWrapper {
        RequestErrorJsonWrapper {
            errors: RequestErrorJson {
                body: vec![error.to_string()],
            },
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> axum::response::Response {
        self.to_json_response().into_response()
    }
}

impl RequestError {
    pub fn to_json_response(&self) -> JsonResponse<RequestErrorJsonWrapper> {
        let (status_code, json) = match self {
            RequestError::NotFound(message) => {
                (StatusCode::NOT_FOUND, RequestErrorJsonWrapper::new(message))
            }
            RequestError::NotAuthorized(message) => (
                StatusCode::UNAUTHORIZED,
                RequestErrorJsonWrapper::new(message),
            ),
            RequestError::Forbidden => (
                StatusCode::FORBIDDEN,
                RequestErrorJsonWrapper::new("Forbidden"),
            ),
            RequestError::RunTimeError(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                RequestErrorJsonWrapper::new(message),
            ),
            RequestError::Validation(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                RequestErrorJsonWrapper::new(message),
            ),
            RequestError::ServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                RequestErrorJsonWrapper::new("Internal Server Error"),
            ),
            RequestError::DatabaseError(e) => match constraint_violation(e) {
                Some(message) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    RequestErrorJsonWrapper::new(&message),
                ),
                None => {
                    tracing::error!(error = %e, "database error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        RequestErrorJsonWrapper::new("Internal Server Error"),
                    )
                }
            },
        };
        (status_code, Json(json))
    }
}

/// Turns a storage constraint failure into a message fit for the caller.
fn constraint_violation(error: &sqlx::Error) -> Option<String> {
    let message = match error {
        sqlx::Error::Database(e) => e.message().to_owned(),
        _ => return None,
    };
    if let Some(columns) = message.strip_prefix("UNIQUE constraint failed: ") {
        // "posts.slug" or "authors.is_site_author"
        let column = columns
            .split(',')
            .next()
            .and_then(|c| c.trim().rsplit('.').next())
            .unwrap_or("value");
        return Some(format!("{} already exists", column));
    }
    if message.starts_with("CHECK constraint failed") {
        return Some("invalid value".to_owned());
    }
    if message.starts_with("FOREIGN KEY constraint failed") {
        return Some("referenced record does not exist".to_owned());
    }
    None
}

use std::sync::Arc;

use axum::{Extension, Json};

use crate::{
    authentication::{get_jwt_token, hash_password_argon2, verify_password_argon2, AuthUser},
    data_formats::{LoginRequest, RegisterRequest, UserResponse, UserWrapper},
    db_helpers,
    errors::RequestError,
    AppState,
};

use super::JsonResult;

type UserJson = UserWrapper<UserResponse>;

// ----------------- User Handlers -----------------
pub async fn login_user(
    Extension(state): Extension<Arc<AppState>>,
    Json(UserWrapper { user: request }): Json<UserWrapper<LoginRequest>>,
) -> JsonResult<UserJson> {
    let user = db_helpers::get_user_by_email(&state.pool, &request.email)
        .await?
        .ok_or(RequestError::RunTimeError("Email not found"))?;
    let is_password_correct = verify_password_argon2(request.password, user.password.clone())
        .await
        .map_err(|_| RequestError::RunTimeError("Could not login user\nPlease Try again"))?;
    if !is_password_correct {
        return Err(RequestError::RunTimeError("Incorrect password"));
    }
    let token = get_jwt_token(user.id, &state.jwt_secret).map_err(|_| RequestError::ServerError)?;
    Ok(Json(UserWrapper::wrap_with_user_data(UserResponse::new(
        user, token,
    ))))
}

pub async fn register_user(
    Extension(state): Extension<Arc<AppState>>,
    Json(UserWrapper { mut user }): Json<UserWrapper<RegisterRequest>>,
) -> JsonResult<UserJson> {
    user.password = hash_password_argon2(user.password)
        .await
        .map_err(|_| RequestError::RunTimeError("Could not register user"))?;
    let user = db_helpers::insert_user(&state.pool, &user).await?;
    tracing::info!(user_id = user.id, "user registered");

    let token = get_jwt_token(user.id, &state.jwt_secret).map_err(|_| {
        RequestError::RunTimeError("Could not generate JWT successfully\nTry again later")
    })?;
    Ok(Json(UserWrapper::wrap_with_user_data(UserResponse::new(
        user, token,
    ))))
}

pub async fn get_current_user(
    Extension(state): Extension<Arc<AppState>>,
    AuthUser { id, token }: AuthUser,
) -> JsonResult<UserJson> {
    let user = db_helpers::get_user_by_id(&state.pool, id)
        .await?
        .ok_or(RequestError::RunTimeError("User not found"))?;
    Ok(Json(UserWrapper::wrap_with_user_data(UserResponse::new(
        user, token,
    ))))
}

//! User HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::infrastructure::http::dto::{UserPayload, UserResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取用户列表
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.find_all().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// 创建用户
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UserPayload>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let draft = payload.into_draft().map_err(ApiError::validation)?;
    let created = state.users.insert(&draft).await?;

    tracing::info!(user_id = created.id, "User created");

    Ok((StatusCode::CREATED, Json(UserResponse::from(created))))
}

/// 获取用户详情
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User", id))?;

    Ok(Json(UserResponse::from(user)))
}

/// 全量更新用户
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<UserResponse>, ApiError> {
    let draft = payload.into_draft().map_err(ApiError::validation)?;
    let updated = state
        .users
        .update(id, &draft)
        .await?
        .ok_or_else(|| ApiError::not_found("User", id))?;

    Ok(Json(UserResponse::from(updated)))
}

/// 部分更新用户：缺失字段保留既有值
pub async fn patch_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<UserResponse>, ApiError> {
    let existing = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User", id))?;

    let draft = payload
        .merged_with(&existing)
        .into_draft()
        .map_err(ApiError::validation)?;
    let updated = state
        .users
        .update(id, &draft)
        .await?
        .ok_or_else(|| ApiError::not_found("User", id))?;

    Ok(Json(UserResponse::from(updated)))
}

/// 删除用户
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.users.delete(id).await? {
        return Err(ApiError::not_found("User", id));
    }

    tracing::info!(user_id = id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}

//! FollowedHashtags HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::infrastructure::http::dto::{FollowedHashtagsPayload, FollowedHashtagsResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取关注边列表
pub async fn list_followed_hashtags(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FollowedHashtagsResponse>>, ApiError> {
    let edges = state.followed_hashtags.find_all().await?;
    Ok(Json(
        edges
            .into_iter()
            .map(FollowedHashtagsResponse::from)
            .collect(),
    ))
}

/// 创建关注边
pub async fn create_followed_hashtags(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<FollowedHashtagsPayload>,
) -> Result<(StatusCode, Json<FollowedHashtagsResponse>), ApiError> {
    let draft = payload.into_draft().map_err(ApiError::validation)?;
    let created = state.followed_hashtags.insert(&draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(FollowedHashtagsResponse::from(created)),
    ))
}

/// 获取关注边详情
pub async fn get_followed_hashtags(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<FollowedHashtagsResponse>, ApiError> {
    let edge = state
        .followed_hashtags
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("FollowedHashtags", id))?;

    Ok(Json(FollowedHashtagsResponse::from(edge)))
}

/// 全量更新关注边
pub async fn update_followed_hashtags(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<FollowedHashtagsPayload>,
) -> Result<Json<FollowedHashtagsResponse>, ApiError> {
    let draft = payload.into_draft().map_err(ApiError::validation)?;
    let updated = state
        .followed_hashtags
        .update(id, &draft)
        .await?
        .ok_or_else(|| ApiError::not_found("FollowedHashtags", id))?;

    Ok(Json(FollowedHashtagsResponse::from(updated)))
}

/// 部分更新关注边：缺失字段保留既有值
pub async fn patch_followed_hashtags(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<FollowedHashtagsPayload>,
) -> Result<Json<FollowedHashtagsResponse>, ApiError> {
    let existing = state
        .followed_hashtags
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("FollowedHashtags", id))?;

    let draft = payload
        .merged_with(&existing)
        .into_draft()
        .map_err(ApiError::validation)?;
    let updated = state
        .followed_hashtags
        .update(id, &draft)
        .await?
        .ok_or_else(|| ApiError::not_found("FollowedHashtags", id))?;

    Ok(Json(FollowedHashtagsResponse::from(updated)))
}

/// 删除关注边
pub async fn delete_followed_hashtags(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.followed_hashtags.delete(id).await? {
        return Err(ApiError::not_found("FollowedHashtags", id));
    }

    Ok(StatusCode::NO_CONTENT)
}

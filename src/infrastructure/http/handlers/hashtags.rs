//! Hashtag HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::infrastructure::http::dto::{HashtagPayload, HashtagResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取 hashtag 列表
pub async fn list_hashtags(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<HashtagResponse>>, ApiError> {
    let hashtags = state.hashtags.find_all().await?;
    Ok(Json(
        hashtags.into_iter().map(HashtagResponse::from).collect(),
    ))
}

/// 创建 hashtag
pub async fn create_hashtag(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<HashtagPayload>,
) -> Result<(StatusCode, Json<HashtagResponse>), ApiError> {
    let draft = payload.into_draft().map_err(ApiError::validation)?;
    let created = state.hashtags.insert(&draft).await?;

    tracing::info!(hashtag_id = created.id, "Hashtag created");

    Ok((StatusCode::CREATED, Json(HashtagResponse::from(created))))
}

/// 获取 hashtag 详情
pub async fn get_hashtag(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<HashtagResponse>, ApiError> {
    let hashtag = state
        .hashtags
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Hashtag", id))?;

    Ok(Json(HashtagResponse::from(hashtag)))
}

/// 全量更新 hashtag
pub async fn update_hashtag(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<HashtagPayload>,
) -> Result<Json<HashtagResponse>, ApiError> {
    let draft = payload.into_draft().map_err(ApiError::validation)?;
    let updated = state
        .hashtags
        .update(id, &draft)
        .await?
        .ok_or_else(|| ApiError::not_found("Hashtag", id))?;

    Ok(Json(HashtagResponse::from(updated)))
}

/// 部分更新 hashtag：缺失字段保留既有值
pub async fn patch_hashtag(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<HashtagPayload>,
) -> Result<Json<HashtagResponse>, ApiError> {
    let existing = state
        .hashtags
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Hashtag", id))?;

    let draft = payload
        .merged_with(&existing)
        .into_draft()
        .map_err(ApiError::validation)?;
    let updated = state
        .hashtags
        .update(id, &draft)
        .await?
        .ok_or_else(|| ApiError::not_found("Hashtag", id))?;

    Ok(Json(HashtagResponse::from(updated)))
}

/// 删除 hashtag
pub async fn delete_hashtag(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.hashtags.delete(id).await? {
        return Err(ApiError::not_found("Hashtag", id));
    }

    tracing::info!(hashtag_id = id, "Hashtag deleted");

    Ok(StatusCode::NO_CONTENT)
}

//! LikedPosts HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::infrastructure::http::dto::{LikedPostsPayload, LikedPostsResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取帖子点赞边列表
pub async fn list_liked_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LikedPostsResponse>>, ApiError> {
    let edges = state.liked_posts.find_all().await?;
    Ok(Json(
        edges.into_iter().map(LikedPostsResponse::from).collect(),
    ))
}

/// 创建帖子点赞边
pub async fn create_liked_posts(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LikedPostsPayload>,
) -> Result<(StatusCode, Json<LikedPostsResponse>), ApiError> {
    let draft = payload.into_draft().map_err(ApiError::validation)?;
    let created = state.liked_posts.insert(&draft).await?;

    Ok((StatusCode::CREATED, Json(LikedPostsResponse::from(created))))
}

/// 获取帖子点赞边详情
pub async fn get_liked_posts(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<LikedPostsResponse>, ApiError> {
    let edge = state
        .liked_posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("LikedPosts", id))?;

    Ok(Json(LikedPostsResponse::from(edge)))
}

/// 全量更新帖子点赞边
pub async fn update_liked_posts(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<LikedPostsPayload>,
) -> Result<Json<LikedPostsResponse>, ApiError> {
    let draft = payload.into_draft().map_err(ApiError::validation)?;
    let updated = state
        .liked_posts
        .update(id, &draft)
        .await?
        .ok_or_else(|| ApiError::not_found("LikedPosts", id))?;

    Ok(Json(LikedPostsResponse::from(updated)))
}

/// 部分更新帖子点赞边：缺失字段保留既有值
pub async fn patch_liked_posts(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<LikedPostsPayload>,
) -> Result<Json<LikedPostsResponse>, ApiError> {
    let existing = state
        .liked_posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("LikedPosts", id))?;

    let draft = payload
        .merged_with(&existing)
        .into_draft()
        .map_err(ApiError::validation)?;
    let updated = state
        .liked_posts
        .update(id, &draft)
        .await?
        .ok_or_else(|| ApiError::not_found("LikedPosts", id))?;

    Ok(Json(LikedPostsResponse::from(updated)))
}

/// 删除帖子点赞边
pub async fn delete_liked_posts(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.liked_posts.delete(id).await? {
        return Err(ApiError::not_found("LikedPosts", id));
    }

    Ok(StatusCode::NO_CONTENT)
}

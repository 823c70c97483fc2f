//! LikedUsers HTTP Handlers
//!
//! 基础 CRUD 之外提供两个只读聚合：
//! - `GET /liked-users/count-likes/?user_id=<id>` 某用户点赞了多少用户
//! - `GET /liked-users/count-liked-by/?user_id=<id>` 某用户被多少用户点赞
//!
//! 重复边不去重，按原样计入

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::infrastructure::http::dto::{
    LikedByCountResponse, LikedCountResponse, LikedUsersPayload, LikedUsersResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 聚合查询参数
///
/// `user_id` 以字符串接收，缺失和非整数分别报不同的错误
#[derive(Debug, Deserialize)]
pub struct CountParams {
    pub user_id: Option<String>,
}

impl CountParams {
    fn parse_user_id(&self) -> Result<i64, ApiError> {
        let raw = self.user_id.as_deref().ok_or_else(|| {
            ApiError::BadRequest("user_id parameter is required.".to_string())
        })?;

        raw.parse::<i64>().map_err(|_| {
            ApiError::BadRequest("user_id must be a valid integer.".to_string())
        })
    }
}

/// 统计某用户点赞了多少用户
pub async fn count_likes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountParams>,
) -> Result<Json<LikedCountResponse>, ApiError> {
    let user_id = params.parse_user_id()?;
    let liked_count = state.liked_users.count_by_liker(user_id).await?;

    Ok(Json(LikedCountResponse {
        user_id,
        liked_count,
    }))
}

/// 统计某用户被多少用户点赞
pub async fn count_liked_by(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountParams>,
) -> Result<Json<LikedByCountResponse>, ApiError> {
    let user_id = params.parse_user_id()?;
    let liked_by_count = state.liked_users.count_by_liked_user(user_id).await?;

    Ok(Json(LikedByCountResponse {
        user_id,
        liked_by_count,
    }))
}

/// 获取点赞边列表
pub async fn list_liked_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LikedUsersResponse>>, ApiError> {
    let edges = state.liked_users.find_all().await?;
    Ok(Json(
        edges.into_iter().map(LikedUsersResponse::from).collect(),
    ))
}

/// 创建点赞边
pub async fn create_liked_users(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LikedUsersPayload>,
) -> Result<(StatusCode, Json<LikedUsersResponse>), ApiError> {
    let draft = payload.into_draft().map_err(ApiError::validation)?;
    let created = state.liked_users.insert(&draft).await?;

    Ok((StatusCode::CREATED, Json(LikedUsersResponse::from(created))))
}

/// 获取点赞边详情
pub async fn get_liked_users(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<LikedUsersResponse>, ApiError> {
    let edge = state
        .liked_users
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("LikedUsers", id))?;

    Ok(Json(LikedUsersResponse::from(edge)))
}

/// 全量更新点赞边
pub async fn update_liked_users(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<LikedUsersPayload>,
) -> Result<Json<LikedUsersResponse>, ApiError> {
    let draft = payload.into_draft().map_err(ApiError::validation)?;
    let updated = state
        .liked_users
        .update(id, &draft)
        .await?
        .ok_or_else(|| ApiError::not_found("LikedUsers", id))?;

    Ok(Json(LikedUsersResponse::from(updated)))
}

/// 部分更新点赞边：缺失字段保留既有值
pub async fn patch_liked_users(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<LikedUsersPayload>,
) -> Result<Json<LikedUsersResponse>, ApiError> {
    let existing = state
        .liked_users
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("LikedUsers", id))?;

    let draft = payload
        .merged_with(&existing)
        .into_draft()
        .map_err(ApiError::validation)?;
    let updated = state
        .liked_users
        .update(id, &draft)
        .await?
        .ok_or_else(|| ApiError::not_found("LikedUsers", id))?;

    Ok(Json(LikedUsersResponse::from(updated)))
}

/// 删除点赞边
pub async fn delete_liked_users(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.liked_users.delete(id).await? {
        return Err(ApiError::not_found("LikedUsers", id));
    }

    Ok(StatusCode::NO_CONTENT)
}

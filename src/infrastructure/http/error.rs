//! HTTP Error Handling
//!
//! 错误在 handler 边界统一翻译为 HTTP 状态码 + JSON 响应体，
//! 响应体固定为 `{"error": "<message>"}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ports::RepositoryError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// API 错误
///
/// - BadRequest: 查询参数缺失/非法、payload 字段校验失败、约束冲突 → 400
/// - NotFound: id 未命中记录 → 404
/// - Internal: 存储层故障 → 500
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: i64) -> Self {
        ApiError::NotFound(format!("{} {} not found.", resource_type, id))
    }

    /// 创建字段校验错误，消息列出所有不合法字段
    pub fn validation(detail: impl Into<String>) -> Self {
        ApiError::BadRequest(detail.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, response) = match &self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, ErrorResponse::new(msg.clone()))
            }
            ApiError::NotFound(msg) => {
                tracing::warn!(error = %msg, "Resource not found");
                (StatusCode::NOT_FOUND, ErrorResponse::new(msg.clone()))
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(msg.clone()),
                )
            }
        };

        (status, Json(response)).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        match e {
            // 引用存在性由存储层保证，冲突视为请求错误
            RepositoryError::ConstraintViolation(msg) => ApiError::BadRequest(msg),
            _ => ApiError::Internal(e.to_string()),
        }
    }
}

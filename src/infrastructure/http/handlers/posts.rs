//! Post HTTP Handlers
//!
//! 基础 CRUD 之外提供两种 hashtag 过滤：
//! - `GET /posts/?hashtags__id=<id>` 单个 hashtag
//! - `GET /posts/filter-by-hashtags/?hashtags=<id>&hashtags=<id>` 多个 hashtag 并集

use axum::{
    extract::{Path, Query, RawQuery, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::infrastructure::http::dto::{PostPayload, PostResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::query::query_values;
use crate::infrastructure::http::state::AppState;

/// 帖子列表查询参数
#[derive(Debug, Deserialize)]
pub struct PostListParams {
    /// 仅返回带有该 hashtag 的帖子
    #[serde(rename = "hashtags__id")]
    pub hashtags_id: Option<i64>,
}

/// 获取帖子列表（time 降序，可选单 hashtag 过滤）
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PostListParams>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let posts = match params.hashtags_id {
        Some(hashtag_id) => state.posts.find_by_hashtag(hashtag_id).await?,
        None => state.posts.find_all().await?,
    };

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// 按多个 hashtag 过滤帖子（并集语义，去重）
///
/// `hashtags` 以重复查询参数传入，至少一个，全部必须是整数
pub async fn filter_posts_by_hashtags(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let values = query_values(raw.as_deref().unwrap_or(""), "hashtags");

    if values.is_empty() {
        return Err(ApiError::BadRequest(
            "At least one hashtag ID is required.".to_string(),
        ));
    }

    let mut hashtag_ids = Vec::with_capacity(values.len());
    for value in &values {
        match value.parse::<i64>() {
            Ok(id) => hashtag_ids.push(id),
            Err(_) => {
                return Err(ApiError::BadRequest(
                    "Each hashtag ID must be a valid integer.".to_string(),
                ))
            }
        }
    }

    let posts = state.posts.find_by_hashtags_any(&hashtag_ids).await?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// 创建帖子
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PostPayload>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let draft = payload.into_draft().map_err(ApiError::validation)?;
    let created = state.posts.insert(&draft).await?;

    tracing::info!(post_id = created.id, user_id = created.user_id, "Post created");

    Ok((StatusCode::CREATED, Json(PostResponse::from(created))))
}

/// 获取帖子详情
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post", id))?;

    Ok(Json(PostResponse::from(post)))
}

/// 全量更新帖子
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<PostPayload>,
) -> Result<Json<PostResponse>, ApiError> {
    let draft = payload.into_draft().map_err(ApiError::validation)?;
    let updated = state
        .posts
        .update(id, &draft)
        .await?
        .ok_or_else(|| ApiError::not_found("Post", id))?;

    Ok(Json(PostResponse::from(updated)))
}

/// 部分更新帖子：缺失字段保留既有值
pub async fn patch_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<PostPayload>,
) -> Result<Json<PostResponse>, ApiError> {
    let existing = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post", id))?;

    let draft = payload
        .merged_with(&existing)
        .into_draft()
        .map_err(ApiError::validation)?;
    let updated = state
        .posts
        .update(id, &draft)
        .await?
        .ok_or_else(|| ApiError::not_found("Post", id))?;

    Ok(Json(PostResponse::from(updated)))
}

/// 删除帖子
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.posts.delete(id).await? {
        return Err(ApiError::not_found("Post", id));
    }

    tracing::info!(post_id = id, "Post deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use crate::infrastructure::http::testing::test_app;

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        (status, body_json(response).await)
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> Value {
        let response = app
            .clone()
            .oneshot(json_request("POST", uri, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    /// 创建一个用户和两个 hashtag，返回 (user_id, [tag ids])
    async fn seed(app: &Router, tag_count: usize) -> (i64, Vec<i64>) {
        let user = post_json(app, "/users/", json!({"username": "alice"})).await;
        let mut tags = Vec::new();
        for i in 0..tag_count {
            let tag = post_json(app, "/hashtags/", json!({"name": format!("tag{}", i)})).await;
            tags.push(tag["id"].as_i64().unwrap());
        }
        (user["id"].as_i64().unwrap(), tags)
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let app = test_app().await;
        let (user_id, tags) = seed(&app, 1).await;

        let created = post_json(
            &app,
            "/posts/",
            json!({
                "user_id": user_id,
                "text": "hello world",
                "time": "2026-08-01T12:00:00Z",
                "hashtags": tags,
            }),
        )
        .await;

        let (status, found) =
            get_json(&app, &format!("/posts/{}/", created["id"].as_i64().unwrap())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found, created);
        assert_eq!(found["hashtags"], json!(tags));
    }

    #[tokio::test]
    async fn test_listing_is_newest_first() {
        let app = test_app().await;
        let (user_id, _) = seed(&app, 0).await;

        for (text, time) in [
            ("middle", "2026-08-02T00:00:00Z"),
            ("newest", "2026-08-03T00:00:00Z"),
            ("oldest", "2026-08-01T00:00:00Z"),
        ] {
            post_json(
                &app,
                "/posts/",
                json!({"user_id": user_id, "text": text, "time": time}),
            )
            .await;
        }

        let (status, posts) = get_json(&app, "/posts/").await;
        assert_eq!(status, StatusCode::OK);
        let texts: Vec<&str> = posts
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["text"].as_str().unwrap())
            .collect();
        assert_eq!(texts, ["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn test_list_filtered_by_single_hashtag() {
        let app = test_app().await;
        let (user_id, tags) = seed(&app, 2).await;

        let tagged = post_json(
            &app,
            "/posts/",
            json!({"user_id": user_id, "text": "tagged", "hashtags": [tags[0]]}),
        )
        .await;
        post_json(&app, "/posts/", json!({"user_id": user_id, "text": "plain"})).await;

        let (status, posts) = get_json(&app, &format!("/posts/?hashtags__id={}", tags[0])).await;
        assert_eq!(status, StatusCode::OK);
        let posts = posts.as_array().unwrap().clone();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0]["id"], tagged["id"]);
    }

    #[tokio::test]
    async fn test_filter_by_hashtags_requires_values() {
        let app = test_app().await;

        let (status, body) = get_json(&app, "/posts/filter-by-hashtags/").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "At least one hashtag ID is required."}));
    }

    #[tokio::test]
    async fn test_filter_by_hashtags_rejects_non_integers() {
        let app = test_app().await;

        let (status, body) = get_json(&app, "/posts/filter-by-hashtags/?hashtags=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "Each hashtag ID must be a valid integer."})
        );

        // 混合时第一个非法值即失败
        let (status, body) =
            get_json(&app, "/posts/filter-by-hashtags/?hashtags=1&hashtags=x").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "Each hashtag ID must be a valid integer."})
        );
    }

    #[tokio::test]
    async fn test_filter_by_hashtags_returns_distinct_union() {
        let app = test_app().await;
        let (user_id, tags) = seed(&app, 3).await;

        // 同时带 tag0 和 tag1 的帖子只能出现一次
        let both = post_json(
            &app,
            "/posts/",
            json!({
                "user_id": user_id,
                "text": "both",
                "time": "2026-08-03T00:00:00Z",
                "hashtags": [tags[0], tags[1]],
            }),
        )
        .await;
        let second = post_json(
            &app,
            "/posts/",
            json!({
                "user_id": user_id,
                "text": "second",
                "time": "2026-08-02T00:00:00Z",
                "hashtags": [tags[1]],
            }),
        )
        .await;
        post_json(
            &app,
            "/posts/",
            json!({
                "user_id": user_id,
                "text": "other",
                "time": "2026-08-04T00:00:00Z",
                "hashtags": [tags[2]],
            }),
        )
        .await;

        let (status, posts) = get_json(
            &app,
            &format!(
                "/posts/filter-by-hashtags/?hashtags={}&hashtags={}",
                tags[0], tags[1]
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let ids: Vec<i64> = posts
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_i64().unwrap())
            .collect();
        assert_eq!(
            ids,
            [both["id"].as_i64().unwrap(), second["id"].as_i64().unwrap()]
        );
    }

    #[tokio::test]
    async fn test_create_without_required_fields_is_400() {
        let app = test_app().await;

        let response = app
            .oneshot(json_request("POST", "/posts/", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "user_id: This field is required.; text: This field is required."})
        );
    }
}

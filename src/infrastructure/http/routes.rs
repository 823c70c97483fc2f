//! HTTP Routes
//!
//! 显式路由表：(method, path) → handler
//!
//! API Endpoints:
//! - /<entity>/                           GET 列表 / POST 创建
//! - /<entity>/:id/                       GET / PUT / PATCH / DELETE
//! - /posts/?hashtags__id=<id>            按单个 hashtag 过滤帖子
//! - /posts/filter-by-hashtags/           按多个 hashtag 并集过滤
//! - /liked-users/count-likes/            统计某用户点赞数
//! - /liked-users/count-liked-by/         统计某用户被点赞数
//! - /ping                                健康检查

use axum::{routing::get, Router};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .merge(user_routes())
        .merge(post_routes())
        .merge(hashtag_routes())
        .merge(liked_users_routes())
        .merge(followed_hashtags_routes())
        .merge(liked_posts_routes())
}

/// User 路由
fn user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/users/",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/users/:id/",
            get(handlers::get_user)
                .put(handlers::update_user)
                .patch(handlers::patch_user)
                .delete(handlers::delete_user),
        )
}

/// Post 路由
fn post_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/posts/",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route(
            "/posts/filter-by-hashtags/",
            get(handlers::filter_posts_by_hashtags),
        )
        .route(
            "/posts/:id/",
            get(handlers::get_post)
                .put(handlers::update_post)
                .patch(handlers::patch_post)
                .delete(handlers::delete_post),
        )
}

/// Hashtag 路由
fn hashtag_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/hashtags/",
            get(handlers::list_hashtags).post(handlers::create_hashtag),
        )
        .route(
            "/hashtags/:id/",
            get(handlers::get_hashtag)
                .put(handlers::update_hashtag)
                .patch(handlers::patch_hashtag)
                .delete(handlers::delete_hashtag),
        )
}

/// LikedUsers 路由
fn liked_users_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/liked-users/",
            get(handlers::list_liked_users).post(handlers::create_liked_users),
        )
        .route("/liked-users/count-likes/", get(handlers::count_likes))
        .route(
            "/liked-users/count-liked-by/",
            get(handlers::count_liked_by),
        )
        .route(
            "/liked-users/:id/",
            get(handlers::get_liked_users)
                .put(handlers::update_liked_users)
                .patch(handlers::patch_liked_users)
                .delete(handlers::delete_liked_users),
        )
}

/// FollowedHashtags 路由
fn followed_hashtags_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/followed-hashtags/",
            get(handlers::list_followed_hashtags).post(handlers::create_followed_hashtags),
        )
        .route(
            "/followed-hashtags/:id/",
            get(handlers::get_followed_hashtags)
                .put(handlers::update_followed_hashtags)
                .patch(handlers::patch_followed_hashtags)
                .delete(handlers::delete_followed_hashtags),
        )
}

/// LikedPosts 路由
fn liked_posts_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/liked-posts/",
            get(handlers::list_liked_posts).post(handlers::create_liked_posts),
        )
        .route(
            "/liked-posts/:id/",
            get(handlers::get_liked_posts)
                .put(handlers::update_liked_posts)
                .patch(handlers::patch_liked_posts)
                .delete(handlers::delete_liked_posts),
        )
}

//! Application State
//!
//! 持有所有实体的 Repository 端口，handler 通过共享状态访问存储，
//! 不依赖任何全局隐式状态

use std::sync::Arc;

use crate::application::ports::{
    FollowedHashtagsRepositoryPort, HashtagRepositoryPort, LikedPostsRepositoryPort,
    LikedUsersRepositoryPort, PostRepositoryPort, UserRepositoryPort,
};

/// 应用状态
pub struct AppState {
    pub users: Arc<dyn UserRepositoryPort>,
    pub posts: Arc<dyn PostRepositoryPort>,
    pub hashtags: Arc<dyn HashtagRepositoryPort>,
    pub liked_users: Arc<dyn LikedUsersRepositoryPort>,
    pub followed_hashtags: Arc<dyn FollowedHashtagsRepositoryPort>,
    pub liked_posts: Arc<dyn LikedPostsRepositoryPort>,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        users: Arc<dyn UserRepositoryPort>,
        posts: Arc<dyn PostRepositoryPort>,
        hashtags: Arc<dyn HashtagRepositoryPort>,
        liked_users: Arc<dyn LikedUsersRepositoryPort>,
        followed_hashtags: Arc<dyn FollowedHashtagsRepositoryPort>,
        liked_posts: Arc<dyn LikedPostsRepositoryPort>,
    ) -> Self {
        Self {
            users,
            posts,
            hashtags,
            liked_users,
            followed_hashtags,
            liked_posts,
        }
    }
}

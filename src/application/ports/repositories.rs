//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Generic CRUD Port
// ============================================================================

/// 通用 CRUD 端口
///
/// 每个实体仓储都实现这一组基础操作：
/// - `R` 持久化记录（含存储分配的 id）
/// - `D` 待写入数据（不含 id）
///
/// `update`/`delete` 对不存在的 id 返回 `None`/`false`，
/// NotFound 的语义由 HTTP 层负责翻译。
#[async_trait]
pub trait CrudPort<R, D>: Send + Sync {
    /// 获取所有记录
    async fn find_all(&self) -> Result<Vec<R>, RepositoryError>;

    /// 根据 ID 查找记录
    async fn find_by_id(&self, id: i64) -> Result<Option<R>, RepositoryError>;

    /// 插入新记录，返回含存储分配 id 的完整记录
    async fn insert(&self, draft: &D) -> Result<R, RepositoryError>;

    /// 全量更新记录，id 不存在时返回 None
    async fn update(&self, id: i64, draft: &D) -> Result<Option<R>, RepositoryError>;

    /// 删除记录，id 不存在时返回 false
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}

// ============================================================================
// User
// ============================================================================

/// 用户实体（用于持久化）
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// 用户写入数据
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub username: String,
}

/// User Repository Port
pub trait UserRepositoryPort: CrudPort<UserRecord, UserDraft> {}

// ============================================================================
// Post
// ============================================================================

/// 帖子实体（用于持久化）
///
/// `hashtag_ids` 为多对多关联的 hashtag id 集合
#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub id: i64,
    pub user_id: i64,
    pub text: String,
    pub time: DateTime<Utc>,
    pub hashtag_ids: Vec<i64>,
}

/// 帖子写入数据
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub user_id: i64,
    pub text: String,
    pub time: DateTime<Utc>,
    pub hashtag_ids: Vec<i64>,
}

/// Post Repository Port
///
/// 在通用 CRUD 之上增加两个按 hashtag 过滤的查询。
/// 所有列表查询按 time 降序返回，时间相同时按 id 降序。
#[async_trait]
pub trait PostRepositoryPort: CrudPort<PostRecord, PostDraft> {
    /// 获取带有指定 hashtag 的帖子
    async fn find_by_hashtag(&self, hashtag_id: i64) -> Result<Vec<PostRecord>, RepositoryError>;

    /// 获取带有任意一个给定 hashtag 的帖子（并集，去重）
    async fn find_by_hashtags_any(
        &self,
        hashtag_ids: &[i64],
    ) -> Result<Vec<PostRecord>, RepositoryError>;
}

// ============================================================================
// Hashtag
// ============================================================================

/// Hashtag 实体（用于持久化）
#[derive(Debug, Clone, PartialEq)]
pub struct HashtagRecord {
    pub id: i64,
    pub name: String,
}

/// Hashtag 写入数据
#[derive(Debug, Clone)]
pub struct HashtagDraft {
    pub name: String,
}

/// Hashtag Repository Port
pub trait HashtagRepositoryPort: CrudPort<HashtagRecord, HashtagDraft> {}

// ============================================================================
// LikedUsers (用户点赞用户的有向边)
// ============================================================================

/// 用户点赞边 `(liker -> liked_user)`
///
/// 同一对用户允许出现重复边，计数时不去重
#[derive(Debug, Clone, PartialEq)]
pub struct LikedUsersRecord {
    pub id: i64,
    pub liker: i64,
    pub liked_user: i64,
}

/// 用户点赞边写入数据
#[derive(Debug, Clone)]
pub struct LikedUsersDraft {
    pub liker: i64,
    pub liked_user: i64,
}

/// LikedUsers Repository Port
#[async_trait]
pub trait LikedUsersRepositoryPort: CrudPort<LikedUsersRecord, LikedUsersDraft> {
    /// 统计指定用户点赞了多少用户（liker == user_id 的边数）
    async fn count_by_liker(&self, user_id: i64) -> Result<i64, RepositoryError>;

    /// 统计指定用户被多少用户点赞（liked_user == user_id 的边数）
    async fn count_by_liked_user(&self, user_id: i64) -> Result<i64, RepositoryError>;
}

// ============================================================================
// FollowedHashtags (用户关注 hashtag 的边)
// ============================================================================

/// 关注边 `(user -> hashtag)`
#[derive(Debug, Clone, PartialEq)]
pub struct FollowedHashtagsRecord {
    pub id: i64,
    pub user_id: i64,
    pub hashtag_id: i64,
}

/// 关注边写入数据
#[derive(Debug, Clone)]
pub struct FollowedHashtagsDraft {
    pub user_id: i64,
    pub hashtag_id: i64,
}

/// FollowedHashtags Repository Port
pub trait FollowedHashtagsRepositoryPort:
    CrudPort<FollowedHashtagsRecord, FollowedHashtagsDraft>
{
}

// ============================================================================
// LikedPosts (用户点赞帖子的边)
// ============================================================================

/// 帖子点赞边 `(user -> post)`
#[derive(Debug, Clone, PartialEq)]
pub struct LikedPostsRecord {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
}

/// 帖子点赞边写入数据
#[derive(Debug, Clone)]
pub struct LikedPostsDraft {
    pub user_id: i64,
    pub post_id: i64,
}

/// LikedPosts Repository Port
pub trait LikedPostsRepositoryPort: CrudPort<LikedPostsRecord, LikedPostsDraft> {}

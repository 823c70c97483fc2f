//! Data Transfer Objects
//!
//! 每个端点的类型化请求/响应结构。
//! 请求 payload 的字段全部可选，校验规则显式写在 `into_draft` 中，
//! 失败时返回列出所有不合法字段的消息。
//! PATCH 通过 `merged_with` 先用既有记录补齐缺失字段，再走同一套校验。

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    FollowedHashtagsDraft, FollowedHashtagsRecord, HashtagDraft, HashtagRecord, LikedPostsDraft,
    LikedPostsRecord, LikedUsersDraft, LikedUsersRecord, PostDraft, PostRecord, UserDraft,
    UserRecord,
};

/// 字段校验错误收集器
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<String>,
}

impl FieldErrors {
    pub fn push(&mut self, field: &str, rule: &str) {
        self.errors.push(format!("{}: {}", field, rule));
    }

    pub fn into_result<T>(self, value: T) -> Result<T, String> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors.join("; "))
        }
    }
}

const REQUIRED: &str = "This field is required.";
const NOT_BLANK: &str = "This field may not be blank.";
const BAD_TIMESTAMP: &str = "Must be a valid RFC 3339 timestamp.";

/// 序列化时间戳（与存储层同样的定宽 RFC 3339 格式）
fn render_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// ============================================================================
// User DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct UserPayload {
    pub username: Option<String>,
}

impl UserPayload {
    pub fn into_draft(self) -> Result<UserDraft, String> {
        let mut errors = FieldErrors::default();

        let username = match self.username {
            None => {
                errors.push("username", REQUIRED);
                String::new()
            }
            Some(name) if name.trim().is_empty() => {
                errors.push("username", NOT_BLANK);
                name
            }
            Some(name) if name.chars().count() > 150 => {
                errors.push("username", "Ensure this field has no more than 150 characters.");
                name
            }
            Some(name) => name,
        };

        errors.into_result(UserDraft { username })
    }

    /// PATCH 合并：缺失字段取既有记录的值
    pub fn merged_with(self, existing: &UserRecord) -> Self {
        Self {
            username: self.username.or_else(|| Some(existing.username.clone())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            created_at: render_timestamp(&record.created_at),
        }
    }
}

// ============================================================================
// Post DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct PostPayload {
    pub user_id: Option<i64>,
    pub text: Option<String>,
    /// RFC 3339 创建时间，缺省为当前时刻
    pub time: Option<String>,
    /// 关联的 hashtag id 集合，缺省为空
    pub hashtags: Option<Vec<i64>>,
}

impl PostPayload {
    pub fn into_draft(self) -> Result<PostDraft, String> {
        let mut errors = FieldErrors::default();

        let user_id = match self.user_id {
            None => {
                errors.push("user_id", REQUIRED);
                0
            }
            Some(id) => id,
        };

        let text = match self.text {
            None => {
                errors.push("text", REQUIRED);
                String::new()
            }
            Some(text) if text.trim().is_empty() => {
                errors.push("text", NOT_BLANK);
                text
            }
            Some(text) => text,
        };

        let time = match self.time {
            None => Utc::now(),
            Some(raw) => match DateTime::parse_from_rfc3339(&raw) {
                Ok(time) => time.with_timezone(&Utc),
                Err(_) => {
                    errors.push("time", BAD_TIMESTAMP);
                    Utc::now()
                }
            },
        };

        errors.into_result(PostDraft {
            user_id,
            text,
            time,
            hashtag_ids: self.hashtags.unwrap_or_default(),
        })
    }

    /// PATCH 合并：缺失字段取既有记录的值
    pub fn merged_with(self, existing: &PostRecord) -> Self {
        Self {
            user_id: self.user_id.or(Some(existing.user_id)),
            text: self.text.or_else(|| Some(existing.text.clone())),
            time: self.time.or_else(|| Some(render_timestamp(&existing.time))),
            hashtags: self.hashtags.or_else(|| Some(existing.hashtag_ids.clone())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub user_id: i64,
    pub text: String,
    pub time: String,
    pub hashtags: Vec<i64>,
}

impl From<PostRecord> for PostResponse {
    fn from(record: PostRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            text: record.text,
            time: render_timestamp(&record.time),
            hashtags: record.hashtag_ids,
        }
    }
}

// ============================================================================
// Hashtag DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct HashtagPayload {
    pub name: Option<String>,
}

impl HashtagPayload {
    pub fn into_draft(self) -> Result<HashtagDraft, String> {
        let mut errors = FieldErrors::default();

        let name = match self.name {
            None => {
                errors.push("name", REQUIRED);
                String::new()
            }
            Some(name) if name.trim().is_empty() => {
                errors.push("name", NOT_BLANK);
                name
            }
            Some(name) => name,
        };

        errors.into_result(HashtagDraft { name })
    }

    pub fn merged_with(self, existing: &HashtagRecord) -> Self {
        Self {
            name: self.name.or_else(|| Some(existing.name.clone())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HashtagResponse {
    pub id: i64,
    pub name: String,
}

impl From<HashtagRecord> for HashtagResponse {
    fn from(record: HashtagRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
        }
    }
}

// ============================================================================
// LikedUsers DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct LikedUsersPayload {
    pub liker: Option<i64>,
    pub liked_user: Option<i64>,
}

impl LikedUsersPayload {
    pub fn into_draft(self) -> Result<LikedUsersDraft, String> {
        let mut errors = FieldErrors::default();

        let liker = match self.liker {
            None => {
                errors.push("liker", REQUIRED);
                0
            }
            Some(id) => id,
        };

        let liked_user = match self.liked_user {
            None => {
                errors.push("liked_user", REQUIRED);
                0
            }
            Some(id) => id,
        };

        errors.into_result(LikedUsersDraft { liker, liked_user })
    }

    pub fn merged_with(self, existing: &LikedUsersRecord) -> Self {
        Self {
            liker: self.liker.or(Some(existing.liker)),
            liked_user: self.liked_user.or(Some(existing.liked_user)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LikedUsersResponse {
    pub id: i64,
    pub liker: i64,
    pub liked_user: i64,
}

impl From<LikedUsersRecord> for LikedUsersResponse {
    fn from(record: LikedUsersRecord) -> Self {
        Self {
            id: record.id,
            liker: record.liker,
            liked_user: record.liked_user,
        }
    }
}

/// count-likes 聚合响应
#[derive(Debug, Serialize)]
pub struct LikedCountResponse {
    pub user_id: i64,
    pub liked_count: i64,
}

/// count-liked-by 聚合响应
#[derive(Debug, Serialize)]
pub struct LikedByCountResponse {
    pub user_id: i64,
    pub liked_by_count: i64,
}

// ============================================================================
// FollowedHashtags DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct FollowedHashtagsPayload {
    pub user: Option<i64>,
    pub hashtag: Option<i64>,
}

impl FollowedHashtagsPayload {
    pub fn into_draft(self) -> Result<FollowedHashtagsDraft, String> {
        let mut errors = FieldErrors::default();

        let user_id = match self.user {
            None => {
                errors.push("user", REQUIRED);
                0
            }
            Some(id) => id,
        };

        let hashtag_id = match self.hashtag {
            None => {
                errors.push("hashtag", REQUIRED);
                0
            }
            Some(id) => id,
        };

        errors.into_result(FollowedHashtagsDraft {
            user_id,
            hashtag_id,
        })
    }

    pub fn merged_with(self, existing: &FollowedHashtagsRecord) -> Self {
        Self {
            user: self.user.or(Some(existing.user_id)),
            hashtag: self.hashtag.or(Some(existing.hashtag_id)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FollowedHashtagsResponse {
    pub id: i64,
    pub user: i64,
    pub hashtag: i64,
}

impl From<FollowedHashtagsRecord> for FollowedHashtagsResponse {
    fn from(record: FollowedHashtagsRecord) -> Self {
        Self {
            id: record.id,
            user: record.user_id,
            hashtag: record.hashtag_id,
        }
    }
}

// ============================================================================
// LikedPosts DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct LikedPostsPayload {
    pub user: Option<i64>,
    pub post: Option<i64>,
}

impl LikedPostsPayload {
    pub fn into_draft(self) -> Result<LikedPostsDraft, String> {
        let mut errors = FieldErrors::default();

        let user_id = match self.user {
            None => {
                errors.push("user", REQUIRED);
                0
            }
            Some(id) => id,
        };

        let post_id = match self.post {
            None => {
                errors.push("post", REQUIRED);
                0
            }
            Some(id) => id,
        };

        errors.into_result(LikedPostsDraft { user_id, post_id })
    }

    pub fn merged_with(self, existing: &LikedPostsRecord) -> Self {
        Self {
            user: self.user.or(Some(existing.user_id)),
            post: self.post.or(Some(existing.post_id)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LikedPostsResponse {
    pub id: i64,
    pub user: i64,
    pub post: i64,
}

impl From<LikedPostsRecord> for LikedPostsResponse {
    fn from(record: LikedPostsRecord) -> Self {
        Self {
            id: record.id,
            user: record.user_id,
            post: record.post_id,
        }
    }
}

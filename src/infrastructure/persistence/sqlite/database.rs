//! SQLite Database - 数据库连接和迁移

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::application::ports::RepositoryError;

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    pub database_url: String,
    /// 最大连接数
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:./data/hive.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            database_url: format!("sqlite:{}?mode=rwc", path.as_ref().display()),
            max_connections: 5,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// 数据库连接池
pub type DbPool = Pool<Sqlite>;

/// 创建数据库连接池
///
/// 外键约束必须逐连接开启，因此通过连接选项而不是 PRAGMA 语句设置
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        // 启用 WAL 模式，允许并发读写
        .journal_mode(SqliteJournalMode::Wal)
        // 遇到锁时等待而不是立即失败
        .busy_timeout(Duration::from_millis(5000))
        // 同步模式 NORMAL（平衡性能和安全性）
        .synchronous(SqliteSynchronous::Normal)
        // 引用存在性校验交给存储层
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    tracing::info!("SQLite pool created with WAL mode and busy_timeout=5000ms");

    Ok(pool)
}

/// 运行数据库迁移
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    // 创建 users 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 hashtags 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS hashtags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 posts 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            text TEXT NOT NULL,
            time TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 post_hashtags 关联表（多对多）
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS post_hashtags (
            post_id INTEGER NOT NULL,
            hashtag_id INTEGER NOT NULL,
            FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE CASCADE,
            FOREIGN KEY (hashtag_id) REFERENCES hashtags(id) ON DELETE CASCADE,
            UNIQUE (post_id, hashtag_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 liked_users 表（用户点赞用户，允许重复边）
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS liked_users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            liker INTEGER NOT NULL,
            liked_user INTEGER NOT NULL,
            FOREIGN KEY (liker) REFERENCES users(id),
            FOREIGN KEY (liked_user) REFERENCES users(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 followed_hashtags 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS followed_hashtags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            hashtag_id INTEGER NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id),
            FOREIGN KEY (hashtag_id) REFERENCES hashtags(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 liked_posts 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS liked_posts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            post_id INTEGER NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id),
            FOREIGN KEY (post_id) REFERENCES posts(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建索引
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_posts_time
        ON posts(time DESC)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_post_hashtags_hashtag_id
        ON post_hashtags(hashtag_id)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_liked_users_liker
        ON liked_users(liker)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_liked_users_liked_user
        ON liked_users(liked_user)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migrations completed");
    Ok(())
}

/// 将 sqlx 错误映射为 Repository 错误
///
/// 外键等约束冲突单独归类，HTTP 层将其翻译为 400 而不是 500
pub(crate) fn map_db_err(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db)
            if db.message().contains("FOREIGN KEY") || db.message().contains("UNIQUE") =>
        {
            RepositoryError::ConstraintViolation(db.message().to_string())
        }
        _ => RepositoryError::DatabaseError(e.to_string()),
    }
}

/// 序列化时间戳为定宽 RFC 3339 文本
///
/// 固定微秒精度，保证字典序与时间序一致（posts 按 time 文本排序）
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// 解析存储中的 RFC 3339 时间戳
pub(crate) fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_in_memory_db() {
        let config = DatabaseConfig::in_memory();
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_file_backed_db() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig::new(dir.path().join("hive.db"));
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
    }

    #[test]
    fn test_timestamp_round_trip() {
        let now = Utc::now();
        let text = format_timestamp(&now);
        let parsed = parse_timestamp(&text).unwrap();
        assert_eq!(parsed.timestamp_micros(), now.timestamp_micros());
    }

    #[test]
    fn test_timestamp_text_order_matches_time_order() {
        let earlier = Utc::now();
        let later = earlier + chrono::Duration::microseconds(1);
        assert!(format_timestamp(&earlier) < format_timestamp(&later));
    }
}

//! SQLite User Repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::FromRow;

use super::database::{format_timestamp, map_db_err, parse_timestamp, DbPool};
use crate::application::ports::{
    CrudPort, RepositoryError, UserDraft, UserRecord, UserRepositoryPort,
};

/// SQLite User Repository
pub struct SqliteUserRepository {
    pool: DbPool,
}

impl SqliteUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    username: String,
    created_at: String,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserRecord {
            id: row.id,
            username: row.username,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

#[async_trait]
impl CrudPort<UserRecord, UserDraft> for SqliteUserRepository {
    async fn find_all(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        let rows: Vec<UserRow> =
            sqlx::query_as("SELECT id, username, created_at FROM users ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_err)?;

        rows.into_iter().map(UserRecord::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, username, created_at FROM users WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_err)?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn insert(&self, draft: &UserDraft) -> Result<UserRecord, RepositoryError> {
        // 存储精度为微秒，返回值从存储文本解析以保持一致
        let created_at_text = format_timestamp(&Utc::now());

        let result = sqlx::query("INSERT INTO users (username, created_at) VALUES (?, ?)")
            .bind(&draft.username)
            .bind(&created_at_text)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(UserRecord {
            id: result.last_insert_rowid(),
            username: draft.username.clone(),
            created_at: parse_timestamp(&created_at_text)?,
        })
    }

    async fn update(
        &self,
        id: i64,
        draft: &UserDraft,
    ) -> Result<Option<UserRecord>, RepositoryError> {
        // created_at 不可变，更新只覆盖业务字段
        let result = sqlx::query("UPDATE users SET username = ? WHERE id = ?")
            .bind(&draft.username)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected() > 0)
    }
}

impl UserRepositoryPort for SqliteUserRepository {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    async fn setup() -> SqliteUserRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteUserRepository::new(pool)
    }

    #[tokio::test]
    async fn test_insert_then_find_round_trip() {
        let repo = setup().await;

        let created = repo
            .insert(&UserDraft {
                username: "alice".to_string(),
            })
            .await
            .unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_find_all_returns_everything() {
        let repo = setup().await;

        for name in ["alice", "bob", "carol"] {
            repo.insert(&UserDraft {
                username: name.to_string(),
            })
            .await
            .unwrap();
        }

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_update_preserves_created_at() {
        let repo = setup().await;

        let created = repo
            .insert(&UserDraft {
                username: "alice".to_string(),
            })
            .await
            .unwrap();

        let updated = repo
            .update(
                created.id,
                &UserDraft {
                    username: "alice2".to_string(),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.username, "alice2");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let repo = setup().await;

        let result = repo
            .update(
                42,
                &UserDraft {
                    username: "ghost".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_then_find_returns_none() {
        let repo = setup().await;

        let created = repo
            .insert(&UserDraft {
                username: "alice".to_string(),
            })
            .await
            .unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
        assert!(!repo.delete(created.id).await.unwrap());
    }
}

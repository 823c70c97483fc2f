//! SQLite LikedUsers Repository
//!
//! 用户点赞用户的有向边，计数接口不做去重（重复边按原样计入）

use async_trait::async_trait;
use sqlx::FromRow;

use super::database::{map_db_err, DbPool};
use crate::application::ports::{
    CrudPort, LikedUsersDraft, LikedUsersRecord, LikedUsersRepositoryPort, RepositoryError,
};

/// SQLite LikedUsers Repository
pub struct SqliteLikedUsersRepository {
    pool: DbPool,
}

impl SqliteLikedUsersRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct LikedUsersRow {
    id: i64,
    liker: i64,
    liked_user: i64,
}

impl From<LikedUsersRow> for LikedUsersRecord {
    fn from(row: LikedUsersRow) -> Self {
        LikedUsersRecord {
            id: row.id,
            liker: row.liker,
            liked_user: row.liked_user,
        }
    }
}

#[async_trait]
impl CrudPort<LikedUsersRecord, LikedUsersDraft> for SqliteLikedUsersRepository {
    async fn find_all(&self) -> Result<Vec<LikedUsersRecord>, RepositoryError> {
        let rows: Vec<LikedUsersRow> =
            sqlx::query_as("SELECT id, liker, liked_user FROM liked_users ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_err)?;

        Ok(rows.into_iter().map(LikedUsersRecord::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<LikedUsersRecord>, RepositoryError> {
        let row: Option<LikedUsersRow> =
            sqlx::query_as("SELECT id, liker, liked_user FROM liked_users WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_err)?;

        Ok(row.map(LikedUsersRecord::from))
    }

    async fn insert(&self, draft: &LikedUsersDraft) -> Result<LikedUsersRecord, RepositoryError> {
        let result = sqlx::query("INSERT INTO liked_users (liker, liked_user) VALUES (?, ?)")
            .bind(draft.liker)
            .bind(draft.liked_user)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(LikedUsersRecord {
            id: result.last_insert_rowid(),
            liker: draft.liker,
            liked_user: draft.liked_user,
        })
    }

    async fn update(
        &self,
        id: i64,
        draft: &LikedUsersDraft,
    ) -> Result<Option<LikedUsersRecord>, RepositoryError> {
        let result = sqlx::query("UPDATE liked_users SET liker = ?, liked_user = ? WHERE id = ?")
            .bind(draft.liker)
            .bind(draft.liked_user)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(LikedUsersRecord {
            id,
            liker: draft.liker,
            liked_user: draft.liked_user,
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM liked_users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl LikedUsersRepositoryPort for SqliteLikedUsersRepository {
    async fn count_by_liker(&self, user_id: i64) -> Result<i64, RepositoryError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM liked_users WHERE liker = ?")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_err)?;

        Ok(count)
    }

    async fn count_by_liked_user(&self, user_id: i64) -> Result<i64, RepositoryError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM liked_users WHERE liked_user = ?")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_err)?;

        Ok(count)
    }
}

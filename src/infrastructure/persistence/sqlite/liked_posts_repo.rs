//! SQLite LikedPosts Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::database::{map_db_err, DbPool};
use crate::application::ports::{
    CrudPort, LikedPostsDraft, LikedPostsRecord, LikedPostsRepositoryPort, RepositoryError,
};

/// SQLite LikedPosts Repository
pub struct SqliteLikedPostsRepository {
    pool: DbPool,
}

impl SqliteLikedPostsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct LikedPostsRow {
    id: i64,
    user_id: i64,
    post_id: i64,
}

impl From<LikedPostsRow> for LikedPostsRecord {
    fn from(row: LikedPostsRow) -> Self {
        LikedPostsRecord {
            id: row.id,
            user_id: row.user_id,
            post_id: row.post_id,
        }
    }
}

#[async_trait]
impl CrudPort<LikedPostsRecord, LikedPostsDraft> for SqliteLikedPostsRepository {
    async fn find_all(&self) -> Result<Vec<LikedPostsRecord>, RepositoryError> {
        let rows: Vec<LikedPostsRow> =
            sqlx::query_as("SELECT id, user_id, post_id FROM liked_posts ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_err)?;

        Ok(rows.into_iter().map(LikedPostsRecord::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<LikedPostsRecord>, RepositoryError> {
        let row: Option<LikedPostsRow> =
            sqlx::query_as("SELECT id, user_id, post_id FROM liked_posts WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_err)?;

        Ok(row.map(LikedPostsRecord::from))
    }

    async fn insert(&self, draft: &LikedPostsDraft) -> Result<LikedPostsRecord, RepositoryError> {
        let result = sqlx::query("INSERT INTO liked_posts (user_id, post_id) VALUES (?, ?)")
            .bind(draft.user_id)
            .bind(draft.post_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(LikedPostsRecord {
            id: result.last_insert_rowid(),
            user_id: draft.user_id,
            post_id: draft.post_id,
        })
    }

    async fn update(
        &self,
        id: i64,
        draft: &LikedPostsDraft,
    ) -> Result<Option<LikedPostsRecord>, RepositoryError> {
        let result = sqlx::query("UPDATE liked_posts SET user_id = ?, post_id = ? WHERE id = ?")
            .bind(draft.user_id)
            .bind(draft.post_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(LikedPostsRecord {
            id,
            user_id: draft.user_id,
            post_id: draft.post_id,
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM liked_posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected() > 0)
    }
}

impl LikedPostsRepositoryPort for SqliteLikedPostsRepository {}

//! SQLite FollowedHashtags Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::database::{map_db_err, DbPool};
use crate::application::ports::{
    CrudPort, FollowedHashtagsDraft, FollowedHashtagsRecord, FollowedHashtagsRepositoryPort,
    RepositoryError,
};

/// SQLite FollowedHashtags Repository
pub struct SqliteFollowedHashtagsRepository {
    pool: DbPool,
}

impl SqliteFollowedHashtagsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct FollowedHashtagsRow {
    id: i64,
    user_id: i64,
    hashtag_id: i64,
}

impl From<FollowedHashtagsRow> for FollowedHashtagsRecord {
    fn from(row: FollowedHashtagsRow) -> Self {
        FollowedHashtagsRecord {
            id: row.id,
            user_id: row.user_id,
            hashtag_id: row.hashtag_id,
        }
    }
}

#[async_trait]
impl CrudPort<FollowedHashtagsRecord, FollowedHashtagsDraft> for SqliteFollowedHashtagsRepository {
    async fn find_all(&self) -> Result<Vec<FollowedHashtagsRecord>, RepositoryError> {
        let rows: Vec<FollowedHashtagsRow> =
            sqlx::query_as("SELECT id, user_id, hashtag_id FROM followed_hashtags ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_err)?;

        Ok(rows.into_iter().map(FollowedHashtagsRecord::from).collect())
    }

    async fn find_by_id(
        &self,
        id: i64,
    ) -> Result<Option<FollowedHashtagsRecord>, RepositoryError> {
        let row: Option<FollowedHashtagsRow> =
            sqlx::query_as("SELECT id, user_id, hashtag_id FROM followed_hashtags WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_err)?;

        Ok(row.map(FollowedHashtagsRecord::from))
    }

    async fn insert(
        &self,
        draft: &FollowedHashtagsDraft,
    ) -> Result<FollowedHashtagsRecord, RepositoryError> {
        let result =
            sqlx::query("INSERT INTO followed_hashtags (user_id, hashtag_id) VALUES (?, ?)")
                .bind(draft.user_id)
                .bind(draft.hashtag_id)
                .execute(&self.pool)
                .await
                .map_err(map_db_err)?;

        Ok(FollowedHashtagsRecord {
            id: result.last_insert_rowid(),
            user_id: draft.user_id,
            hashtag_id: draft.hashtag_id,
        })
    }

    async fn update(
        &self,
        id: i64,
        draft: &FollowedHashtagsDraft,
    ) -> Result<Option<FollowedHashtagsRecord>, RepositoryError> {
        let result =
            sqlx::query("UPDATE followed_hashtags SET user_id = ?, hashtag_id = ? WHERE id = ?")
                .bind(draft.user_id)
                .bind(draft.hashtag_id)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(map_db_err)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(FollowedHashtagsRecord {
            id,
            user_id: draft.user_id,
            hashtag_id: draft.hashtag_id,
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM followed_hashtags WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected() > 0)
    }
}

impl FollowedHashtagsRepositoryPort for SqliteFollowedHashtagsRepository {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{HashtagDraft, UserDraft};
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteHashtagRepository, SqliteUserRepository,
    };

    #[tokio::test]
    async fn test_crud_round_trip() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let user = SqliteUserRepository::new(pool.clone())
            .insert(&UserDraft {
                username: "alice".to_string(),
            })
            .await
            .unwrap();
        let tag = SqliteHashtagRepository::new(pool.clone())
            .insert(&HashtagDraft {
                name: "rust".to_string(),
            })
            .await
            .unwrap();

        let repo = SqliteFollowedHashtagsRepository::new(pool);
        let created = repo
            .insert(&FollowedHashtagsDraft {
                user_id: user.id,
                hashtag_id: tag.id,
            })
            .await
            .unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);

        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    }
}

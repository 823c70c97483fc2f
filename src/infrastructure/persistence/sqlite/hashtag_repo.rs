//! SQLite Hashtag Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::database::{map_db_err, DbPool};
use crate::application::ports::{
    CrudPort, HashtagDraft, HashtagRecord, HashtagRepositoryPort, RepositoryError,
};

/// SQLite Hashtag Repository
pub struct SqliteHashtagRepository {
    pool: DbPool,
}

impl SqliteHashtagRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct HashtagRow {
    id: i64,
    name: String,
}

impl From<HashtagRow> for HashtagRecord {
    fn from(row: HashtagRow) -> Self {
        HashtagRecord {
            id: row.id,
            name: row.name,
        }
    }
}

#[async_trait]
impl CrudPort<HashtagRecord, HashtagDraft> for SqliteHashtagRepository {
    async fn find_all(&self) -> Result<Vec<HashtagRecord>, RepositoryError> {
        let rows: Vec<HashtagRow> = sqlx::query_as("SELECT id, name FROM hashtags ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(HashtagRecord::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<HashtagRecord>, RepositoryError> {
        let row: Option<HashtagRow> = sqlx::query_as("SELECT id, name FROM hashtags WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(HashtagRecord::from))
    }

    async fn insert(&self, draft: &HashtagDraft) -> Result<HashtagRecord, RepositoryError> {
        let result = sqlx::query("INSERT INTO hashtags (name) VALUES (?)")
            .bind(&draft.name)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(HashtagRecord {
            id: result.last_insert_rowid(),
            name: draft.name.clone(),
        })
    }

    async fn update(
        &self,
        id: i64,
        draft: &HashtagDraft,
    ) -> Result<Option<HashtagRecord>, RepositoryError> {
        let result = sqlx::query("UPDATE hashtags SET name = ? WHERE id = ?")
            .bind(&draft.name)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(HashtagRecord {
            id,
            name: draft.name.clone(),
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM hashtags WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected() > 0)
    }
}

impl HashtagRepositoryPort for SqliteHashtagRepository {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    async fn setup() -> SqliteHashtagRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteHashtagRepository::new(pool)
    }

    #[tokio::test]
    async fn test_crud_round_trip() {
        let repo = setup().await;

        let created = repo
            .insert(&HashtagDraft {
                name: "rust".to_string(),
            })
            .await
            .unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);

        let updated = repo
            .update(
                created.id,
                &HashtagDraft {
                    name: "rustlang".to_string(),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "rustlang");

        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    }
}

//! SQLite Post Repository
//!
//! 帖子列表统一按 time 降序返回，时间相同时按 id 降序作为确定性次序

use async_trait::async_trait;
use sqlx::FromRow;
use std::collections::HashMap;

use super::database::{format_timestamp, map_db_err, parse_timestamp, DbPool};
use crate::application::ports::{
    CrudPort, PostDraft, PostRecord, PostRepositoryPort, RepositoryError,
};

/// SQLite Post Repository
pub struct SqlitePostRepository {
    pool: DbPool,
}

impl SqlitePostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 批量加载给定帖子的 hashtag 关联
    async fn load_hashtag_ids(
        &self,
        post_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<i64>>, RepositoryError> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        // 构建 IN 子句的占位符
        let placeholders: Vec<&str> = post_ids.iter().map(|_| "?").collect();
        let query = format!(
            "SELECT post_id, hashtag_id FROM post_hashtags WHERE post_id IN ({}) ORDER BY hashtag_id",
            placeholders.join(", ")
        );

        let mut sql_query = sqlx::query_as::<_, (i64, i64)>(&query);
        for id in post_ids {
            sql_query = sql_query.bind(id);
        }

        let rows = sql_query
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)?;

        let mut by_post: HashMap<i64, Vec<i64>> = HashMap::new();
        for (post_id, hashtag_id) in rows {
            by_post.entry(post_id).or_default().push(hashtag_id);
        }

        Ok(by_post)
    }

    /// 将帖子行列表组装为完整记录（附带 hashtag 关联）
    async fn assemble(&self, rows: Vec<PostRow>) -> Result<Vec<PostRecord>, RepositoryError> {
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut hashtags = self.load_hashtag_ids(&ids).await?;

        rows.into_iter()
            .map(|row| {
                let hashtag_ids = hashtags.remove(&row.id).unwrap_or_default();
                PostRecord::try_from_row(row, hashtag_ids)
            })
            .collect()
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    user_id: i64,
    text: String,
    time: String,
}

impl PostRecord {
    fn try_from_row(row: PostRow, hashtag_ids: Vec<i64>) -> Result<Self, RepositoryError> {
        Ok(PostRecord {
            id: row.id,
            user_id: row.user_id,
            text: row.text,
            time: parse_timestamp(&row.time)?,
            hashtag_ids,
        })
    }
}

/// 规范化关联集合：去重并排序
fn normalize_hashtag_ids(ids: &[i64]) -> Vec<i64> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[async_trait]
impl CrudPort<PostRecord, PostDraft> for SqlitePostRepository {
    async fn find_all(&self) -> Result<Vec<PostRecord>, RepositoryError> {
        let rows: Vec<PostRow> = sqlx::query_as(
            "SELECT id, user_id, text, time FROM posts ORDER BY time DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        self.assemble(rows).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PostRecord>, RepositoryError> {
        let row: Option<PostRow> =
            sqlx::query_as("SELECT id, user_id, text, time FROM posts WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_err)?;

        match row {
            Some(row) => {
                let hashtags = self.load_hashtag_ids(&[row.id]).await?;
                let hashtag_ids = hashtags.into_values().next().unwrap_or_default();
                Ok(Some(PostRecord::try_from_row(row, hashtag_ids)?))
            }
            None => Ok(None),
        }
    }

    async fn insert(&self, draft: &PostDraft) -> Result<PostRecord, RepositoryError> {
        let hashtag_ids = normalize_hashtag_ids(&draft.hashtag_ids);
        // 存储精度为微秒，返回值从存储文本解析以保持一致
        let time_text = format_timestamp(&draft.time);

        // 帖子和关联写入同一个事务
        let mut tx = self.pool.begin().await.map_err(map_db_err)?;

        let result = sqlx::query("INSERT INTO posts (user_id, text, time) VALUES (?, ?, ?)")
            .bind(draft.user_id)
            .bind(&draft.text)
            .bind(&time_text)
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;

        let post_id = result.last_insert_rowid();

        for hashtag_id in &hashtag_ids {
            sqlx::query("INSERT INTO post_hashtags (post_id, hashtag_id) VALUES (?, ?)")
                .bind(post_id)
                .bind(hashtag_id)
                .execute(&mut *tx)
                .await
                .map_err(map_db_err)?;
        }

        tx.commit().await.map_err(map_db_err)?;

        Ok(PostRecord {
            id: post_id,
            user_id: draft.user_id,
            text: draft.text.clone(),
            time: parse_timestamp(&time_text)?,
            hashtag_ids,
        })
    }

    async fn update(
        &self,
        id: i64,
        draft: &PostDraft,
    ) -> Result<Option<PostRecord>, RepositoryError> {
        let hashtag_ids = normalize_hashtag_ids(&draft.hashtag_ids);
        let time_text = format_timestamp(&draft.time);

        let mut tx = self.pool.begin().await.map_err(map_db_err)?;

        let result = sqlx::query("UPDATE posts SET user_id = ?, text = ?, time = ? WHERE id = ?")
            .bind(draft.user_id)
            .bind(&draft.text)
            .bind(&time_text)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        // 关联整体替换
        sqlx::query("DELETE FROM post_hashtags WHERE post_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;

        for hashtag_id in &hashtag_ids {
            sqlx::query("INSERT INTO post_hashtags (post_id, hashtag_id) VALUES (?, ?)")
                .bind(id)
                .bind(hashtag_id)
                .execute(&mut *tx)
                .await
                .map_err(map_db_err)?;
        }

        tx.commit().await.map_err(map_db_err)?;

        Ok(Some(PostRecord {
            id,
            user_id: draft.user_id,
            text: draft.text.clone(),
            time: parse_timestamp(&time_text)?,
            hashtag_ids,
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        // post_hashtags 通过 ON DELETE CASCADE 一并清理
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PostRepositoryPort for SqlitePostRepository {
    async fn find_by_hashtag(&self, hashtag_id: i64) -> Result<Vec<PostRecord>, RepositoryError> {
        let rows: Vec<PostRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.user_id, p.text, p.time
            FROM posts p
            JOIN post_hashtags ph ON ph.post_id = p.id
            WHERE ph.hashtag_id = ?
            ORDER BY p.time DESC, p.id DESC
            "#,
        )
        .bind(hashtag_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        self.assemble(rows).await
    }

    async fn find_by_hashtags_any(
        &self,
        hashtag_ids: &[i64],
    ) -> Result<Vec<PostRecord>, RepositoryError> {
        if hashtag_ids.is_empty() {
            return Ok(Vec::new());
        }

        // 并集语义：命中任意一个 hashtag 即可，DISTINCT 去重
        let placeholders: Vec<&str> = hashtag_ids.iter().map(|_| "?").collect();
        let query = format!(
            r#"
            SELECT DISTINCT p.id, p.user_id, p.text, p.time
            FROM posts p
            JOIN post_hashtags ph ON ph.post_id = p.id
            WHERE ph.hashtag_id IN ({})
            ORDER BY p.time DESC, p.id DESC
            "#,
            placeholders.join(", ")
        );

        let mut sql_query = sqlx::query_as::<_, PostRow>(&query);
        for id in hashtag_ids {
            sql_query = sql_query.bind(id);
        }

        let rows = sql_query
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)?;

        self.assemble(rows).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{HashtagDraft, UserDraft};
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteHashtagRepository, SqliteUserRepository,
    };
    use chrono::{Duration, Utc};

    struct Fixture {
        posts: SqlitePostRepository,
        user_id: i64,
        tag_ids: Vec<i64>,
    }

    async fn setup(tag_count: usize) -> Fixture {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let users = SqliteUserRepository::new(pool.clone());
        let user_id = users
            .insert(&UserDraft {
                username: "alice".to_string(),
            })
            .await
            .unwrap()
            .id;

        let hashtags = SqliteHashtagRepository::new(pool.clone());
        let mut tag_ids = Vec::new();
        for i in 0..tag_count {
            let tag = hashtags
                .insert(&HashtagDraft {
                    name: format!("tag{}", i),
                })
                .await
                .unwrap();
            tag_ids.push(tag.id);
        }

        Fixture {
            posts: SqlitePostRepository::new(pool),
            user_id,
            tag_ids,
        }
    }

    fn draft(fx: &Fixture, text: &str, time: chrono::DateTime<Utc>, tags: &[i64]) -> PostDraft {
        PostDraft {
            user_id: fx.user_id,
            text: text.to_string(),
            time,
            hashtag_ids: tags.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_insert_then_find_round_trip() {
        let fx = setup(2).await;

        let created = fx
            .posts
            .insert(&draft(&fx, "hello", Utc::now(), &fx.tag_ids))
            .await
            .unwrap();

        let found = fx.posts.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.hashtag_ids, fx.tag_ids);
    }

    #[tokio::test]
    async fn test_find_all_newest_first() {
        let fx = setup(0).await;
        let base = Utc::now();

        fx.posts
            .insert(&draft(&fx, "oldest", base - Duration::seconds(2), &[]))
            .await
            .unwrap();
        fx.posts
            .insert(&draft(&fx, "newest", base, &[]))
            .await
            .unwrap();
        fx.posts
            .insert(&draft(&fx, "middle", base - Duration::seconds(1), &[]))
            .await
            .unwrap();

        let all = fx.posts.find_all().await.unwrap();
        let texts: Vec<&str> = all.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, ["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn test_equal_timestamps_break_ties_by_id_desc() {
        let fx = setup(0).await;
        let time = Utc::now();

        let first = fx.posts.insert(&draft(&fx, "a", time, &[])).await.unwrap();
        let second = fx.posts.insert(&draft(&fx, "b", time, &[])).await.unwrap();

        let all = fx.posts.find_all().await.unwrap();
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[tokio::test]
    async fn test_find_by_hashtag() {
        let fx = setup(2).await;
        let now = Utc::now();

        let tagged = fx
            .posts
            .insert(&draft(&fx, "tagged", now, &fx.tag_ids[..1]))
            .await
            .unwrap();
        fx.posts
            .insert(&draft(&fx, "untagged", now, &[]))
            .await
            .unwrap();

        let result = fx.posts.find_by_hashtag(fx.tag_ids[0]).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, tagged.id);

        let result = fx.posts.find_by_hashtag(fx.tag_ids[1]).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_hashtags_any_is_distinct_union() {
        let fx = setup(3).await;
        let now = Utc::now();

        // 同时带 tag0 和 tag1 的帖子在并集中只能出现一次
        let both = fx
            .posts
            .insert(&draft(&fx, "both", now, &fx.tag_ids[..2]))
            .await
            .unwrap();
        let only_second = fx
            .posts
            .insert(&draft(
                &fx,
                "only-tag1",
                now - Duration::seconds(1),
                &fx.tag_ids[1..2],
            ))
            .await
            .unwrap();
        fx.posts
            .insert(&draft(&fx, "only-tag2", now, &fx.tag_ids[2..3]))
            .await
            .unwrap();

        let result = fx
            .posts
            .find_by_hashtags_any(&fx.tag_ids[..2])
            .await
            .unwrap();

        let ids: Vec<i64> = result.iter().map(|p| p.id).collect();
        assert_eq!(ids, [both.id, only_second.id]);
    }

    #[tokio::test]
    async fn test_update_replaces_hashtags() {
        let fx = setup(2).await;
        let now = Utc::now();

        let created = fx
            .posts
            .insert(&draft(&fx, "hello", now, &fx.tag_ids[..1]))
            .await
            .unwrap();

        let updated = fx
            .posts
            .update(created.id, &draft(&fx, "edited", now, &fx.tag_ids[1..2]))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.text, "edited");
        assert_eq!(updated.hashtag_ids, fx.tag_ids[1..2].to_vec());

        let found = fx.posts.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, updated);
    }

    #[tokio::test]
    async fn test_delete_cascades_associations() {
        let fx = setup(1).await;

        let created = fx
            .posts
            .insert(&draft(&fx, "hello", Utc::now(), &fx.tag_ids))
            .await
            .unwrap();

        assert!(fx.posts.delete(created.id).await.unwrap());
        assert!(fx.posts.find_by_id(created.id).await.unwrap().is_none());

        let result = fx.posts.find_by_hashtag(fx.tag_ids[0]).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_insert_with_unknown_user_is_constraint_violation() {
        let fx = setup(0).await;

        let result = fx
            .posts
            .insert(&PostDraft {
                user_id: 999,
                text: "orphan".to_string(),
                time: Utc::now(),
                hashtag_ids: vec![],
            })
            .await;

        assert!(matches!(
            result,
            Err(RepositoryError::ConstraintViolation(_))
        ));
    }
}

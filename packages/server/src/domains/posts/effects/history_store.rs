use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::common::{PostId, ProjectId};
use crate::domains::posts::models::PostHistory;
use crate::kernel::BaseHistoryStore;

/// Postgres-backed history store. Snapshots are append-only; the only
/// deletion path is the draft-cycle cleanup after a publish.
pub struct PostgresHistoryStore {
    pool: PgPool,
}

impl PostgresHistoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseHistoryStore for PostgresHistoryStore {
    async fn create_history(&self, project_id: ProjectId, snapshot: &PostHistory) -> Result<()> {
        sqlx::query(
            "INSERT INTO post_history (\
                id, post_id, project_id, title, slug, meta_description, categories, \
                content, author, pub_date, draft_content, draft_author, draft_pub_date, \
                is_published, edited_by, created_at\
             ) VALUES (\
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16\
             )",
        )
        .bind(snapshot.id)
        .bind(snapshot.post_id)
        .bind(project_id)
        .bind(&snapshot.title)
        .bind(&snapshot.slug)
        .bind(&snapshot.meta_description)
        .bind(&snapshot.categories)
        .bind(&snapshot.content)
        .bind(&snapshot.author)
        .bind(snapshot.pub_date)
        .bind(&snapshot.draft_content)
        .bind(&snapshot.draft_author)
        .bind(snapshot.draft_pub_date)
        .bind(snapshot.is_published)
        .bind(snapshot.edited_by)
        .bind(snapshot.created_at)
        .execute(&self.pool)
        .await?;

        debug!(post_id = %snapshot.post_id, history_id = %snapshot.id, "Created history snapshot");
        Ok(())
    }

    async fn delete_draft_history(&self, project_id: ProjectId, post_id: PostId) -> Result<()> {
        // Draft-cycle snapshots are the ones taken before the post was ever
        // published; published-era history survives.
        let result = sqlx::query(
            "DELETE FROM post_history \
             WHERE project_id = $1 AND post_id = $2 AND is_published = FALSE",
        )
        .bind(project_id)
        .bind(post_id)
        .execute(&self.pool)
        .await?;

        debug!(
            post_id = %post_id,
            deleted = result.rows_affected(),
            "Deleted draft history"
        );
        Ok(())
    }
}

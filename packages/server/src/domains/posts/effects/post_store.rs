use anyhow::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::debug;

use crate::common::ProjectId;
use crate::domains::posts::events::PostEvent;
use crate::domains::posts::models::{Post, ProjectSettings};
use crate::kernel::BasePostStore;

/// Postgres-backed post store.
///
/// Queries are runtime-bound; the `(project_id, slug)` unique index is the
/// final arbiter for slug collisions that slip past the optimistic check.
pub struct PostgresPostStore {
    pool: PgPool,
}

impl PostgresPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BasePostStore for PostgresPostStore {
    async fn get_settings(&self, project_id: ProjectId) -> Result<ProjectSettings> {
        let row = sqlx::query(
            "SELECT teaser_mode, teaser_truncation_mode, teaser_truncation_length, \
             force_lowercase_categories, language_code \
             FROM project_settings WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            // Projects that never touched their settings have no row
            return Ok(ProjectSettings::defaults_for(project_id));
        };

        Ok(ProjectSettings {
            project_id,
            teaser_mode: row.get::<String, _>("teaser_mode").parse()?,
            teaser_truncation_mode: row.get::<String, _>("teaser_truncation_mode").parse()?,
            teaser_truncation_length: row.get("teaser_truncation_length"),
            force_lowercase_categories: row.get("force_lowercase_categories"),
            language_code: row.get("language_code"),
        })
    }

    async fn slug_is_available(&self, project_id: ProjectId, slug: &str) -> Result<bool> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM posts WHERE project_id = $1 AND slug = $2)",
        )
        .bind(project_id)
        .bind(slug)
        .fetch_one(&self.pool)
        .await?;

        Ok(!taken)
    }

    async fn create(&self, post: &Post) -> Result<()> {
        sqlx::query(
            "INSERT INTO posts (\
                id, project_id, title, slug, meta_description, categories, \
                content, author, pub_date, draft_content, draft_author, draft_pub_date, \
                is_published, auto_teaser, teaser_override, suppress_teaser, \
                correlation_key, image_url, thumbnail_url, is_featured, content_type, \
                created_by, last_modified_by, last_modified, created_at\
             ) VALUES (\
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, \
                $16, $17, $18, $19, $20, $21, $22, $23, $24, $25\
             )",
        )
        .bind(post.id)
        .bind(post.project_id)
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.meta_description)
        .bind(&post.categories)
        .bind(&post.content)
        .bind(&post.author)
        .bind(post.pub_date)
        .bind(&post.draft_content)
        .bind(&post.draft_author)
        .bind(post.draft_pub_date)
        .bind(post.is_published)
        .bind(&post.auto_teaser)
        .bind(post.teaser_override)
        .bind(post.suppress_teaser)
        .bind(&post.correlation_key)
        .bind(&post.image_url)
        .bind(&post.thumbnail_url)
        .bind(post.is_featured)
        .bind(&post.content_type)
        .bind(post.created_by)
        .bind(post.last_modified_by)
        .bind(post.last_modified)
        .bind(post.created_at)
        .execute(&self.pool)
        .await?;

        debug!(post_id = %post.id, slug = %post.slug, "Created post");
        Ok(())
    }

    async fn update(&self, post: &Post) -> Result<()> {
        sqlx::query(
            "UPDATE posts SET \
                title = $2, slug = $3, meta_description = $4, categories = $5, \
                content = $6, author = $7, pub_date = $8, \
                draft_content = $9, draft_author = $10, draft_pub_date = $11, \
                is_published = $12, auto_teaser = $13, teaser_override = $14, \
                suppress_teaser = $15, correlation_key = $16, image_url = $17, \
                thumbnail_url = $18, is_featured = $19, content_type = $20, \
                last_modified_by = $21, last_modified = $22 \
             WHERE id = $1",
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.meta_description)
        .bind(&post.categories)
        .bind(&post.content)
        .bind(&post.author)
        .bind(post.pub_date)
        .bind(&post.draft_content)
        .bind(&post.draft_author)
        .bind(post.draft_pub_date)
        .bind(post.is_published)
        .bind(&post.auto_teaser)
        .bind(post.teaser_override)
        .bind(post.suppress_teaser)
        .bind(&post.correlation_key)
        .bind(&post.image_url)
        .bind(&post.thumbnail_url)
        .bind(post.is_featured)
        .bind(&post.content_type)
        .bind(post.last_modified_by)
        .bind(post.last_modified)
        .execute(&self.pool)
        .await?;

        debug!(post_id = %post.id, slug = %post.slug, "Updated post");
        Ok(())
    }

    async fn fire_publish_event(&self, post: &Post) -> Result<()> {
        let event = PostEvent::published(post);
        let payload = serde_json::to_string(&event)?;

        sqlx::query("SELECT pg_notify($1, $2)")
            .bind(event.channel())
            .bind(payload)
            .execute(&self.pool)
            .await?;

        debug!(post_id = %post.id, channel = event.channel(), "Fired publish event");
        Ok(())
    }
}

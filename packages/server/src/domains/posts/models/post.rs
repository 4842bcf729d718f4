use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::utils::normalize_slug;
use crate::common::{MemberId, PostId, ProjectId};

/// Post - a blog document with published/draft duality.
///
/// The published body (`content`/`author`/`pub_date`) is what readers see;
/// the draft fields hold pending edits until a publish transition promotes
/// them. `auto_teaser` is a derived cache, never authoritative.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: PostId,
    pub project_id: ProjectId,

    // Identity within the project
    pub title: String,
    pub slug: String,
    pub meta_description: Option<String>,
    pub categories: Vec<String>,

    // Published body
    pub content: String,
    pub author: String,
    pub pub_date: Option<DateTime<Utc>>,

    // Pending draft body
    pub draft_content: String,
    pub draft_author: String,
    pub draft_pub_date: Option<DateTime<Utc>>,

    pub is_published: bool,

    // Derived teaser cache
    pub auto_teaser: Option<String>,
    pub teaser_override: bool,
    pub suppress_teaser: bool,

    // Passthrough presentation fields
    pub correlation_key: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub is_featured: bool,
    pub content_type: String, // 'markdown', 'html'

    // Audit
    pub created_by: MemberId,
    pub last_modified_by: MemberId,
    pub last_modified: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Synthesize a brand-new post shell for a first-time save.
    ///
    /// Only identity fields are seeded here; everything else is merged in by
    /// the save pipeline. The slug is derived from the title and may be
    /// replaced by an author-supplied slug during the same save.
    pub fn new_shell(
        project_id: ProjectId,
        title: &str,
        meta_description: Option<String>,
        created_by: MemberId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: PostId::new(),
            project_id,
            title: title.to_string(),
            slug: normalize_slug(title),
            meta_description,
            categories: Vec::new(),
            content: String::new(),
            author: String::new(),
            pub_date: None,
            draft_content: String::new(),
            draft_author: String::new(),
            draft_pub_date: None,
            is_published: false,
            auto_teaser: None,
            teaser_override: false,
            suppress_teaser: false,
            correlation_key: None,
            image_url: None,
            thumbnail_url: None,
            is_featured: false,
            content_type: ContentType::Markdown.to_string(),
            created_by,
            last_modified_by: created_by,
            last_modified: now,
            created_at: now,
        }
    }

    /// Whether the published body should go through the markdown renderer.
    pub fn renders_markdown(&self) -> bool {
        matches!(self.content_type.parse(), Ok(ContentType::Markdown))
    }
}

// =============================================================================
// Enums for type-safe content handling
// =============================================================================

/// Body content type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Markdown,
    Html,
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::Markdown => write!(f, "markdown"),
            ContentType::Html => write!(f, "html"),
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "markdown" => Ok(ContentType::Markdown),
            "html" => Ok(ContentType::Html),
            _ => Err(anyhow::anyhow!("Invalid content type: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_shell_derives_slug_from_title() {
        let post = Post::new_shell(
            ProjectId::new(),
            "Hello World",
            None,
            MemberId::new(),
        );
        assert_eq!(post.slug, "hello-world");
        assert!(!post.is_published);
        assert!(post.pub_date.is_none());
    }

    #[test]
    fn test_new_shell_defaults_to_markdown() {
        let post = Post::new_shell(ProjectId::new(), "T", None, MemberId::new());
        assert!(post.renders_markdown());
    }
}

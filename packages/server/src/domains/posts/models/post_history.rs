use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{MemberId, PostHistoryId, PostId, ProjectId};

use super::post::Post;

/// PostHistory - an immutable pre-mutation snapshot of a post's editable
/// fields, captured for recovery/undo.
///
/// Snapshots are created only through [`PostHistory::snapshot_of`], from an
/// existing post immediately before it is mutated, and never changed after
/// construction. A brand-new post has no prior state and gets no snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostHistory {
    pub id: PostHistoryId,
    pub post_id: PostId,
    pub project_id: ProjectId,

    pub title: String,
    pub slug: String,
    pub meta_description: Option<String>,
    pub categories: Vec<String>,
    pub content: String,
    pub author: String,
    pub pub_date: Option<DateTime<Utc>>,
    pub draft_content: String,
    pub draft_author: String,
    pub draft_pub_date: Option<DateTime<Utc>>,
    pub is_published: bool,

    pub edited_by: MemberId,
    pub created_at: DateTime<Utc>,
}

impl PostHistory {
    /// Capture a point-in-time copy of `post` before it is mutated.
    pub fn snapshot_of(post: &Post, edited_by: MemberId) -> Self {
        Self {
            id: PostHistoryId::new(),
            post_id: post.id,
            project_id: post.project_id,
            title: post.title.clone(),
            slug: post.slug.clone(),
            meta_description: post.meta_description.clone(),
            categories: post.categories.clone(),
            content: post.content.clone(),
            author: post.author.clone(),
            pub_date: post.pub_date,
            draft_content: post.draft_content.clone(),
            draft_author: post.draft_author.clone(),
            draft_pub_date: post.draft_pub_date,
            is_published: post.is_published,
            edited_by,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_copies_editable_fields() {
        let mut post = Post::new_shell(ProjectId::new(), "Original", None, MemberId::new());
        post.content = "published body".to_string();
        post.draft_content = "pending body".to_string();

        let editor = MemberId::new();
        let snapshot = PostHistory::snapshot_of(&post, editor);

        assert_eq!(snapshot.post_id, post.id);
        assert_eq!(snapshot.title, "Original");
        assert_eq!(snapshot.content, "published body");
        assert_eq!(snapshot.draft_content, "pending body");
        assert_eq!(snapshot.edited_by, editor);
    }

    #[test]
    fn test_snapshot_is_detached_from_later_mutation() {
        let mut post = Post::new_shell(ProjectId::new(), "Before", None, MemberId::new());
        let snapshot = PostHistory::snapshot_of(&post, MemberId::new());

        post.title = "After".to_string();

        assert_eq!(snapshot.title, "Before");
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{PostId, ProjectId};
use crate::domains::posts::models::Post;

/// Posts domain events.
///
/// Emitted after persistence has committed; consumers (feed rebuilds, cache
/// invalidation, webmentions) subscribe out of process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PostEvent {
    /// A post transitioned to public visibility.
    PostPublished {
        post_id: PostId,
        project_id: ProjectId,
        slug: String,
        title: String,
        pub_date: DateTime<Utc>,
    },
}

impl PostEvent {
    /// Build the publish notification payload for a post that just went live.
    ///
    /// Callers must only invoke this after the PublishNow transition, when
    /// `pub_date` is guaranteed to be set.
    pub fn published(post: &Post) -> Self {
        PostEvent::PostPublished {
            post_id: post.id,
            project_id: post.project_id,
            slug: post.slug.clone(),
            title: post.title.clone(),
            pub_date: post.pub_date.unwrap_or_else(Utc::now),
        }
    }

    /// Notification channel this event is delivered on.
    pub fn channel(&self) -> &'static str {
        match self {
            PostEvent::PostPublished { .. } => "post_published",
        }
    }
}

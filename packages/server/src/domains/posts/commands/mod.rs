use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::domains::posts::models::ContentType;

/// The three-way author intent for a save.
///
/// This is a closed set: adding a mode means extending the transition match
/// in `actions::save_post`, not plugging in a strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SaveMode {
    /// Stash the edit in the draft fields; the live post is untouched.
    SaveDraft,
    /// Stash the edit as a draft with a scheduled publication time.
    PublishLater,
    /// Promote the edit to the live body immediately.
    PublishNow,
}

/// Per-request edit payload assembled by the transport layer.
///
/// Raw author input: the slug is unvalidated, `categories_raw` is a single
/// comma-delimited string, and `new_pub_date` is in the author's local time.
/// Ephemeral - never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct EditPostCommand {
    pub title: String,
    pub save_mode: SaveMode,
    pub content: String,
    pub author: String,

    #[builder(default)]
    pub slug: Option<String>,
    #[builder(default)]
    pub meta_description: Option<String>,
    #[builder(default)]
    pub categories_raw: String,

    /// Scheduled publication time in the author's local time zone;
    /// only meaningful for `SaveMode::PublishLater`.
    #[builder(default)]
    pub new_pub_date: Option<NaiveDateTime>,

    // Passthrough fields copied verbatim during the merge step
    #[builder(default)]
    pub correlation_key: Option<String>,
    #[builder(default)]
    pub image_url: Option<String>,
    #[builder(default)]
    pub thumbnail_url: Option<String>,
    #[builder(default = false)]
    pub is_featured: bool,
    #[builder(default = ContentType::Markdown)]
    pub content_type: ContentType,
    #[builder(default = false)]
    pub teaser_override: bool,
    #[builder(default = false)]
    pub suppress_teaser: bool,
}

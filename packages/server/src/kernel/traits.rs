// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// The save pipeline (domains/posts/actions) composes them; production
// implementations live in domains/posts/effects, mocks in
// kernel/test_dependencies.
//
// Naming convention: Base* for trait names (e.g., BasePostStore)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

use crate::common::{PostId, ProjectId};
use crate::domains::posts::models::{Post, PostHistory, ProjectSettings, TruncationMode};

// =============================================================================
// Post Store Trait (Infrastructure - persistence + slug uniqueness)
// =============================================================================

#[async_trait]
pub trait BasePostStore: Send + Sync {
    /// Fetch the owning project's publishing policy.
    async fn get_settings(&self, project_id: ProjectId) -> Result<ProjectSettings>;

    /// Optimistic slug-availability check. The database unique constraint is
    /// the backstop for the read-then-decide race.
    async fn slug_is_available(&self, project_id: ProjectId, slug: &str) -> Result<bool>;

    /// Persist a brand-new post.
    async fn create(&self, post: &Post) -> Result<()>;

    /// Persist changes to an existing post.
    async fn update(&self, post: &Post) -> Result<()>;

    /// Announce that a post just transitioned to public visibility.
    async fn fire_publish_event(&self, post: &Post) -> Result<()>;
}

// =============================================================================
// History Store Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseHistoryStore: Send + Sync {
    /// Persist a pre-mutation snapshot.
    async fn create_history(&self, project_id: ProjectId, snapshot: &PostHistory) -> Result<()>;

    /// Remove pending draft-cycle snapshots once a draft has been published.
    async fn delete_draft_history(&self, project_id: ProjectId, post_id: PostId) -> Result<()>;
}

// =============================================================================
// Markdown Renderer Trait (Infrastructure - pure)
// =============================================================================

pub trait BaseMarkdownRenderer: Send + Sync {
    /// Render markdown to HTML. Stateless from the caller's viewpoint.
    fn to_html(&self, markdown: &str) -> String;
}

// =============================================================================
// Teaser Generator Trait (Infrastructure)
// =============================================================================

/// Everything the teaser capability needs for one derivation.
#[derive(Debug, Clone)]
pub struct TeaserRequest {
    pub truncation_mode: TruncationMode,
    pub truncation_length: i32,
    /// Rendered HTML of the published body.
    pub html: String,
    /// Fresh per-call key so downstream caches never serve a stale teaser.
    pub cache_key: Uuid,
    pub slug: String,
    pub language_code: String,
    pub log_warnings: bool,
}

/// A derived short excerpt of a post's rendered content.
#[derive(Debug, Clone)]
pub struct Teaser {
    pub content: String,
}

#[async_trait]
pub trait BaseTeaserGenerator: Send + Sync {
    /// Derive a teaser from rendered HTML under a truncation policy.
    async fn generate(&self, request: TeaserRequest) -> Result<Teaser>;
}

// =============================================================================
// Time Zone Resolver Trait (Infrastructure)
// =============================================================================

pub trait BaseTimeZoneResolver: Send + Sync {
    /// The time zone scheduled publication times are entered in.
    fn resolve_user_time_zone(&self) -> Tz;
}

/// Convert an author-local timestamp to UTC.
///
/// Ambiguous local times (clocks rolled back) resolve to the earliest valid
/// instant; returns `None` for local times skipped by a DST gap.
pub fn convert_to_utc(local: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_convert_to_utc_fixed_offset() {
        // Winter: America/Chicago is UTC-6
        let local = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let utc = convert_to_utc(local, chrono_tz::America::Chicago).unwrap();
        assert_eq!(utc.to_rfc3339(), "2025-01-15T18:00:00+00:00");
    }

    #[test]
    fn test_convert_to_utc_dst_gap_is_none() {
        // 2:30am on the spring-forward date does not exist in Chicago
        let local = NaiveDate::from_ymd_opt(2025, 3, 9)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        assert!(convert_to_utc(local, chrono_tz::America::Chicago).is_none());
    }

    #[test]
    fn test_convert_to_utc_ambiguous_takes_earliest() {
        // 1:30am on the fall-back date occurs twice; earliest is CDT (UTC-5)
        let local = NaiveDate::from_ymd_opt(2025, 11, 2)
            .unwrap()
            .and_hms_opt(1, 30, 0)
            .unwrap();
        let utc = convert_to_utc(local, chrono_tz::America::Chicago).unwrap();
        assert_eq!(utc.to_rfc3339(), "2025-11-02T06:30:00+00:00");
    }
}

//! Server dependencies for actions (using traits for testability)
//!
//! Central dependency container handed to the save pipeline. All external
//! capabilities sit behind trait abstractions so tests can inject mocks.

use std::sync::Arc;

use chrono_tz::Tz;
use sqlx::PgPool;

use crate::domains::posts::effects::{
    CmarkRenderer, PostgresHistoryStore, PostgresPostStore, TruncationTeaser,
};
use crate::kernel::messages::MessageCatalog;
use crate::kernel::{
    BaseHistoryStore, BaseMarkdownRenderer, BasePostStore, BaseTeaserGenerator,
    BaseTimeZoneResolver,
};

// =============================================================================
// Time zone resolver (config-driven)
// =============================================================================

/// Resolves every request to one configured time zone.
///
/// Per-member time zone preferences would slot in behind the same trait.
pub struct FixedTimeZoneResolver(Tz);

impl FixedTimeZoneResolver {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }
}

impl BaseTimeZoneResolver for FixedTimeZoneResolver {
    fn resolve_user_time_zone(&self) -> Tz {
        self.0
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Dependencies accessible to domain actions.
#[derive(Clone)]
pub struct ServerDeps {
    pub post_store: Arc<dyn BasePostStore>,
    pub history_store: Arc<dyn BaseHistoryStore>,
    pub markdown: Arc<dyn BaseMarkdownRenderer>,
    pub teaser: Arc<dyn BaseTeaserGenerator>,
    pub time_zones: Arc<dyn BaseTimeZoneResolver>,
    pub messages: Arc<MessageCatalog>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given capabilities.
    pub fn new(
        post_store: Arc<dyn BasePostStore>,
        history_store: Arc<dyn BaseHistoryStore>,
        markdown: Arc<dyn BaseMarkdownRenderer>,
        teaser: Arc<dyn BaseTeaserGenerator>,
        time_zones: Arc<dyn BaseTimeZoneResolver>,
    ) -> Self {
        Self {
            post_store,
            history_store,
            markdown,
            teaser,
            time_zones,
            messages: Arc::new(MessageCatalog::new()),
        }
    }

    /// Production wiring: Postgres stores plus the built-in renderer and
    /// truncation teaser.
    pub fn postgres(pool: PgPool, user_time_zone: Tz) -> Self {
        Self::new(
            Arc::new(PostgresPostStore::new(pool.clone())),
            Arc::new(PostgresHistoryStore::new(pool)),
            Arc::new(CmarkRenderer),
            Arc::new(TruncationTeaser),
            Arc::new(FixedTimeZoneResolver::new(user_time_zone)),
        )
    }
}

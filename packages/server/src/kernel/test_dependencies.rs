// TestDependencies - mock implementations for testing
//
// Provides spy/mock capabilities that can be injected into ServerDeps for
// tests, so the save pipeline can be exercised without a database.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::common::{PostId, ProjectId};
use crate::domains::posts::effects::CmarkRenderer;
use crate::domains::posts::events::PostEvent;
use crate::domains::posts::models::{Post, PostHistory, ProjectSettings};
use crate::kernel::deps::FixedTimeZoneResolver;
use crate::kernel::{
    BaseHistoryStore, BasePostStore, BaseTeaserGenerator, ServerDeps, Teaser, TeaserRequest,
};

// =============================================================================
// Mock Post Store
// =============================================================================

pub struct MockPostStore {
    settings: Mutex<Option<ProjectSettings>>,
    slug_available: Mutex<bool>,
    slug_checks: Mutex<Vec<String>>,
    created: Mutex<Vec<Post>>,
    updated: Mutex<Vec<Post>>,
    publish_events: Mutex<Vec<PostEvent>>,
    fail_create: Mutex<bool>,
    fail_update: Mutex<bool>,
}

impl MockPostStore {
    pub fn new() -> Self {
        Self {
            settings: Mutex::new(None),
            slug_available: Mutex::new(true),
            slug_checks: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            updated: Mutex::new(Vec::new()),
            publish_events: Mutex::new(Vec::new()),
            fail_create: Mutex::new(false),
            fail_update: Mutex::new(false),
        }
    }

    /// Use specific project settings instead of the defaults.
    pub fn with_settings(self, settings: ProjectSettings) -> Self {
        *self.settings.lock().unwrap() = Some(settings);
        self
    }

    /// Make every slug-availability check report a collision.
    pub fn with_slug_taken(self) -> Self {
        *self.slug_available.lock().unwrap() = false;
        self
    }

    /// Make `create` fail, to exercise the fault channel.
    pub fn with_create_failure(self) -> Self {
        *self.fail_create.lock().unwrap() = true;
        self
    }

    /// Make `update` fail, to exercise the fault channel.
    pub fn with_update_failure(self) -> Self {
        *self.fail_update.lock().unwrap() = true;
        self
    }

    /// All slugs that were checked for availability.
    pub fn slug_checks(&self) -> Vec<String> {
        self.slug_checks.lock().unwrap().clone()
    }

    /// All posts passed to `create`.
    pub fn created_posts(&self) -> Vec<Post> {
        self.created.lock().unwrap().clone()
    }

    /// All posts passed to `update`.
    pub fn updated_posts(&self) -> Vec<Post> {
        self.updated.lock().unwrap().clone()
    }

    /// Total persistence calls (create + update).
    pub fn persist_count(&self) -> usize {
        self.created.lock().unwrap().len() + self.updated.lock().unwrap().len()
    }

    /// All publish events that were fired.
    pub fn publish_events(&self) -> Vec<PostEvent> {
        self.publish_events.lock().unwrap().clone()
    }
}

impl Default for MockPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePostStore for MockPostStore {
    async fn get_settings(&self, project_id: ProjectId) -> Result<ProjectSettings> {
        Ok(self
            .settings
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| ProjectSettings::defaults_for(project_id)))
    }

    async fn slug_is_available(&self, _project_id: ProjectId, slug: &str) -> Result<bool> {
        self.slug_checks.lock().unwrap().push(slug.to_string());
        Ok(*self.slug_available.lock().unwrap())
    }

    async fn create(&self, post: &Post) -> Result<()> {
        if *self.fail_create.lock().unwrap() {
            anyhow::bail!("mock create failure");
        }
        self.created.lock().unwrap().push(post.clone());
        Ok(())
    }

    async fn update(&self, post: &Post) -> Result<()> {
        if *self.fail_update.lock().unwrap() {
            anyhow::bail!("mock update failure");
        }
        self.updated.lock().unwrap().push(post.clone());
        Ok(())
    }

    async fn fire_publish_event(&self, post: &Post) -> Result<()> {
        self.publish_events
            .lock()
            .unwrap()
            .push(PostEvent::published(post));
        Ok(())
    }
}

// =============================================================================
// Mock History Store
// =============================================================================

pub struct MockHistoryStore {
    snapshots: Mutex<Vec<PostHistory>>,
    deleted_drafts: Mutex<Vec<(ProjectId, PostId)>>,
}

impl MockHistoryStore {
    pub fn new() -> Self {
        Self {
            snapshots: Mutex::new(Vec::new()),
            deleted_drafts: Mutex::new(Vec::new()),
        }
    }

    /// All snapshots that were persisted.
    pub fn snapshots(&self) -> Vec<PostHistory> {
        self.snapshots.lock().unwrap().clone()
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.lock().unwrap().len()
    }

    /// All (project, post) pairs whose draft history was deleted.
    pub fn deleted_drafts(&self) -> Vec<(ProjectId, PostId)> {
        self.deleted_drafts.lock().unwrap().clone()
    }
}

impl Default for MockHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseHistoryStore for MockHistoryStore {
    async fn create_history(&self, _project_id: ProjectId, snapshot: &PostHistory) -> Result<()> {
        self.snapshots.lock().unwrap().push(snapshot.clone());
        Ok(())
    }

    async fn delete_draft_history(&self, project_id: ProjectId, post_id: PostId) -> Result<()> {
        self.deleted_drafts
            .lock()
            .unwrap()
            .push((project_id, post_id));
        Ok(())
    }
}

// =============================================================================
// Mock Teaser Generator
// =============================================================================

pub struct MockTeaserGenerator {
    response: Mutex<Option<String>>,
    requests: Mutex<Vec<TeaserRequest>>,
}

impl MockTeaserGenerator {
    pub fn new() -> Self {
        Self {
            response: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Return a fixed teaser instead of the default echo.
    pub fn with_content(self, content: impl Into<String>) -> Self {
        *self.response.lock().unwrap() = Some(content.into());
        self
    }

    /// All requests the pipeline made.
    pub fn requests(&self) -> Vec<TeaserRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for MockTeaserGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseTeaserGenerator for MockTeaserGenerator {
    async fn generate(&self, request: TeaserRequest) -> Result<Teaser> {
        let content = self
            .response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| format!("teaser:{}", request.html));
        self.requests.lock().unwrap().push(request);
        Ok(Teaser { content })
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub post_store: Arc<MockPostStore>,
    pub history_store: Arc<MockHistoryStore>,
    pub teaser: Arc<MockTeaserGenerator>,
    pub time_zone: chrono_tz::Tz,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            post_store: Arc::new(MockPostStore::new()),
            history_store: Arc::new(MockHistoryStore::new()),
            teaser: Arc::new(MockTeaserGenerator::new()),
            time_zone: chrono_tz::America::Chicago,
        }
    }

    /// Set a mock post store
    pub fn mock_post_store(mut self, store: MockPostStore) -> Self {
        self.post_store = Arc::new(store);
        self
    }

    /// Set a mock history store
    pub fn mock_history_store(mut self, store: MockHistoryStore) -> Self {
        self.history_store = Arc::new(store);
        self
    }

    /// Set a mock teaser generator
    pub fn mock_teaser(mut self, teaser: MockTeaserGenerator) -> Self {
        self.teaser = Arc::new(teaser);
        self
    }

    /// Set the resolved user time zone
    pub fn user_time_zone(mut self, tz: chrono_tz::Tz) -> Self {
        self.time_zone = tz;
        self
    }

    /// Convert into ServerDeps for the code under test. The mock Arcs stay
    /// shared, so spies remain readable after the call.
    pub fn into_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.post_store.clone(),
            self.history_store.clone(),
            Arc::new(CmarkRenderer),
            self.teaser.clone(),
            Arc::new(FixedTimeZoneResolver::new(self.time_zone)),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

//! Orchestration tests for the post save pipeline, driven through mocks.

use chrono::{Duration, NaiveDate, Utc};
use tokio_util::sync::CancellationToken;

use server_core::common::{MemberId, ProjectId};
use server_core::domains::posts::actions::save_post;
use server_core::domains::posts::commands::{EditPostCommand, SaveMode};
use server_core::domains::posts::events::PostEvent;
use server_core::domains::posts::models::{Post, ProjectSettings, TeaserMode};
use server_core::kernel::test_dependencies::{MockPostStore, MockTeaserGenerator};
use server_core::kernel::TestDependencies;

fn edit(save_mode: SaveMode) -> EditPostCommand {
    EditPostCommand::builder()
        .title("Hello World")
        .save_mode(save_mode)
        .content("body")
        .author("Alice")
        .build()
}

/// An already-published post as it would come back from the store.
fn published_post(project_id: ProjectId) -> Post {
    let mut post = Post::new_shell(project_id, "Existing Title", None, MemberId::new());
    post.content = "old body".to_string();
    post.author = "Bob".to_string();
    post.pub_date = Some(Utc::now() - Duration::days(30));
    post.is_published = true;
    post
}

#[tokio::test]
async fn publish_now_on_new_post_goes_live() {
    let deps = TestDependencies::new();
    let project_id = ProjectId::new();

    let result = save_post(
        edit(SaveMode::PublishNow),
        project_id,
        MemberId::new(),
        None,
        &deps.into_deps(),
        &CancellationToken::new(),
    )
    .await;

    assert!(result.succeeded);
    let post = result.value.expect("post returned");
    assert_eq!(post.slug, "hello-world");
    assert!(post.is_published);
    assert_eq!(post.content, "body");
    assert_eq!(post.author, "Alice");

    let pub_date = post.pub_date.expect("pub date set");
    assert!((Utc::now() - pub_date).num_seconds().abs() < 5);

    // Persisted via create, announced exactly once, no history for a new post
    assert_eq!(deps.post_store.created_posts().len(), 1);
    assert_eq!(deps.post_store.updated_posts().len(), 0);
    assert_eq!(deps.post_store.publish_events().len(), 1);
    assert_eq!(deps.history_store.snapshot_count(), 0);

    let events = deps.post_store.publish_events();
    let PostEvent::PostPublished { slug, .. } = &events[0];
    assert_eq!(slug, "hello-world");
}

#[tokio::test]
async fn save_draft_leaves_live_body_untouched() {
    let deps = TestDependencies::new();
    let project_id = ProjectId::new();
    let existing = published_post(project_id);

    let result = save_post(
        edit(SaveMode::SaveDraft),
        project_id,
        MemberId::new(),
        Some(existing.clone()),
        &deps.into_deps(),
        &CancellationToken::new(),
    )
    .await;

    assert!(result.succeeded);
    let post = result.value.unwrap();
    assert_eq!(post.draft_content, "body");
    assert_eq!(post.draft_author, "Alice");
    assert_eq!(post.content, "old body");
    assert_eq!(post.author, "Bob");
    assert_eq!(post.pub_date, existing.pub_date);
    assert!(post.is_published);

    assert!(deps.post_store.publish_events().is_empty());
    assert_eq!(deps.post_store.updated_posts().len(), 1);
}

#[tokio::test]
async fn save_draft_on_new_post_never_publishes() {
    let deps = TestDependencies::new();

    let result = save_post(
        edit(SaveMode::SaveDraft),
        ProjectId::new(),
        MemberId::new(),
        None,
        &deps.into_deps(),
        &CancellationToken::new(),
    )
    .await;

    let post = result.value.unwrap();
    assert!(!post.is_published);
    assert!(post.pub_date.is_none());
    assert!(deps.post_store.publish_events().is_empty());
}

#[tokio::test]
async fn publish_later_schedules_in_utc_and_keeps_live_post() {
    let deps = TestDependencies::new(); // resolves America/Chicago
    let project_id = ProjectId::new();
    let existing = published_post(project_id);

    let local = NaiveDate::from_ymd_opt(2030, 6, 15)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    let command = EditPostCommand::builder()
        .title("Existing Title")
        .save_mode(SaveMode::PublishLater)
        .content("body")
        .author("Alice")
        .new_pub_date(Some(local))
        .build();

    let result = save_post(
        command,
        project_id,
        MemberId::new(),
        Some(existing.clone()),
        &deps.into_deps(),
        &CancellationToken::new(),
    )
    .await;

    assert!(result.succeeded);
    let post = result.value.unwrap();

    // Summer in Chicago is UTC-5
    let scheduled = post.draft_pub_date.expect("scheduled date set");
    assert_eq!(scheduled.to_rfc3339(), "2030-06-15T15:00:00+00:00");

    // The live side is untouched: already-published posts stay published
    assert!(post.is_published);
    assert_eq!(post.pub_date, existing.pub_date);
    assert_eq!(post.content, "old body");
    assert!(deps.post_store.publish_events().is_empty());
}

#[tokio::test]
async fn publish_later_on_unpublished_post_forces_unpublished() {
    let deps = TestDependencies::new();
    let project_id = ProjectId::new();
    let mut existing = published_post(project_id);
    existing.pub_date = None;
    existing.is_published = true; // inconsistent prior state gets corrected

    let result = save_post(
        edit(SaveMode::PublishLater),
        project_id,
        MemberId::new(),
        Some(existing),
        &deps.into_deps(),
        &CancellationToken::new(),
    )
    .await;

    let post = result.value.unwrap();
    assert!(!post.is_published);
}

#[tokio::test]
async fn publish_now_pulls_future_pub_date_back_to_now() {
    let deps = TestDependencies::new();
    let project_id = ProjectId::new();
    let mut existing = published_post(project_id);
    existing.pub_date = Some(Utc::now() + Duration::days(7));

    let result = save_post(
        edit(SaveMode::PublishNow),
        project_id,
        MemberId::new(),
        Some(existing),
        &deps.into_deps(),
        &CancellationToken::new(),
    )
    .await;

    let post = result.value.unwrap();
    let pub_date = post.pub_date.unwrap();
    assert!((Utc::now() - pub_date).num_seconds().abs() < 5);
}

#[tokio::test]
async fn publish_now_keeps_past_pub_date() {
    let deps = TestDependencies::new();
    let project_id = ProjectId::new();
    let existing = published_post(project_id);
    let original_date = existing.pub_date;

    let result = save_post(
        edit(SaveMode::PublishNow),
        project_id,
        MemberId::new(),
        Some(existing),
        &deps.into_deps(),
        &CancellationToken::new(),
    )
    .await;

    assert_eq!(result.value.unwrap().pub_date, original_date);
}

#[tokio::test]
async fn publish_now_clears_draft_fields_and_draft_history() {
    let deps = TestDependencies::new();
    let project_id = ProjectId::new();
    let mut existing = published_post(project_id);
    existing.draft_content = "pending draft".to_string();
    existing.draft_author = "Carol".to_string();
    existing.draft_pub_date = Some(Utc::now() + Duration::days(3));
    let post_id = existing.id;

    let result = save_post(
        edit(SaveMode::PublishNow),
        project_id,
        MemberId::new(),
        Some(existing),
        &deps.into_deps(),
        &CancellationToken::new(),
    )
    .await;

    let post = result.value.unwrap();
    assert!(post.draft_content.is_empty());
    assert!(post.draft_author.is_empty());
    assert!(post.draft_pub_date.is_none());

    assert_eq!(deps.history_store.deleted_drafts(), vec![(project_id, post_id)]);
}

#[tokio::test]
async fn existing_post_gets_exactly_one_snapshot_before_persist() {
    let deps = TestDependencies::new();
    let project_id = ProjectId::new();
    let existing = published_post(project_id);

    save_post(
        edit(SaveMode::SaveDraft),
        project_id,
        MemberId::new(),
        Some(existing.clone()),
        &deps.into_deps(),
        &CancellationToken::new(),
    )
    .await;

    assert_eq!(deps.history_store.snapshot_count(), 1);
    let snapshots = deps.history_store.snapshots();
    let snapshot = &snapshots[0];
    assert_eq!(snapshot.post_id, existing.id);
    // The snapshot holds pre-mutation state
    assert_eq!(snapshot.title, "Existing Title");
    assert_eq!(snapshot.content, "old body");
}

#[tokio::test]
async fn slug_collision_blocks_all_mutation() {
    let deps = TestDependencies::new().mock_post_store(MockPostStore::new().with_slug_taken());
    let project_id = ProjectId::new();
    let existing = published_post(project_id);
    let original_slug = existing.slug.clone();
    let original_title = existing.title.clone();

    let command = EditPostCommand::builder()
        .title("A Different Title")
        .save_mode(SaveMode::PublishNow)
        .content("new body")
        .author("Alice")
        .slug("taken-slug".to_string())
        .build();

    let result = save_post(
        command,
        project_id,
        MemberId::new(),
        Some(existing),
        &deps.into_deps(),
        &CancellationToken::new(),
    )
    .await;

    assert!(!result.succeeded);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("slug"));

    // The post comes back untouched: no merge, no save-mode transition
    let post = result.value.expect("post still returned");
    assert_eq!(post.slug, original_slug);
    assert_eq!(post.title, original_title);
    assert_eq!(post.content, "old body");

    // And nothing downstream ran
    assert_eq!(deps.post_store.persist_count(), 0);
    assert_eq!(deps.history_store.snapshot_count(), 0);
    assert_eq!(deps.teaser.call_count(), 0);
    assert!(deps.post_store.publish_events().is_empty());
}

#[tokio::test]
async fn unchanged_slug_skips_availability_check() {
    let deps = TestDependencies::new().mock_post_store(MockPostStore::new().with_slug_taken());
    let project_id = ProjectId::new();
    let existing = published_post(project_id);
    let current_slug = existing.slug.clone();

    let command = EditPostCommand::builder()
        .title("Existing Title")
        .save_mode(SaveMode::SaveDraft)
        .content("body")
        .author("Alice")
        .slug(current_slug.clone())
        .build();

    let result = save_post(
        command,
        project_id,
        MemberId::new(),
        Some(existing),
        &deps.into_deps(),
        &CancellationToken::new(),
    )
    .await;

    // "Taken" never mattered because the slug did not change
    assert!(result.succeeded);
    assert!(deps.post_store.slug_checks().is_empty());
}

#[tokio::test]
async fn teaser_derives_from_published_body_even_for_drafts() {
    let deps = TestDependencies::new();
    let project_id = ProjectId::new();
    let existing = published_post(project_id);

    let command = EditPostCommand::builder()
        .title("Existing Title")
        .save_mode(SaveMode::SaveDraft)
        .content("brand new draft text")
        .author("Alice")
        .build();

    let result = save_post(
        command,
        project_id,
        MemberId::new(),
        Some(existing),
        &deps.into_deps(),
        &CancellationToken::new(),
    )
    .await;

    assert!(result.succeeded);
    assert_eq!(deps.teaser.call_count(), 1);

    // The request carried the rendered PUBLISHED body, not the new draft
    let requests = deps.teaser.requests();
    let request = &requests[0];
    assert!(request.html.contains("old body"));
    assert!(!request.html.contains("brand new draft text"));
}

#[tokio::test]
async fn teaser_skipped_when_mode_off() {
    let settings = ProjectSettings {
        teaser_mode: TeaserMode::Off,
        ..ProjectSettings::defaults_for(ProjectId::new())
    };
    let deps = TestDependencies::new().mock_post_store(MockPostStore::new().with_settings(settings));

    let result = save_post(
        edit(SaveMode::PublishNow),
        ProjectId::new(),
        MemberId::new(),
        None,
        &deps.into_deps(),
        &CancellationToken::new(),
    )
    .await;

    assert!(result.succeeded);
    assert_eq!(deps.teaser.call_count(), 0);
    assert!(result.value.unwrap().auto_teaser.is_none());
}

#[tokio::test]
async fn suppressed_teaser_is_cleared_not_regenerated() {
    let deps = TestDependencies::new();
    let project_id = ProjectId::new();
    let mut existing = published_post(project_id);
    existing.auto_teaser = Some("stale teaser".to_string());

    let command = EditPostCommand::builder()
        .title("Existing Title")
        .save_mode(SaveMode::SaveDraft)
        .content("body")
        .author("Alice")
        .suppress_teaser(true)
        .build();

    let result = save_post(
        command,
        project_id,
        MemberId::new(),
        Some(existing),
        &deps.into_deps(),
        &CancellationToken::new(),
    )
    .await;

    assert!(result.value.unwrap().auto_teaser.is_none());
    assert_eq!(deps.teaser.call_count(), 0);
}

#[tokio::test]
async fn teaser_override_leaves_cache_untouched() {
    let deps = TestDependencies::new().mock_teaser(MockTeaserGenerator::new().with_content("generated"));
    let project_id = ProjectId::new();
    let mut existing = published_post(project_id);
    existing.auto_teaser = Some("author supplied".to_string());

    let command = EditPostCommand::builder()
        .title("Existing Title")
        .save_mode(SaveMode::SaveDraft)
        .content("body")
        .author("Alice")
        .teaser_override(true)
        .build();

    let result = save_post(
        command,
        project_id,
        MemberId::new(),
        Some(existing),
        &deps.into_deps(),
        &CancellationToken::new(),
    )
    .await;

    assert_eq!(
        result.value.unwrap().auto_teaser.as_deref(),
        Some("author supplied")
    );
    assert_eq!(deps.teaser.call_count(), 0);
}

#[tokio::test]
async fn categories_are_normalized_into_the_post() {
    let deps = TestDependencies::new();

    let command = EditPostCommand::builder()
        .title("Hello World")
        .save_mode(SaveMode::SaveDraft)
        .content("body")
        .author("Alice")
        .categories_raw(" Rust , Web ,Rust,,")
        .build();

    let result = save_post(
        command,
        ProjectId::new(),
        MemberId::new(),
        None,
        &deps.into_deps(),
        &CancellationToken::new(),
    )
    .await;

    assert_eq!(result.value.unwrap().categories, vec!["Rust", "Web"]);
}

#[tokio::test]
async fn store_fault_yields_opaque_error_and_no_value() {
    let deps = TestDependencies::new().mock_post_store(MockPostStore::new().with_update_failure());
    let project_id = ProjectId::new();
    let existing = published_post(project_id);

    let result = save_post(
        edit(SaveMode::SaveDraft),
        project_id,
        MemberId::new(),
        Some(existing),
        &deps.into_deps(),
        &CancellationToken::new(),
    )
    .await;

    assert!(!result.succeeded);
    assert!(result.value.is_none());
    assert_eq!(result.errors.len(), 1);
    // Opaque message, not the collaborator's internals
    assert!(!result.errors[0].contains("mock update failure"));
}

#[tokio::test]
async fn cancelled_request_makes_no_persistence_calls() {
    let deps = TestDependencies::new();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = save_post(
        edit(SaveMode::PublishNow),
        ProjectId::new(),
        MemberId::new(),
        None,
        &deps.into_deps(),
        &cancel,
    )
    .await;

    assert!(!result.succeeded);
    assert!(result.value.is_none());
    assert_eq!(deps.post_store.persist_count(), 0);
    assert!(deps.post_store.publish_events().is_empty());
}

//! Post save pipeline - the publish orchestrator.
//!
//! One entry point, `save_post`, decides how an edit merges into persistent
//! state: normalization, slug uniqueness, the three-way save-mode
//! transition, history snapshotting, teaser regeneration, persistence, and
//! the publish notification. Everything composes into one consistent
//! outcome per request.

use anyhow::Result;
use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::common::utils::{normalize_categories, normalize_slug};
use crate::common::{MemberId, ProjectId};
use crate::domains::posts::commands::{EditPostCommand, SaveMode};
use crate::domains::posts::models::{Post, PostHistory, TeaserMode};
use crate::kernel::messages::{keys, FALLBACK_LANGUAGE};
use crate::kernel::{convert_to_utc, ServerDeps, TeaserRequest};

use super::validation::{CommandResult, ValidationState};

/// How the edit resolves against prior state: a first-time save synthesizes
/// a fresh post and has no history to preserve; an edit of an existing post
/// snapshots it before any field is touched.
enum PostEdit {
    New,
    Existing(Box<Post>),
}

/// Save an edited post.
///
/// Expected validation failures (e.g. a slug collision) come back as
/// `succeeded: false` with the unpersisted post still attached. Unexpected
/// collaborator faults are caught here, logged, and surfaced as a single
/// opaque message with no value.
pub async fn save_post(
    command: EditPostCommand,
    project_id: ProjectId,
    acting_user: MemberId,
    existing: Option<Post>,
    deps: &ServerDeps,
    cancel: &CancellationToken,
) -> CommandResult<Post> {
    let save_mode = command.save_mode;
    match run_pipeline(command, project_id, acting_user, existing, deps, cancel).await {
        Ok(result) => result,
        Err(fault) => {
            error!(
                project_id = %project_id,
                save_mode = ?save_mode,
                error = format!("{:#}", fault),
                "Post save failed unexpectedly"
            );
            CommandResult::failed(
                deps.messages
                    .lookup(FALLBACK_LANGUAGE, keys::UNEXPECTED_FAULT),
            )
        }
    }
}

async fn run_pipeline(
    command: EditPostCommand,
    project_id: ProjectId,
    acting_user: MemberId,
    existing: Option<Post>,
    deps: &ServerDeps,
    cancel: &CancellationToken,
) -> Result<CommandResult<Post>> {
    let settings = deps.post_store.get_settings(project_id).await?;
    let mut validation = ValidationState::default();

    // Step 1: resolve the target post. Existing posts are snapshotted
    // before any field is altered; a new post has no prior state.
    let edit = match existing {
        Some(post) => PostEdit::Existing(Box::new(post)),
        None => PostEdit::New,
    };
    let (mut post, snapshot) = match edit {
        PostEdit::New => (
            Post::new_shell(
                project_id,
                &command.title,
                command.meta_description.clone(),
                acting_user,
            ),
            None,
        ),
        PostEdit::Existing(prior) => {
            let snapshot = PostHistory::snapshot_of(&prior, acting_user);
            (*prior, Some(snapshot))
        }
    };
    let is_new = snapshot.is_none();

    // Step 2: slug resolution. A collision keeps the current slug and
    // records a field error; the edit itself is not rejected outright.
    let mut staged_slug = None;
    if let Some(raw_slug) = command.slug.as_deref() {
        if !raw_slug.trim().is_empty() {
            let normalized = normalize_slug(raw_slug);
            if normalized != post.slug {
                if deps
                    .post_store
                    .slug_is_available(project_id, &normalized)
                    .await?
                {
                    staged_slug = Some(normalized);
                } else {
                    validation.add(
                        "Slug",
                        deps.messages
                            .lookup(&settings.language_code, keys::SLUG_IN_USE),
                    );
                }
            }
        }
    }

    // The clean-validation gate: any error recorded so far suppresses ALL
    // mutation, save-mode effects included. The caller still gets the
    // untouched post back alongside the errors.
    if !validation.is_clean() {
        return Ok(CommandResult::invalid(post, validation.into_messages()));
    }

    if cancel.is_cancelled() {
        anyhow::bail!("post save cancelled before mutation");
    }

    // Step 3: field merge.
    post.title = command.title.clone();
    post.meta_description = command.meta_description.clone();
    post.correlation_key = command.correlation_key.clone();
    post.image_url = command.image_url.clone();
    post.thumbnail_url = command.thumbnail_url.clone();
    post.is_featured = command.is_featured;
    post.content_type = command.content_type.to_string();
    post.teaser_override = command.teaser_override;
    post.suppress_teaser = command.suppress_teaser;
    post.last_modified = Utc::now();
    post.last_modified_by = acting_user;
    if let Some(slug) = staged_slug {
        post.slug = slug;
    }
    post.categories =
        normalize_categories(&command.categories_raw, settings.force_lowercase_categories);

    // Step 4: save-mode transition. Exactly one row of the table fires.
    match command.save_mode {
        SaveMode::SaveDraft => {
            post.draft_content = command.content.clone();
            post.draft_author = command.author.clone();
        }
        SaveMode::PublishLater => {
            post.draft_content = command.content.clone();
            post.draft_author = command.author.clone();

            if let Some(local) = command.new_pub_date {
                let tz = deps.time_zones.resolve_user_time_zone();
                match convert_to_utc(local, tz) {
                    Some(scheduled) => post.draft_pub_date = Some(scheduled),
                    None => {
                        // Local time skipped by a DST gap; keep the previous
                        // schedule rather than failing the whole save.
                        warn!(
                            post_id = %post.id,
                            local_time = %local,
                            time_zone = %tz,
                            "Scheduled time does not exist in the user's time zone, keeping prior schedule"
                        );
                    }
                }
            }

            // A post that has never been published stays unpublished until
            // the schedule fires.
            if post.pub_date.is_none() {
                post.is_published = false;
            }
        }
        SaveMode::PublishNow => {
            post.content = command.content.clone();
            post.author = command.author.clone();
            post.draft_content.clear();
            post.draft_author.clear();
            post.draft_pub_date = None;

            // "Now" wins over a stale future schedule; an already-past
            // pub_date stays put.
            let now = Utc::now();
            match post.pub_date {
                None => post.pub_date = Some(now),
                Some(existing_date) if existing_date > now => post.pub_date = Some(now),
                Some(_) => {}
            }

            post.is_published = true;
        }
    }

    // Step 5: teaser regeneration. Always derived from the PUBLISHED body,
    // even when only the draft changed - the teaser reflects the live view.
    if settings.teaser_mode != TeaserMode::Off {
        if post.suppress_teaser {
            post.auto_teaser = None;
        } else if !post.teaser_override {
            let html = if post.renders_markdown() {
                deps.markdown.to_html(&post.content)
            } else {
                post.content.clone()
            };

            let teaser = deps
                .teaser
                .generate(TeaserRequest {
                    truncation_mode: settings.teaser_truncation_mode,
                    truncation_length: settings.teaser_truncation_length,
                    html,
                    cache_key: uuid::Uuid::new_v4(),
                    slug: post.slug.clone(),
                    language_code: settings.language_code.clone(),
                    log_warnings: true,
                })
                .await?;
            post.auto_teaser = Some(teaser.content);
        }
    }

    if cancel.is_cancelled() {
        anyhow::bail!("post save cancelled before persistence");
    }

    // Step 6: persistence. History strictly precedes the post itself.
    if let Some(snapshot) = &snapshot {
        deps.history_store.create_history(project_id, snapshot).await?;
    }
    if is_new {
        deps.post_store.create(&post).await?;
    } else {
        deps.post_store.update(&post).await?;
    }

    // Step 7: publish side effects. The draft history's purpose ends once
    // the draft becomes the published version.
    if command.save_mode == SaveMode::PublishNow {
        deps.post_store.fire_publish_event(&post).await?;
        deps.history_store
            .delete_draft_history(project_id, post.id)
            .await?;
        info!(post_id = %post.id, slug = %post.slug, "Post published");
    } else {
        info!(post_id = %post.id, save_mode = ?command.save_mode, "Post saved");
    }

    // Step 8: validation is clean on every path that reaches here.
    Ok(CommandResult::ok(post))
}

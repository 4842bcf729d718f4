//! Posts domain - blog documents with draft/published duality.
//!
//! - `models`: Post, PostHistory, ProjectSettings
//! - `commands`: the per-request edit payload and save mode
//! - `actions`: the save/publish pipeline
//! - `effects`: Postgres stores, markdown renderer, teaser generator
//! - `events`: publish notifications

pub mod actions;
pub mod commands;
pub mod effects;
pub mod events;
pub mod models;

// Content Publishing Core
//
// This crate decides how an edited blog post merges into persistent state:
// validation and normalization, draft-vs-published duality with scheduled
// publication, history snapshots, teaser derivation, and the publish
// notification. Transport (HTTP, routing) lives outside this crate and
// talks to it through `domains::posts::actions`.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;

//! Production implementations of the kernel capability traits.

pub mod history_store;
pub mod markdown;
pub mod post_store;
pub mod teaser;

pub use history_store::PostgresHistoryStore;
pub use markdown::CmarkRenderer;
pub use post_store::PostgresPostStore;
pub use teaser::TruncationTeaser;

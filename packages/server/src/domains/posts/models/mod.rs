pub mod post;
pub mod post_history;
pub mod project_settings;

pub use post::{ContentType, Post};
pub use post_history::PostHistory;
pub use project_settings::{ProjectSettings, TeaserMode, TruncationMode};

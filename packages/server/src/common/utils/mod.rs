// Pure utility functions - no IO, no side effects

pub mod categories;
pub mod slug;

pub use categories::normalize_categories;
pub use slug::normalize_slug;

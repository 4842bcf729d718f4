//! Typed ID definitions for all domain entities.
//!
//! Each domain entity gets a marker type and an `Id<T>` alias, providing
//! compile-time type safety for ID usage throughout the application.

// Re-export the core Id type
pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Post entities (the documents being published).
pub struct Post;

/// Marker type for Project entities (a site/blog that owns posts).
pub struct Project;

/// Marker type for Member entities (authenticated users).
pub struct Member;

/// Marker type for PostHistory entities (pre-mutation snapshots).
pub struct PostHistory;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Post entities.
pub type PostId = Id<Post>;

/// Typed ID for Project entities.
pub type ProjectId = Id<Project>;

/// Typed ID for Member entities.
pub type MemberId = Id<Member>;

/// Typed ID for PostHistory entities.
pub type PostHistoryId = Id<PostHistory>;

//! Kernel module - infrastructure traits, dependency wiring, and test doubles.

pub mod deps;
pub mod messages;
pub mod test_dependencies;
pub mod traits;

pub use deps::{FixedTimeZoneResolver, ServerDeps};
pub use messages::MessageCatalog;
pub use test_dependencies::TestDependencies;
pub use traits::*;

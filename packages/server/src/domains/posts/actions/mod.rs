//! Post actions - entry-point functions for post operations.

pub mod save_post;
pub mod validation;

pub use save_post::save_post;
pub use validation::{CommandResult, ValidationState};

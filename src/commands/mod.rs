//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod render;

// Re-export main command functions
pub use models::RenderArgs;
pub use render::{execute_render, validate_args};

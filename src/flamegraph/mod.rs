//! Timeline flamegraph generation.
//!
//! This module converts a call tree into an SVG timeline scene, plus
//! text outlines and summaries for the terminal.

pub mod summary;
pub mod timeline;

// Re-export main types
pub use summary::{generate_text_outline, generate_text_summary};
pub use timeline::{is_visible, render_timeline, Extents, TimelineConfig};

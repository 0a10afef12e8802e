//! Call tree reconstruction and analysis.
//!
//! This module transforms the flat record stream into:
//! - A single-rooted tree of calls with start/end times
//! - A list of anomalies skipped along the way
//! - Tree statistics and hot call rankings

pub mod builder;
pub mod event;
pub mod metrics;

// Re-export main types and functions
pub use builder::{build_call_tree, CallTree, TreeBuilder};
pub use event::{Descendants, Event};
pub use metrics::{calculate_hot_calls, calculate_tree_stats, TreeStats};

//! Summary statistics over a finished call tree.
//!
//! Hot calls are the functions with the most exclusive time.
//! These are the primary targets for optimization.

use super::event::Event;
use crate::parser::schema::HotCall;
use log::debug;
use std::collections::HashMap;

/// Shape and size of a call tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeStats {
    /// Total number of calls, root included
    pub node_count: usize,

    /// Deepest nesting below the root (root alone = 0)
    pub max_depth: usize,

    /// Root duration in milliseconds
    pub total_duration: f64,
}

impl TreeStats {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and the text summary
    pub fn summary(&self) -> String {
        format!(
            "Calls: {} | Max depth: {} | Duration: {:.2}ms",
            self.node_count, self.max_depth, self.total_duration
        )
    }
}

/// Count nodes and measure depth
pub fn calculate_tree_stats(root: &Event) -> TreeStats {
    let mut stats = TreeStats {
        total_duration: root.length(),
        ..TreeStats::default()
    };

    let mut pending = vec![(root, 0usize)];
    while let Some((event, depth)) = pending.pop() {
        stats.node_count += 1;
        stats.max_depth = stats.max_depth.max(depth);
        pending.extend(event.children().iter().map(|child| (child, depth + 1)));
    }

    stats
}

/// Aggregate calls by display name and rank them by self time
///
/// **Public** - main entry point for hot call analysis
///
/// Inclusive totals of recursive functions count every active frame,
/// so they can exceed the root duration. Self time does not double count.
pub fn calculate_hot_calls(root: &Event, top_n: usize) -> Vec<HotCall> {
    let mut by_name: HashMap<&str, (u64, f64, f64)> = HashMap::new();

    for event in root.descendants() {
        let entry = by_name.entry(event.name()).or_insert((0, 0.0, 0.0));
        entry.0 += 1;
        entry.1 += event.length();
        entry.2 += event.self_time();
    }

    debug!("Aggregated {} distinct functions", by_name.len());

    let total = root.length();
    let mut hot: Vec<HotCall> = by_name
        .into_iter()
        .map(|(name, (calls, total_ms, self_ms))| HotCall {
            name: name.to_string(),
            calls,
            total_ms,
            self_ms,
            percentage: if total > 0.0 {
                self_ms / total * 100.0
            } else {
                0.0
            },
        })
        .collect();

    hot.sort_by(|a, b| {
        b.self_ms
            .total_cmp(&a.self_ms)
            .then_with(|| a.name.cmp(&b.name))
    });
    hot.truncate(top_n);
    hot
}

//! Output JSON schema definitions for profile data.
//!
//! This module defines the structure of the optional JSON profile written
//! next to the timeline. Schema is versioned to allow future evolution.

use serde::{Deserialize, Serialize};

/// Top-level profile structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace file the profile was built from
    pub input_file: String,

    /// Capture time reported by the tracer (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<String>,

    /// Horizontal scale used for the timeline (pixels per ms)
    pub x_scale: f64,

    /// Duration of the root call in milliseconds
    pub total_duration_ms: f64,

    /// Number of reconstructed calls
    pub node_count: usize,

    /// Deepest nesting level below the root
    pub max_depth: usize,

    /// Anomalies reported while rebuilding the tree
    pub anomaly_count: usize,

    /// Boxes that survived the visibility threshold
    pub visible_boxes: usize,

    /// Functions ranked by self time
    pub hot_calls: Vec<HotCall>,

    /// Timestamp when profile was generated
    pub generated_at: String,
}

/// Aggregated timing for every call sharing a display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotCall {
    pub name: String,

    /// Number of calls
    pub calls: u64,

    /// Inclusive time in milliseconds
    pub total_ms: f64,

    /// Exclusive time in milliseconds (children subtracted)
    pub self_ms: f64,

    /// Self time as a percentage of the root duration
    pub percentage: f64,
}

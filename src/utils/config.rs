//! Configuration and constants for the CLI.

/// Current JSON profile schema version
pub const PROFILE_SCHEMA_VERSION: &str = "1.0.0";

/// Default horizontal scale in pixels per millisecond
pub const DEFAULT_X_SCALE: f64 = 300.0;

/// Height of one nesting level in the timeline
pub const ROW_HEIGHT: f64 = 20.0;

/// Boxes narrower than this (in pixels) are culled along with their subtree
pub const MIN_VISIBLE_WIDTH: f64 = 2.0;

/// Spacing of the vertical gridlines, in milliseconds
pub const GRIDLINE_INTERVAL: f64 = 100.0;

// Width given to a call that never returned and has no children.
// Not a measurement, just enough to keep the box non-degenerate.
pub const LEAF_EPSILON: f64 = 1.0;

/// Separator between qualified name components in the trace file
pub const NAME_SEPARATOR: char = '^';

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Upper bound for `--top`
pub const MAX_TOP_CALLS: usize = 1000;

// Field names in the trace document
pub const CAPTURE_TIME_FIELD: &str = "t";
pub const TIME_SCALE_FIELD: &str = "tscale";
pub const EVENTS_FIELD: &str = "e";

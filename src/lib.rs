//! Trace Timeline
//!
//! Rebuilds call trees from flat call/return traces and renders them as
//! SVG timelines: time runs left to right, nesting depth top to bottom.
//!
//! ## Pipeline
//!
//! ```ignore
//! let parsed = parser::read_trace_file("run.dfl.json")?;
//! let tree = calltree::build_call_tree(&parsed.records)?;
//! let scene = flamegraph::render_timeline(&tree.root, &flamegraph::TimelineConfig::new());
//! output::write_svg(&scene.to_svg_string(), "run.dfl.svg")?;
//! ```
//!
//! Most users should use the CLI:
//!
//! ```bash
//! trace-timeline run.dfl.json -x 300 --summary
//! ```

pub mod calltree;
pub mod commands;
pub mod flamegraph;
pub mod output;
pub mod parser;
pub mod scene;
pub mod utils;

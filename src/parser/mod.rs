//! Trace parsing and schema definitions.
//!
//! This module handles:
//! - Reading the JSON trace document written by the tracing hook
//! - Validating records into typed `TraceRecord`s
//! - Normalizing native call labels
//! - Defining the output profile schema

pub mod labels;
pub mod record;
pub mod schema;
pub mod trace_file;

// Re-export main types
pub use labels::normalize_native_label;
pub use record::{EventKind, QualifiedName, TraceRecord};
pub use schema::{HotCall, Profile};
pub use trace_file::{parse_record, parse_trace, read_trace_file, ParsedTrace};

//! Trace document parser.
//!
//! Reads the JSON document written by the tracing hook:
//!
//! ```text
//! {"t": 1700000000, "tscale": 1000, "e": [["call", 0.0, 0, "app.py^3^main"], ..., null]}
//! ```
//!
//! The container itself must be well-formed; individual records that are
//! not are logged and skipped.

use super::labels::normalize_native_label;
use super::record::{EventKind, TraceRecord};
use crate::utils::config::{CAPTURE_TIME_FIELD, EVENTS_FIELD, TIME_SCALE_FIELD};
use crate::utils::error::ParseError;
use log::{debug, info, warn};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Parsed trace data (internal representation)
#[derive(Debug, Clone)]
pub struct ParsedTrace {
    /// Coarse capture time in Unix seconds, if the tracer wrote one
    pub capture_time: Option<f64>,

    /// Divisor that converts raw timestamps to milliseconds
    pub time_scale: f64,

    /// Well-formed records up to the terminator, timestamps in milliseconds
    pub records: Vec<TraceRecord>,

    /// Number of malformed records that were dropped
    pub skipped_records: usize,
}

/// Read and parse a trace file from disk
///
/// **Public** - entry point used by the render command
///
/// # Errors
/// * `ParseError::Io` - file cannot be opened
/// * `ParseError::JsonError` - file is not valid JSON
/// * `ParseError::InvalidFormat` / `ParseError::MissingField` - see [`parse_trace`]
pub fn read_trace_file(path: impl AsRef<Path>) -> Result<ParsedTrace, ParseError> {
    let path = path.as_ref();
    debug!("Reading trace from: {}", path.display());

    let file = File::open(path)?;
    let raw: Value = serde_json::from_reader(BufReader::new(file))?;

    parse_trace(&raw)
}

/// Parse a trace document already loaded as JSON
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError::InvalidFormat` - document is not an object, `tscale` is not
///   a positive number, `e` is not an array, or every record is malformed
/// * `ParseError::MissingField` - `tscale` or `e` is absent
pub fn parse_trace(raw: &Value) -> Result<ParsedTrace, ParseError> {
    let doc = raw.as_object().ok_or_else(|| {
        ParseError::InvalidFormat("Trace document must be a JSON object".to_string())
    })?;

    let time_scale = extract_time_scale(doc)?;
    let capture_time = doc.get(CAPTURE_TIME_FIELD).and_then(Value::as_f64);

    let events = doc
        .get(EVENTS_FIELD)
        .ok_or_else(|| ParseError::MissingField(EVENTS_FIELD.to_string()))?
        .as_array()
        .ok_or_else(|| {
            ParseError::InvalidFormat(format!("'{}' must be an array", EVENTS_FIELD))
        })?;

    let (records, skipped_records) = parse_records(events, time_scale)?;

    info!(
        "Parsed {} trace records ({} malformed, time scale {})",
        records.len(),
        skipped_records,
        time_scale
    );

    Ok(ParsedTrace {
        capture_time,
        time_scale,
        records,
        skipped_records,
    })
}

/// Extract and validate the time-scale divisor
///
/// **Private** - internal helper for parse_trace
fn extract_time_scale(doc: &serde_json::Map<String, Value>) -> Result<f64, ParseError> {
    let value = doc
        .get(TIME_SCALE_FIELD)
        .ok_or_else(|| ParseError::MissingField(TIME_SCALE_FIELD.to_string()))?;

    let scale = value.as_f64().ok_or_else(|| {
        ParseError::InvalidFormat(format!("'{}' must be a number, found {}", TIME_SCALE_FIELD, value))
    })?;

    if !scale.is_finite() || scale <= 0.0 {
        return Err(ParseError::InvalidFormat(format!(
            "'{}' must be positive, found {}",
            TIME_SCALE_FIELD, scale
        )));
    }

    Ok(scale)
}

/// Parse the event list up to the terminator
///
/// **Private** - internal parsing logic
fn parse_records(
    events: &[Value],
    time_scale: f64,
) -> Result<(Vec<TraceRecord>, usize), ParseError> {
    let mut records = Vec::with_capacity(events.len());
    let mut skipped = 0;

    for (index, value) in events.iter().enumerate() {
        if is_terminator(value) {
            let trailing = events.len() - index - 1;
            if trailing > 0 {
                debug!("Terminator at record {}, ignoring {} trailing values", index, trailing);
            }
            break;
        }

        match parse_record(value, time_scale) {
            Ok(record) => records.push(record),
            Err(e) => {
                // Log but don't fail - keep the rest of the stream
                warn!("Skipping record {}: {}", index, e);
                skipped += 1;
            }
        }
    }

    if records.is_empty() && skipped > 0 {
        return Err(ParseError::InvalidFormat(
            "All trace records failed to parse".to_string(),
        ));
    }

    Ok((records, skipped))
}

/// Whether a value ends the event stream (any JSON falsy value)
pub fn is_terminator(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Validate a single `[kind, timestamp, level, name]` tuple
///
/// **Public** - exposed for record-level tests
pub fn parse_record(value: &Value, time_scale: f64) -> Result<TraceRecord, ParseError> {
    let fields = value
        .as_array()
        .ok_or_else(|| ParseError::InvalidFormat(format!("Expected array, found {}", value)))?;

    let [kind, timestamp, level, name] = fields.as_slice() else {
        return Err(ParseError::InvalidFormat(format!(
            "Expected 4 fields, found {}",
            fields.len()
        )));
    };

    let kind = kind
        .as_str()
        .ok_or_else(|| ParseError::InvalidFormat(format!("Event kind must be a string, found {}", kind)))?;

    let timestamp = timestamp.as_f64().ok_or_else(|| {
        ParseError::InvalidFormat(format!("Timestamp must be a number, found {}", timestamp))
    })?;

    let level = level
        .as_u64()
        .and_then(|l| u32::try_from(l).ok())
        .ok_or_else(|| {
            ParseError::InvalidFormat(format!("Level must be a non-negative integer, found {}", level))
        })?;

    let name = name
        .as_str()
        .ok_or_else(|| ParseError::InvalidFormat(format!("Name must be a string, found {}", name)))?;

    Ok(TraceRecord::new(
        EventKind::from_wire(kind),
        timestamp / time_scale,
        level,
        &normalize_native_label(name),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_terminator() {
        assert!(is_terminator(&json!(null)));
        assert!(is_terminator(&json!(false)));
        assert!(is_terminator(&json!(0)));
        assert!(is_terminator(&json!("")));
        assert!(is_terminator(&json!([])));
        assert!(!is_terminator(&json!(["call", 0, 0, "a"])));
    }

    #[test]
    fn test_parse_record_scales_timestamp() {
        let record = parse_record(&json!(["call", 2500, 1, "a.py^1^f"]), 1000.0).unwrap();
        assert_eq!(record.kind, EventKind::Call);
        assert_eq!(record.timestamp, 2.5);
        assert_eq!(record.level, 1);
        assert_eq!(record.target.display_name(), "f");
    }

    #[test]
    fn test_parse_record_rejects_bad_shapes() {
        assert!(parse_record(&json!(["call", 0, 0]), 1.0).is_err());
        assert!(parse_record(&json!([1, 0, 0, "a"]), 1.0).is_err());
        assert!(parse_record(&json!(["call", "x", 0, "a"]), 1.0).is_err());
        assert!(parse_record(&json!(["call", 0, -1, "a"]), 1.0).is_err());
        assert!(parse_record(&json!(["call", 0, 0, 7]), 1.0).is_err());
        assert!(parse_record(&json!({"kind": "call"}), 1.0).is_err());
    }

    #[test]
    fn test_time_scale_must_be_positive() {
        let doc = json!({"tscale": 0, "e": [null]});
        assert!(matches!(parse_trace(&doc), Err(ParseError::InvalidFormat(_))));
    }
}

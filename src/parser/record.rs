//! Typed trace records.
//!
//! The wire format carries loosely-typed `[kind, time, level, name]` tuples.
//! Everything past the parser works with these types instead.

use crate::utils::config::NAME_SEPARATOR;
use std::fmt;

/// Kind of a trace event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Call,
    Return,
    /// A frame unwound by an exception
    Exception,
    /// Anything else the tracer emitted; kept so the tree builder can report it
    Unrecognized(String),
}

impl EventKind {
    /// Map a wire string to an event kind
    ///
    /// `c_exception` is what the tracing hook writes for native frames
    /// that unwind, so it is folded into `Exception`.
    pub fn from_wire(kind: &str) -> Self {
        match kind {
            "call" => Self::Call,
            "return" => Self::Return,
            "exception" | "c_exception" => Self::Exception,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Whether this kind closes the innermost open call
    pub fn is_return(&self) -> bool {
        matches!(self, Self::Return | Self::Exception)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => f.write_str("call"),
            Self::Return => f.write_str("return"),
            Self::Exception => f.write_str("exception"),
            Self::Unrecognized(kind) => f.write_str(kind),
        }
    }
}

/// Structured path identifying a call site, e.g. `["app.py", "12", "main"]`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QualifiedName(Vec<String>);

impl QualifiedName {
    /// Split a wire name on the component separator
    pub fn parse(raw: &str) -> Self {
        Self(raw.split(NAME_SEPARATOR).map(str::to_string).collect())
    }

    pub fn components(&self) -> &[String] {
        &self.0
    }

    /// Last path element, used for labels and return matching
    pub fn display_name(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or("")
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", NAME_SEPARATOR)?;
            }
            f.write_str(part)?;
        }
        Ok(())
    }
}

/// One validated trace event
///
/// `timestamp` is already divided by the document's time scale,
/// so it is in milliseconds since the start of the capture.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceRecord {
    pub kind: EventKind,
    pub timestamp: f64,
    pub level: u32,
    pub target: QualifiedName,
}

impl TraceRecord {
    pub fn new(kind: EventKind, timestamp: f64, level: u32, target: &str) -> Self {
        Self {
            kind,
            timestamp,
            level,
            target: QualifiedName::parse(target),
        }
    }

    pub fn call(timestamp: f64, level: u32, target: &str) -> Self {
        Self::new(EventKind::Call, timestamp, level, target)
    }

    pub fn ret(timestamp: f64, level: u32, target: &str) -> Self {
        Self::new(EventKind::Return, timestamp, level, target)
    }

    pub fn exception(timestamp: f64, level: u32, target: &str) -> Self {
        Self::new(EventKind::Exception, timestamp, level, target)
    }
}

//! Rebuild a call tree from a flat record stream.
//!
//! Keeps an explicit stack of open calls. A call pushes, a return or
//! exception pops and closes. Structural problems are collected as
//! [`TraceAnomaly`] values and the offending record is skipped, so a bad
//! record never disturbs the part of the tree that was already built.

use super::event::{Event, OpenEvent};
use crate::parser::{EventKind, TraceRecord};
use crate::utils::error::{TraceAnomaly, TreeError};
use log::{debug, info, warn};

/// Result of a successful reconstruction
#[derive(Debug, Clone)]
pub struct CallTree {
    /// The first top-level call and everything nested inside it
    pub root: Event,

    /// Everything that was skipped, in stream order
    pub anomalies: Vec<TraceAnomaly>,
}

impl CallTree {
    /// Anomalies other than informational unrecognized-kind skips
    pub fn structural_anomalies(&self) -> impl Iterator<Item = &TraceAnomaly> {
        self.anomalies.iter().filter(|a| a.is_structural())
    }
}

/// Incremental tree builder
///
/// Feed records in stream order with [`TreeBuilder::push`], then call
/// [`TreeBuilder::finish`]. Calls still open at that point are closed with
/// a derived end time.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: Vec<OpenEvent>,
    root: Option<Event>,
    root_started: bool,
    anomalies: Vec<TraceAnomaly>,
    index: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current number of open calls
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Consume one record
    pub fn push(&mut self, record: &TraceRecord) {
        let index = self.index;
        self.index += 1;

        match &record.kind {
            EventKind::Unrecognized(kind) => {
                let anomaly = TraceAnomaly::UnrecognizedKind {
                    index,
                    kind: kind.clone(),
                };
                info!("{}", anomaly);
                self.anomalies.push(anomaly);
            }
            kind if kind.is_return() => self.close_call(index, record),
            _ => self.open_call(index, record),
        }
    }

    fn open_call(&mut self, index: usize, record: &TraceRecord) {
        if self.root_started && self.stack.is_empty() {
            self.report(TraceAnomaly::ExtraTopLevelCall {
                index,
                name: record.target.to_string(),
            });
            return;
        }

        if record.level as usize != self.stack.len() {
            debug!(
                "record {}: level {} recorded at stack depth {}",
                index,
                record.level,
                self.stack.len()
            );
        }

        self.root_started = true;
        self.stack.push(OpenEvent::new(
            record.target.clone(),
            record.timestamp,
            record.level,
        ));
    }

    fn close_call(&mut self, index: usize, record: &TraceRecord) {
        let Some(open) = self.stack.pop() else {
            self.report(TraceAnomaly::StackUnderflow {
                index,
                name: record.target.to_string(),
            });
            return;
        };

        let expected = open.target().display_name();
        let found = record.target.display_name();
        if expected != found {
            if record.kind == EventKind::Exception {
                // The unwinding frame need not be the one that raised.
                debug!(
                    "record {}: exception return '{}' closes '{}'",
                    index, found, expected
                );
            } else {
                self.report(TraceAnomaly::ReturnMismatch {
                    index,
                    expected: expected.to_string(),
                    found: found.to_string(),
                });
            }
        }

        // The close is honored either way so the stack stays consistent.
        self.attach(open.finalize(Some(record.timestamp)));
    }

    /// Hand a finished call to its parent, or make it the root
    fn attach(&mut self, event: Event) {
        match self.stack.last_mut() {
            Some(parent) => parent.push_child(event),
            None => self.root = Some(event),
        }
    }

    fn report(&mut self, anomaly: TraceAnomaly) {
        warn!("{}", anomaly);
        self.anomalies.push(anomaly);
    }

    /// Close any calls left open and return the tree
    ///
    /// # Errors
    /// * `TreeError::EmptyTrace` - no call record was ever seen
    pub fn finish(mut self) -> Result<CallTree, TreeError> {
        if !self.stack.is_empty() {
            debug!("{} calls still open at end of stream", self.stack.len());
        }

        while let Some(open) = self.stack.pop() {
            let event = open.finalize(None);
            self.attach(event);
        }

        let root = self.root.ok_or(TreeError::EmptyTrace {
            skipped: self.anomalies.len(),
        })?;

        debug!(
            "Rebuilt call tree rooted at '{}' ({} anomalies)",
            root.name(),
            self.anomalies.len()
        );

        Ok(CallTree {
            root,
            anomalies: self.anomalies,
        })
    }
}

/// Build a call tree from a complete record stream
///
/// **Public** - main entry point for reconstruction
pub fn build_call_tree(records: &[TraceRecord]) -> Result<CallTree, TreeError> {
    debug!("Building call tree from {} records", records.len());

    let mut builder = TreeBuilder::new();
    for record in records {
        builder.push(record);
    }
    builder.finish()
}
